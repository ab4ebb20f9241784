use std::env;

use auth::TokenSettings;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "JwtConfig::default_expiration_minutes")]
    pub expiration_minutes: i64,
    #[serde(default)]
    pub leeway_seconds: i64,
}

impl JwtConfig {
    pub const MIN_SECRET_BYTES: usize = 32;

    fn default_expiration_minutes() -> i64 {
        TokenSettings::DEFAULT_TTL_MINUTES
    }

    /// Token policy handed to the auth gate.
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings::new(
            Duration::minutes(self.expiration_minutes),
            Duration::seconds(self.leeway_seconds),
        )
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < Self::MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                Self::MIN_SECRET_BYTES
            )));
        }
        if self.expiration_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_minutes must be positive".to_string(),
            ));
        }
        if self.leeway_seconds < 0 {
            return Err(ConfigError::Message(
                "jwt.leeway_seconds must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.jwt.validate()?;

        Ok(config)
    }
}
