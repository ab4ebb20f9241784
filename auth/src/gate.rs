use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::jwt::AccessToken;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenSettings;
use crate::jwt::TokenValidator;
use crate::jwt::ValidationError;
use crate::password::argon2::DECOY_DIGEST;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::store::CredentialStore;
use crate::store::StoreError;
use crate::user::User;
use crate::user::Username;
use crate::user::UsernameError;

/// Authentication gate combining the credential store, password hashing and
/// token issuance/validation.
///
/// Shared across request handlers behind an `Arc`; it holds no mutable state
/// besides what the store itself manages.
pub struct AuthGate<S: CredentialStore> {
    store: Arc<S>,
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    validator: TokenValidator,
    settings: TokenSettings,
}

/// Caller-visible authentication errors.
///
/// Login failures collapse into `InvalidCredentials` and token failures into
/// `Unauthorized`; the specific cause is only logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Credential store error: {0}")]
    Store(StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken(username) => AuthError::UsernameTaken(username),
            other => AuthError::Store(other),
        }
    }
}

impl<S: CredentialStore> AuthGate<S> {
    /// Create a new gate.
    ///
    /// # Arguments
    /// * `store` - Credential store holding registered users
    /// * `secret` - Server secret for token signing and verification
    /// * `settings` - Token lifetime and clock skew policy
    pub fn new(store: Arc<S>, secret: &[u8], settings: TokenSettings) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::new(secret),
            validator: TokenValidator::new(secret, settings.leeway),
            settings,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn settings(&self) -> TokenSettings {
        self.settings
    }

    /// Register a new user with a hashed password.
    ///
    /// # Errors
    /// * `InvalidUsername` - Username fails validation
    /// * `Password` - Password is empty or hashing failed
    /// * `UsernameTaken` - Username is already registered
    /// * `Store` - Credential store failed
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = Username::new(username)?;

        if password.is_empty() {
            return Err(PasswordError::Empty.into());
        }

        if self.store.find_by_username(&username).await?.is_some() {
            tracing::info!(username = %username, "Registration rejected: username taken");
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let password_hash = self.hash_password(password).await?;
        let user = self.store.insert(User::new(username, password_hash)).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue an access token valid from now.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Store` / `Password` / `Jwt` / `Internal` - Infrastructure failure
    pub async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError> {
        self.login_at(username, password, Utc::now()).await
    }

    /// Verify credentials and issue an access token valid from `now`.
    pub async fn login_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, AuthError> {
        let user = match Username::new(username) {
            Ok(username) => self.store.find_by_username(&username).await?,
            Err(_) => None,
        };

        // Unknown users are checked against a decoy so both failures cost the same.
        let digest = user
            .as_ref()
            .map_or_else(|| DECOY_DIGEST.to_string(), |u| u.password_hash.clone());
        let password_matches = self.verify_password(password, digest).await?;

        let user = match user {
            Some(user) if password_matches => user,
            Some(_) => {
                tracing::warn!(username = %username, reason = "password mismatch", "Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
            None => {
                tracing::warn!(username = %username, reason = "unknown username", "Login rejected");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let token = self.issuer.issue(&user.username, now, self.settings.ttl)?;

        tracing::info!(
            user_id = %user.id,
            expires_at = %token.expires_at(),
            "Access token issued"
        );
        Ok(token)
    }

    /// Resolve the user a presented token authenticates, as of now.
    ///
    /// # Errors
    /// * `Unauthorized` - Token malformed, forged, expired, or its subject is gone
    /// * `Store` - Subject lookup failed
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        self.authenticate_at(token, Utc::now()).await
    }

    /// Resolve the user a presented token authenticates, as of `now`.
    pub async fn authenticate_at(&self, token: &str, now: DateTime<Utc>) -> Result<User, AuthError> {
        match self.validator.validate(token, now, self.store.as_ref()).await {
            Ok(user) => Ok(user),
            Err(ValidationError::Rejected(rejection)) => {
                tracing::warn!(reason = %rejection, "Access token rejected");
                Err(AuthError::Unauthorized)
            }
            Err(ValidationError::Store(err)) => {
                tracing::error!(error = %err, "Subject lookup failed");
                Err(AuthError::Store(err))
            }
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.password_hasher;
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(AuthError::from)
    }

    async fn verify_password(&self, password: &str, digest: String) -> Result<bool, AuthError> {
        let hasher = self.password_hasher;
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AuthError::Internal(format!("Verification task failed: {}", e)))?
            .map_err(AuthError::from)
    }
}
