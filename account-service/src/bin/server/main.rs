use std::sync::Arc;

use account_service::config::Config;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::PostgresCredentialStore;
use auth::AuthGate;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MAX_DB_CONNECTIONS: u32 = 5;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let token_settings = config.jwt.token_settings();

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = token_settings.ttl.num_minutes(),
        token_leeway_seconds = token_settings.leeway.num_seconds(),
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(MAX_DB_CONNECTIONS)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = MAX_DB_CONNECTIONS,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool));
    let gate = Arc::new(AuthGate::new(
        credential_store,
        config.jwt.secret.as_bytes(),
        token_settings,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(gate)).await?;

    tracing::info!("Server exited");
    Ok(())
}
