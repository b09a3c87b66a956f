//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use api::{ApiConfig, DEFAULT_LOG_FILTER, build_router, cors_layer};
use auth::{AuthAppState, PgAdminRepository};
use portfolio::{ConfiguredMailRelay, PgPortfolioRepository};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    tracing::info!(app_env = ?config.app_env, "Configuration loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_state = AuthAppState::new(PgAdminRepository::new(pool.clone()), config.auth_config());

    let mail = ConfiguredMailRelay::from_settings(config.mail.clone())?;
    if matches!(mail, ConfiguredMailRelay::Logging(_)) {
        tracing::warn!("SMTP_HOST not set; contact messages are stored but not mailed");
    }

    let app = build_router(auth_state, PgPortfolioRepository::new(pool.clone()), mail, pool)
        .layer(cors_layer(&config.frontend_origins));

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
