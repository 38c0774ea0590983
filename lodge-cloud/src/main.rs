//! lodge-cloud — Membership management service
//!
//! Long-running service that:
//! - Registers members and issues JWT sessions
//! - Sells tiered membership plans, charging cards through Stripe
//! - Keeps an append-only payment ledger and per-member activity log

mod api;
mod auth;
mod config;
mod currency;
mod db;
mod error;
mod gateway;
mod membership;
mod services;
mod state;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lodge_cloud=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting lodge-cloud (env: {})", config.environment);

    let state = AppState::new(&config).await?;
    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("lodge-cloud listening on {http_addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
