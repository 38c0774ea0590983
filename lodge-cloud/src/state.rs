//! Application state for lodge-cloud

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::gateway::{PaymentGateway, StripeGateway};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// Payment gateway client
    pub gateway: Arc<dyn PaymentGateway>,
    /// JWT secret for member authentication
    pub jwt_secret: String,
}

impl AppState {
    /// Connect to the database, run migrations, and build the gateway client
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        let gateway: Arc<dyn PaymentGateway> =
            Arc::new(StripeGateway::new(config.stripe_secret_key.clone()));

        Ok(Self {
            pool,
            gateway,
            jwt_secret: config.jwt_secret.clone(),
        })
    }
}
