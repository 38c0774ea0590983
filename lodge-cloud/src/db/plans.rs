//! Plan catalog operations

use rust_decimal::Decimal;
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct Plan {
    pub id: i64,
    pub tier: String,
    pub name: String,
    /// Price in the currency-agnostic base unit
    pub price: Decimal,
    pub description: String,
    pub is_active: bool,
    #[serde(skip_serializing)]
    pub created_at: i64,
}

/// Active plan for a tier label, if any. The tier column is unique, so a
/// label resolves to at most one plan.
pub async fn find_active_by_tier(pool: &PgPool, tier: &str) -> Result<Option<Plan>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, tier, name, price, description, is_active, created_at
         FROM membership_plans WHERE tier = $1 AND is_active = TRUE",
    )
    .bind(tier)
    .fetch_optional(pool)
    .await
}

/// All active plans, cheapest first
pub async fn list_active(pool: &PgPool) -> Result<Vec<Plan>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, tier, name, price, description, is_active, created_at
         FROM membership_plans WHERE is_active = TRUE ORDER BY price, id",
    )
    .fetch_all(pool)
    .await
}
