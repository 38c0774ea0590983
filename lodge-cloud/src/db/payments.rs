//! Payment ledger operations
//!
//! The ledger is append-only: entries are inserted, never updated or
//! deleted. The gateway charge_id carries a unique constraint, so replaying
//! a charge surfaces as a unique violation.

use rust_decimal::Decimal;
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct Payment {
    pub id: String,
    pub user_id: String,
    pub membership_id: Option<i64>,
    pub amount: Decimal,
    pub currency: String,
    pub charge_id: String,
    pub status: String,
    pub description: String,
    pub created_at: i64,
}

pub struct NewPayment<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub membership_id: Option<i64>,
    pub amount: Decimal,
    pub currency: &'a str,
    pub charge_id: &'a str,
    pub status: &'a str,
    pub description: &'a str,
    pub now: i64,
}

/// Append a ledger entry. Callable with a pool (failed-attempt records) or
/// inside the upgrade transaction.
pub async fn insert<'e, E>(executor: E, payment: &NewPayment<'_>) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO payments
            (id, user_id, membership_id, amount, currency, charge_id, status, description, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(payment.id)
    .bind(payment.user_id)
    .bind(payment.membership_id)
    .bind(payment.amount)
    .bind(payment.currency)
    .bind(payment.charge_id)
    .bind(payment.status)
    .bind(payment.description)
    .bind(payment.now)
    .execute(executor)
    .await?;

    Ok(())
}

/// True when an insert failed because the charge_id is already ledgered
pub fn is_duplicate_charge(err: &sqlx::Error) -> bool {
    super::is_unique_violation(err)
}

/// Payment history, newest first
pub async fn list_by_user(
    pool: &PgPool,
    user_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<Payment>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, user_id, membership_id, amount, currency, charge_id, status, description, created_at
         FROM payments WHERE user_id = $1
         ORDER BY created_at DESC, id DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
