//! Membership row operations
//!
//! Each user has at most one membership row (user_id is unique). The row is
//! never deleted; lifecycle changes go through status updates.

use sqlx::PgPool;

use crate::membership::UpgradeTransition;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Membership {
    pub id: i64,
    pub user_id: String,
    pub plan_id: Option<i64>,
    pub status: String,
    pub current_period_start: Option<i64>,
    pub current_period_end: Option<i64>,
    pub cancel_at_period_end: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

const MEMBERSHIP_COLUMNS: &str = "id, user_id, plan_id, status, current_period_start, \
     current_period_end, cancel_at_period_end, created_at, updated_at";

pub async fn find_by_user(pool: &PgPool, user_id: &str) -> Result<Option<Membership>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {MEMBERSHIP_COLUMNS} FROM user_memberships WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Tier label of the user's current plan. None when the user has no
/// membership or the plan was removed from the catalog.
pub async fn current_tier(pool: &PgPool, user_id: &str) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(Option<String>,)> = sqlx::query_as(
        "SELECT p.tier FROM user_memberships m
         LEFT JOIN membership_plans p ON p.id = m.plan_id
         WHERE m.user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.and_then(|r| r.0))
}

/// Lock the user's membership row for the rest of the transaction. Returns
/// None when the user has no membership yet (nothing to lock).
pub async fn lock_by_user(
    conn: &mut sqlx::PgConnection,
    user_id: &str,
) -> Result<Option<Membership>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {MEMBERSHIP_COLUMNS} FROM user_memberships WHERE user_id = $1 FOR UPDATE"
    ))
    .bind(user_id)
    .fetch_optional(conn)
    .await
}

/// Create the starter membership assigned at registration. Runs inside the
/// registration transaction.
pub async fn create_with_plan(
    conn: &mut sqlx::PgConnection,
    user_id: &str,
    plan_id: i64,
    status: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO user_memberships (user_id, plan_id, status, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $4)",
    )
    .bind(user_id)
    .bind(plan_id)
    .bind(status)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(())
}

/// Apply a paid upgrade: create the membership row or transition the
/// existing one. Clears any pending cancellation. Returns the membership id.
pub async fn apply_upgrade(
    conn: &mut sqlx::PgConnection,
    user_id: &str,
    transition: &UpgradeTransition,
    now: i64,
) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO user_memberships
            (user_id, plan_id, status, current_period_start, current_period_end,
             cancel_at_period_end, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, FALSE, $6, $6)
         ON CONFLICT (user_id) DO UPDATE SET
            plan_id = EXCLUDED.plan_id,
            status = EXCLUDED.status,
            current_period_start = EXCLUDED.current_period_start,
            current_period_end = EXCLUDED.current_period_end,
            cancel_at_period_end = FALSE,
            updated_at = EXCLUDED.updated_at
         RETURNING id",
    )
    .bind(user_id)
    .bind(transition.plan_id)
    .bind(transition.status.as_db())
    .bind(transition.period_start)
    .bind(transition.period_end)
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(row.0)
}

/// Mark the membership cancelled at the member's request. Access lapses at
/// the period end, so cancel_at_period_end is set alongside the status.
pub async fn set_cancelled(
    conn: &mut sqlx::PgConnection,
    user_id: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE user_memberships
         SET status = 'cancelled', cancel_at_period_end = TRUE, updated_at = $2
         WHERE user_id = $1",
    )
    .bind(user_id)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(())
}
