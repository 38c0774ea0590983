//! Activity log operations

use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct ActivityEntry {
    pub id: i64,
    pub action: String,
    pub description: String,
    pub ip_address: Option<String>,
    pub created_at: i64,
}

/// Append an activity entry. Callable with a pool (best-effort logging) or
/// inside a transaction when the entry must commit with other writes.
pub async fn log<'e, E>(
    executor: E,
    user_id: &str,
    action: &str,
    description: &str,
    ip_address: Option<&str>,
    now: i64,
) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO activity_logs (user_id, action, description, ip_address, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind(action)
    .bind(description)
    .bind(ip_address)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(())
}

/// Activity feed for a user, newest first
pub async fn list_by_user(
    pool: &PgPool,
    user_id: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<ActivityEntry>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, action, description, ip_address, created_at
         FROM activity_logs WHERE user_id = $1
         ORDER BY created_at DESC, id DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}
