//! Member profile operations

use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct Profile {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields a member may change on their own profile
#[derive(Debug, serde::Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

/// Insert the profile row created alongside a new user. Runs inside the
/// registration transaction.
pub async fn create(
    conn: &mut sqlx::PgConnection,
    user_id: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO user_profiles (user_id, first_name, last_name, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $4)",
    )
    .bind(user_id)
    .bind(first_name)
    .bind(last_name)
    .bind(now)
    .execute(conn)
    .await?;

    Ok(())
}

pub async fn find_by_user(pool: &PgPool, user_id: &str) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as(
        "SELECT user_id, first_name, last_name, phone, company, created_at, updated_at
         FROM user_profiles WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Apply a partial update; absent fields keep their current value.
/// Returns false when no profile row exists.
pub async fn update(
    pool: &PgPool,
    user_id: &str,
    update: &ProfileUpdate,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE user_profiles SET
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            phone = COALESCE($4, phone),
            company = COALESCE($5, company),
            updated_at = $6
         WHERE user_id = $1",
    )
    .bind(user_id)
    .bind(update.first_name.as_deref())
    .bind(update.last_name.as_deref())
    .bind(update.phone.as_deref())
    .bind(update.company.as_deref())
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
