//! Database access layer
//!
//! One module per table. Queries are plain `sqlx::query`/`query_as` against
//! PostgreSQL; timestamps are epoch milliseconds throughout.

pub mod activity;
pub mod memberships;
pub mod payments;
pub mod plans;
pub mod profiles;
pub mod users;

/// True when the error is a PostgreSQL unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
