//! API routes for lodge-cloud

pub mod activity;
pub mod health;
pub mod membership;
pub mod payments;
pub mod profile;
pub mod register;

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::member_auth::member_auth_middleware;
use crate::error::ServiceError;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, ServiceError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Public: registration, login, plan catalog
    let public = Router::new()
        .route("/api/register", post(register::register))
        .route("/api/login", post(register::login))
        .route("/api/plans", get(membership::list_plans));

    // Member API (JWT authenticated)
    let member = Router::new()
        .route("/api/membership", get(membership::get_membership))
        .route("/api/membership/upgrade", post(membership::upgrade))
        .route("/api/membership/cancel", post(membership::cancel))
        .route("/api/payments", get(payments::payment_history))
        .route("/api/activity", get(activity::activity_feed))
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            member_auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(member)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Pagination query parameters shared by the history endpoints
#[derive(Debug, serde::Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

impl Pagination {
    /// Clamp to sane bounds before hitting the database
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, 200), self.offset.max(0))
    }
}
