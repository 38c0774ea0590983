//! Registration and login endpoints
//!
//! Registration creates the user, their profile, and the starter (free)
//! membership in a single transaction, then issues a session token.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use shared::error::{AppError, ErrorCode};
use shared::util::now_millis;

use crate::api::ApiResult;
use crate::auth;
use crate::auth::member_auth;
use crate::db;
use crate::membership::MembershipStatus;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

/// Tier assigned to every new member
const STARTER_TIER: &str = "free";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Value> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::validation("A valid email address is required").into());
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort).into());
    }
    if db::users::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailTaken).into());
    }

    let hashed_password = auth::hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let starter_plan = db::plans::find_active_by_tier(&state.pool, STARTER_TIER).await?;

    let user_id = Uuid::new_v4().to_string();
    let now = now_millis();

    // User, profile, and starter membership commit together.
    let mut tx = state.pool.begin().await?;
    if let Err(e) = db::users::create(tx.as_mut(), &user_id, &email, &hashed_password, now).await {
        // Two concurrent registrations can both pass the pre-check above;
        // the loser lands on the unique email constraint here.
        if db::is_unique_violation(&e) {
            return Err(AppError::new(ErrorCode::EmailTaken).into());
        }
        return Err(e.into());
    }
    db::profiles::create(
        tx.as_mut(),
        &user_id,
        req.first_name.as_deref(),
        req.last_name.as_deref(),
        now,
    )
    .await?;
    match starter_plan {
        Some(plan) => {
            db::memberships::create_with_plan(
                tx.as_mut(),
                &user_id,
                plan.id,
                MembershipStatus::Active.as_db(),
                now,
            )
            .await?;
        }
        None => {
            tracing::warn!("Starter plan missing from catalog; registering without membership");
        }
    }
    db::activity::log(
        tx.as_mut(),
        &user_id,
        "signup",
        &format!("New member registration: {email}"),
        None,
        now,
    )
    .await?;
    tx.commit().await?;

    let token = member_auth::create_token(&user_id, &email, &state.jwt_secret).map_err(|e| {
        tracing::error!("Token creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    tracing::info!(user_id = %user_id, "Member registered");
    Ok(Json(json!({ "user_id": user_id, "token": token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Value> {
    let email = req.email.trim().to_lowercase();

    let user = db::users::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !auth::verify_password(&req.password, &user.hashed_password) {
        return Err(AppError::invalid_credentials().into());
    }

    let token = member_auth::create_token(&user.id, &user.email, &state.jwt_secret).map_err(
        |e| {
            tracing::error!("Token creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        },
    )?;

    // Best-effort: a failed activity write must not block login.
    if let Err(e) = db::activity::log(
        &state.pool,
        &user.id,
        "login",
        "Member logged in",
        None,
        now_millis(),
    )
    .await
    {
        tracing::warn!(user_id = %user.id, error = %e, "Failed to record login activity");
    }

    Ok(Json(json!({ "user_id": user.id, "token": token })))
}
