//! Member profile endpoints

use axum::Extension;
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use shared::error::{AppError, ErrorCode};
use shared::util::now_millis;

use crate::api::ApiResult;
use crate::auth::member_auth::MemberIdentity;
use crate::db;
use crate::db::profiles::{Profile, ProfileUpdate};
use crate::state::AppState;

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<MemberIdentity>,
) -> ApiResult<Profile> {
    let profile = db::profiles::find_by_user(&state.pool, &identity.user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ProfileNotFound))?;
    Ok(Json(profile))
}

/// PUT /api/profile — partial update; omitted fields are left unchanged
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<MemberIdentity>,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<Value> {
    let updated =
        db::profiles::update(&state.pool, &identity.user_id, &update, now_millis()).await?;
    if !updated {
        return Err(AppError::new(ErrorCode::ProfileNotFound).into());
    }

    Ok(Json(json!({ "status": "updated" })))
}
