//! Activity feed endpoint

use axum::Extension;
use axum::Json;
use axum::extract::{Query, State};

use crate::api::{ApiResult, Pagination};
use crate::auth::member_auth::MemberIdentity;
use crate::db;
use crate::db::activity::ActivityEntry;
use crate::state::AppState;

/// GET /api/activity — the caller's activity entries, newest first
pub async fn activity_feed(
    State(state): State<AppState>,
    Extension(identity): Extension<MemberIdentity>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Vec<ActivityEntry>> {
    let (limit, offset) = pagination.clamped();
    let entries = db::activity::list_by_user(&state.pool, &identity.user_id, limit, offset).await?;
    Ok(Json(entries))
}
