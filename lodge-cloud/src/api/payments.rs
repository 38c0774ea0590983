//! Payment history endpoint

use axum::Extension;
use axum::Json;
use axum::extract::{Query, State};

use crate::api::{ApiResult, Pagination};
use crate::auth::member_auth::MemberIdentity;
use crate::db;
use crate::db::payments::Payment;
use crate::state::AppState;

/// GET /api/payments — the caller's ledger entries, newest first
pub async fn payment_history(
    State(state): State<AppState>,
    Extension(identity): Extension<MemberIdentity>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Vec<Payment>> {
    let (limit, offset) = pagination.clamped();
    let payments = db::payments::list_by_user(&state.pool, &identity.user_id, limit, offset).await?;
    Ok(Json(payments))
}
