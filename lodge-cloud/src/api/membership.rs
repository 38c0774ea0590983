//! Membership endpoints: plan catalog, current membership, upgrade, cancel

use axum::Json;
use axum::extract::State;
use axum::Extension;
use serde::Deserialize;
use serde_json::{Value, json};

use shared::error::{AppError, ErrorCode};

use crate::api::ApiResult;
use crate::auth::member_auth::MemberIdentity;
use crate::db;
use crate::db::plans::Plan;
use crate::services::upgrade::{self, UpgradeOutcome};
use crate::state::AppState;

/// GET /api/plans — the public plan catalog, cheapest first
pub async fn list_plans(State(state): State<AppState>) -> ApiResult<Vec<Plan>> {
    let plans = db::plans::list_active(&state.pool).await?;
    Ok(Json(plans))
}

/// GET /api/membership — the caller's membership and current tier
pub async fn get_membership(
    State(state): State<AppState>,
    Extension(identity): Extension<MemberIdentity>,
) -> ApiResult<Value> {
    let membership = db::memberships::find_by_user(&state.pool, &identity.user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MembershipNotFound))?;
    let tier = db::memberships::current_tier(&state.pool, &identity.user_id).await?;

    Ok(Json(json!({
        "tier": tier,
        "status": membership.status,
        "current_period_start": membership.current_period_start,
        "current_period_end": membership.current_period_end,
        "cancel_at_period_end": membership.cancel_at_period_end,
    })))
}

#[derive(Debug, Deserialize)]
pub struct UpgradeRequest {
    pub tier: String,
    pub currency: String,
    pub payment_token: String,
}

/// POST /api/membership/upgrade — charge the member and switch tiers
pub async fn upgrade(
    State(state): State<AppState>,
    Extension(identity): Extension<MemberIdentity>,
    Json(req): Json<UpgradeRequest>,
) -> ApiResult<Value> {
    let outcome = upgrade::upgrade_membership(
        &state.pool,
        state.gateway.as_ref(),
        &identity.user_id,
        &req.tier,
        &req.currency,
        &req.payment_token,
    )
    .await?;

    match outcome {
        UpgradeOutcome::Upgraded {
            tier,
            amount,
            currency,
            charge_id,
        } => Ok(Json(json!({
            "status": "upgraded",
            "tier": tier,
            "amount": amount,
            "currency": currency.as_code(),
            "charge_id": charge_id,
        }))),
        UpgradeOutcome::AlreadySubscribed { tier } => Ok(Json(json!({
            "status": "already_subscribed",
            "tier": tier,
            "message": format!("You already have the {tier} membership"),
        }))),
    }
}

/// POST /api/membership/cancel — request cancellation of an active membership
pub async fn cancel(
    State(state): State<AppState>,
    Extension(identity): Extension<MemberIdentity>,
) -> ApiResult<Value> {
    upgrade::cancel_membership(&state.pool, &identity.user_id).await?;

    Ok(Json(json!({
        "status": "cancelled",
        "message": "Your membership has been cancelled; access runs until the period end",
    })))
}
