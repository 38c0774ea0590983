//! Membership upgrade and cancellation flows
//!
//! The gateway charge runs outside any database transaction so the row lock
//! never spans a network call. The membership transition, ledger entry, and
//! activity entry then commit atomically. A write failure after the charge
//! has succeeded is surfaced as `PostChargeInconsistency` with the charge id
//! so an operator can reconcile against the gateway.
//!
//! Storage goes through [`UpgradeStore`] (implemented for `PgPool`) so the
//! flow's invariants can be exercised against an in-memory store.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use shared::util::now_millis;

use crate::currency::{self, Currency};
use crate::db;
use crate::db::plans::Plan;
use crate::gateway::{ChargeRequest, GatewayError, PaymentGateway};
use crate::membership::{self, MembershipStatus};

#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error("no active plan for tier '{0}'")]
    PlanNotFound(String),
    #[error("unsupported currency '{0}'")]
    UnsupportedCurrency(String),
    #[error("payment rejected: {reason}")]
    GatewayRejected { reason: String },
    #[error("payment gateway unavailable: {0}")]
    GatewayUnavailable(String),
    #[error("charge {0} is already recorded in the ledger")]
    DuplicateCharge(String),
    #[error("charge {charge_id} succeeded but the local records failed to commit")]
    PostChargeInconsistency {
        charge_id: String,
        #[source]
        source: sqlx::Error,
    },
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

#[derive(Debug, Error)]
pub enum CancelError {
    #[error("no membership on record")]
    MembershipNotFound,
    #[error("membership is '{0}'; only active memberships can be cancelled")]
    NotActive(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Result of an upgrade request
#[derive(Debug)]
pub enum UpgradeOutcome {
    /// Charged and activated
    Upgraded {
        tier: String,
        amount: Decimal,
        currency: Currency,
        charge_id: String,
    },
    /// The user already holds the requested tier; nothing was charged
    AlreadySubscribed { tier: String },
}

/// Everything a ledger write for one charge attempt needs
pub struct ChargeRecord<'a> {
    pub user_id: &'a str,
    pub plan: &'a Plan,
    pub amount: Decimal,
    pub currency: Currency,
    pub charge_id: &'a str,
    pub description: &'a str,
    pub now: i64,
}

/// Storage seam for the upgrade flow
#[async_trait]
pub trait UpgradeStore: Send + Sync {
    async fn find_active_plan(&self, tier: &str) -> Result<Option<Plan>, sqlx::Error>;

    async fn current_tier(&self, user_id: &str) -> Result<Option<String>, sqlx::Error>;

    /// Commit a successful charge: membership transition, succeeded ledger
    /// entry, and activity entry land together or not at all.
    async fn commit_upgrade(&self, record: &ChargeRecord<'_>) -> Result<(), sqlx::Error>;

    /// Append a `failed` ledger entry for a declined charge.
    async fn record_failed_charge(&self, record: &ChargeRecord<'_>) -> Result<(), sqlx::Error>;
}

/// Charge the member and move their membership to the requested tier.
pub async fn upgrade_membership(
    store: &dyn UpgradeStore,
    gateway: &dyn PaymentGateway,
    user_id: &str,
    tier: &str,
    currency_code: &str,
    payment_token: &str,
) -> Result<UpgradeOutcome, UpgradeError> {
    let plan = store
        .find_active_plan(tier)
        .await?
        .ok_or_else(|| UpgradeError::PlanNotFound(tier.to_string()))?;

    // Same-tier requests short-circuit before any charge is attempted.
    if let Some(current) = store.current_tier(user_id).await? {
        if current == plan.tier {
            return Ok(UpgradeOutcome::AlreadySubscribed { tier: current });
        }
    }

    let currency = Currency::from_code(currency_code)
        .ok_or_else(|| UpgradeError::UnsupportedCurrency(currency_code.to_string()))?;
    let amount = currency::convert(plan.price, currency);
    let description = charge_description(&plan.tier, &plan.name);

    let request = ChargeRequest {
        amount_minor: currency::minor_units(amount),
        currency: currency.as_gateway_code(),
        token: payment_token.to_string(),
        description: description.clone(),
    };

    let charge = match gateway.charge(&request).await {
        Ok(charge) => charge,
        Err(GatewayError::Rejected { charge_id, reason }) => {
            // A declined charge that produced a charge object still goes in
            // the ledger, status 'failed'. Recording is best-effort: the
            // decline below is reported either way.
            if let Some(id) = charge_id {
                let record = ChargeRecord {
                    user_id,
                    plan: &plan,
                    amount,
                    currency,
                    charge_id: &id,
                    description: &description,
                    now: now_millis(),
                };
                if let Err(e) = store.record_failed_charge(&record).await {
                    if db::is_unique_violation(&e) {
                        tracing::warn!(
                            charge_id = %id,
                            "Declined charge id already ledgered; replayed attempt"
                        );
                    } else {
                        tracing::error!(charge_id = %id, error = %e, "Failed to ledger rejected charge");
                    }
                }
            }
            tracing::warn!(user_id = %user_id, tier = %plan.tier, reason = %reason, "Charge rejected");
            return Err(UpgradeError::GatewayRejected { reason });
        }
        Err(GatewayError::Unavailable(message)) => {
            tracing::warn!(user_id = %user_id, tier = %plan.tier, error = %message, "Gateway unavailable");
            return Err(UpgradeError::GatewayUnavailable(message));
        }
    };

    let record = ChargeRecord {
        user_id,
        plan: &plan,
        amount,
        currency,
        charge_id: &charge.id,
        description: &description,
        now: now_millis(),
    };
    match store.commit_upgrade(&record).await {
        Ok(()) => {
            tracing::info!(
                user_id = %user_id,
                tier = %plan.tier,
                charge_id = %charge.id,
                "Membership upgraded"
            );
            Ok(UpgradeOutcome::Upgraded {
                tier: plan.tier,
                amount,
                currency,
                charge_id: charge.id,
            })
        }
        Err(e) if db::payments::is_duplicate_charge(&e) => {
            tracing::error!(charge_id = %charge.id, "Charge id already present in the ledger");
            Err(UpgradeError::DuplicateCharge(charge.id))
        }
        Err(e) => {
            // Money has moved; this path must be loud.
            tracing::error!(
                user_id = %user_id,
                charge_id = %charge.id,
                error = %e,
                "Post-charge commit failed, manual reconciliation required"
            );
            Err(UpgradeError::PostChargeInconsistency {
                charge_id: charge.id,
                source: e,
            })
        }
    }
}

/// Mark the member's active membership cancelled. Access runs until the end
/// of the paid period; nothing is refunded.
pub async fn cancel_membership(pool: &PgPool, user_id: &str) -> Result<(), CancelError> {
    let mut tx = pool.begin().await?;

    let current = db::memberships::lock_by_user(tx.as_mut(), user_id)
        .await?
        .ok_or(CancelError::MembershipNotFound)?;

    let status = MembershipStatus::from_db(&current.status);
    if !status.is_some_and(|s| s.can_cancel()) {
        return Err(CancelError::NotActive(current.status));
    }

    let now = now_millis();
    db::memberships::set_cancelled(tx.as_mut(), user_id, now).await?;
    db::activity::log(
        tx.as_mut(),
        user_id,
        "membership_cancelled",
        "Membership cancellation requested",
        None,
        now,
    )
    .await?;
    tx.commit().await?;

    tracing::info!(user_id = %user_id, "Membership cancelled");
    Ok(())
}

#[async_trait]
impl UpgradeStore for PgPool {
    async fn find_active_plan(&self, tier: &str) -> Result<Option<Plan>, sqlx::Error> {
        db::plans::find_active_by_tier(self, tier).await
    }

    async fn current_tier(&self, user_id: &str) -> Result<Option<String>, sqlx::Error> {
        db::memberships::current_tier(self, user_id).await
    }

    async fn commit_upgrade(&self, record: &ChargeRecord<'_>) -> Result<(), sqlx::Error> {
        let mut tx = self.begin().await?;

        // Serialize concurrent transitions on this user's membership.
        db::memberships::lock_by_user(tx.as_mut(), record.user_id).await?;

        let transition = membership::upgrade_transition(record.plan.id, record.now);
        let membership_id =
            db::memberships::apply_upgrade(tx.as_mut(), record.user_id, &transition, record.now)
                .await?;

        let payment_id = Uuid::new_v4().to_string();
        db::payments::insert(
            tx.as_mut(),
            &db::payments::NewPayment {
                id: &payment_id,
                user_id: record.user_id,
                membership_id: Some(membership_id),
                amount: record.amount,
                currency: record.currency.as_code(),
                charge_id: record.charge_id,
                status: "succeeded",
                description: record.description,
                now: record.now,
            },
        )
        .await?;

        db::activity::log(
            tx.as_mut(),
            record.user_id,
            "payment",
            &format!("Upgraded to {} membership", record.plan.tier),
            None,
            record.now,
        )
        .await?;

        tx.commit().await
    }

    async fn record_failed_charge(&self, record: &ChargeRecord<'_>) -> Result<(), sqlx::Error> {
        let payment_id = Uuid::new_v4().to_string();
        db::payments::insert(
            self,
            &db::payments::NewPayment {
                id: &payment_id,
                user_id: record.user_id,
                membership_id: None,
                amount: record.amount,
                currency: record.currency.as_code(),
                charge_id: record.charge_id,
                status: "failed",
                description: record.description,
                now: record.now,
            },
        )
        .await
    }
}

/// Statement description shown on the member's card statement
fn charge_description(tier: &str, name: &str) -> String {
    let mut tier_title = String::with_capacity(tier.len());
    let mut chars = tier.chars();
    if let Some(first) = chars.next() {
        tier_title.extend(first.to_uppercase());
        tier_title.push_str(chars.as_str());
    }
    format!("{tier_title} Membership - {name}")
}
