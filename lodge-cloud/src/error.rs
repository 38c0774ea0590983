//! Unified service-layer error type for lodge-cloud
//!
//! `ServiceError` bridges DB-layer errors (`sqlx::Error`) and the API-layer
//! error (`AppError`) so handlers can use `?` without manual
//! `.map_err(|e| { tracing::error!(...); AppError::new(...) })` boilerplate.
//! The flow-specific errors from the upgrade service convert here into their
//! `ErrorCode`s.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::services::upgrade::{CancelError, UpgradeError};

/// Service-layer error with two variants:
///
/// - `Db`: database/infrastructure errors (auto-logged, mapped to DatabaseError)
/// - `App`: business-rule errors (pass-through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Db(sqlx::Error),
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl From<UpgradeError> for AppError {
    fn from(e: UpgradeError) -> Self {
        match e {
            UpgradeError::PlanNotFound(tier) => AppError::with_message(
                ErrorCode::PlanNotFound,
                format!("No active membership plan for tier '{tier}'"),
            ),
            UpgradeError::UnsupportedCurrency(code) => AppError::with_message(
                ErrorCode::UnsupportedCurrency,
                format!("Currency '{code}' is not supported"),
            )
            .with_detail("currency", code),
            UpgradeError::GatewayRejected { reason } => {
                AppError::with_message(ErrorCode::PaymentRejected, reason)
            }
            UpgradeError::GatewayUnavailable(_) => AppError::new(ErrorCode::GatewayUnavailable),
            UpgradeError::DuplicateCharge(charge_id) => {
                AppError::new(ErrorCode::DuplicateCharge).with_detail("charge_id", charge_id)
            }
            UpgradeError::PostChargeInconsistency { charge_id, .. } => {
                AppError::new(ErrorCode::PostChargeInconsistency)
                    .with_detail("charge_id", charge_id)
            }
            UpgradeError::Db(db_err) => {
                tracing::error!(error = %db_err, "Upgrade database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl From<CancelError> for AppError {
    fn from(e: CancelError) -> Self {
        match e {
            CancelError::MembershipNotFound => AppError::new(ErrorCode::MembershipNotFound),
            CancelError::NotActive(status) => AppError::with_message(
                ErrorCode::MembershipNotActive,
                format!("Membership is '{status}'; only active memberships can be cancelled"),
            ),
            CancelError::Db(db_err) => {
                tracing::error!(error = %db_err, "Cancel database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl From<UpgradeError> for ServiceError {
    fn from(e: UpgradeError) -> Self {
        ServiceError::App(e.into())
    }
}

impl From<CancelError> for ServiceError {
    fn from(e: CancelError) -> Self {
        ServiceError::App(e.into())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_plan_not_found_maps_to_404() {
        let err: AppError = UpgradeError::PlanNotFound("platinum".to_string()).into();
        assert_eq!(err.code, ErrorCode::PlanNotFound);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert!(err.message.contains("platinum"));
    }

    #[test]
    fn test_unsupported_currency_maps_to_400() {
        let err: AppError = UpgradeError::UnsupportedCurrency("JPY".to_string()).into();
        assert_eq!(err.code, ErrorCode::UnsupportedCurrency);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rejection_maps_to_402_with_reason() {
        let err: AppError = UpgradeError::GatewayRejected {
            reason: "Your card was declined.".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::PaymentRejected);
        assert_eq!(err.http_status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(err.message, "Your card was declined.");
    }

    #[test]
    fn test_gateway_unavailable_maps_to_503() {
        let err: AppError =
            UpgradeError::GatewayUnavailable("connection refused".to_string()).into();
        assert_eq!(err.code, ErrorCode::GatewayUnavailable);
        assert_eq!(err.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_duplicate_charge_maps_to_409_with_charge_id() {
        let err: AppError = UpgradeError::DuplicateCharge("ch_dup".to_string()).into();
        assert_eq!(err.code, ErrorCode::DuplicateCharge);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        assert_eq!(err.details.unwrap().get("charge_id").unwrap(), "ch_dup");
    }

    #[test]
    fn test_post_charge_inconsistency_keeps_charge_id() {
        let err: AppError = UpgradeError::PostChargeInconsistency {
            charge_id: "ch_orphan".to_string(),
            source: sqlx::Error::PoolClosed,
        }
        .into();
        assert_eq!(err.code, ErrorCode::PostChargeInconsistency);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.details.unwrap().get("charge_id").unwrap(), "ch_orphan");
    }

    #[test]
    fn test_cancel_errors() {
        let err: AppError = CancelError::MembershipNotFound.into();
        assert_eq!(err.code, ErrorCode::MembershipNotFound);
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);

        let err: AppError = CancelError::NotActive("pending".to_string()).into();
        assert_eq!(err.code, ErrorCode::MembershipNotActive);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
    }
}
