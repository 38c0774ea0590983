//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::PlanNotFound
            | Self::MembershipNotFound
            | Self::ProfileNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::EmailTaken
            | Self::MembershipNotActive
            | Self::DuplicateCharge => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::PasswordTooShort
            | Self::UnsupportedCurrency => StatusCode::BAD_REQUEST,

            // 402 Payment Required
            Self::PaymentRejected => StatusCode::PAYMENT_REQUIRED,

            // 503 Service Unavailable
            Self::GatewayUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Unknown
            | Self::PostChargeInconsistency
            | Self::InternalError
            | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
