//! Unified error codes for the Lodge platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Membership errors
//! - 3xxx: Payment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Email is already registered
    EmailTaken = 1005,
    /// Password too short
    PasswordTooShort = 1006,

    // ==================== 2xxx: Membership ====================
    /// No active plan exists for the requested tier
    PlanNotFound = 2001,
    /// User has no membership record
    MembershipNotFound = 2002,
    /// Membership is not in the required state for this operation
    MembershipNotActive = 2003,
    /// User profile not found
    ProfileNotFound = 2004,

    // ==================== 3xxx: Payment ====================
    /// Currency code is not in the supported set
    UnsupportedCurrency = 3001,
    /// Gateway rejected the charge (card declined, etc.)
    PaymentRejected = 3002,
    /// Gateway unreachable or returned a transient failure
    GatewayUnavailable = 3003,
    /// Charge id already recorded in the ledger (replayed request)
    DuplicateCharge = 3004,
    /// Charge succeeded but local records could not be written
    PostChargeInconsistency = 3005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",
            ErrorCode::EmailTaken => "Email is already registered",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // Membership
            ErrorCode::PlanNotFound => "Membership plan not found",
            ErrorCode::MembershipNotFound => "No membership found",
            ErrorCode::MembershipNotActive => "Membership is not active",
            ErrorCode::ProfileNotFound => "User profile not found",

            // Payment
            ErrorCode::UnsupportedCurrency => "Unsupported currency",
            ErrorCode::PaymentRejected => "Payment was rejected",
            ErrorCode::GatewayUnavailable => "Payment gateway unavailable",
            ErrorCode::DuplicateCharge => "Charge has already been recorded",
            ErrorCode::PostChargeInconsistency => {
                "Charge succeeded but recording failed; contact support"
            }

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::EmailTaken),
            1006 => Ok(ErrorCode::PasswordTooShort),

            // Membership
            2001 => Ok(ErrorCode::PlanNotFound),
            2002 => Ok(ErrorCode::MembershipNotFound),
            2003 => Ok(ErrorCode::MembershipNotActive),
            2004 => Ok(ErrorCode::ProfileNotFound),

            // Payment
            3001 => Ok(ErrorCode::UnsupportedCurrency),
            3002 => Ok(ErrorCode::PaymentRejected),
            3003 => Ok(ErrorCode::GatewayUnavailable),
            3004 => Ok(ErrorCode::DuplicateCharge),
            3005 => Ok(ErrorCode::PostChargeInconsistency),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        // General
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::AlreadyExists.code(), 4);

        // Auth
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::InvalidCredentials.code(), 1002);
        assert_eq!(ErrorCode::TokenExpired.code(), 1003);
        assert_eq!(ErrorCode::EmailTaken.code(), 1005);

        // Membership
        assert_eq!(ErrorCode::PlanNotFound.code(), 2001);
        assert_eq!(ErrorCode::MembershipNotFound.code(), 2002);
        assert_eq!(ErrorCode::MembershipNotActive.code(), 2003);

        // Payment
        assert_eq!(ErrorCode::UnsupportedCurrency.code(), 3001);
        assert_eq!(ErrorCode::PaymentRejected.code(), 3002);
        assert_eq!(ErrorCode::GatewayUnavailable.code(), 3003);
        assert_eq!(ErrorCode::DuplicateCharge.code(), 3004);
        assert_eq!(ErrorCode::PostChargeInconsistency.code(), 3005);

        // System
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::PaymentRejected.is_success());
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(0), Ok(ErrorCode::Success));
        assert_eq!(ErrorCode::try_from(1001), Ok(ErrorCode::NotAuthenticated));
        assert_eq!(ErrorCode::try_from(2001), Ok(ErrorCode::PlanNotFound));
        assert_eq!(ErrorCode::try_from(3004), Ok(ErrorCode::DuplicateCharge));
        assert_eq!(ErrorCode::try_from(9001), Ok(ErrorCode::InternalError));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(4001), Err(InvalidErrorCode(4001)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::NotFound).unwrap();
        assert_eq!(json, "3");

        let json = serde_json::to_string(&ErrorCode::PlanNotFound).unwrap();
        assert_eq!(json, "2001");

        let json = serde_json::to_string(&ErrorCode::Success).unwrap();
        assert_eq!(json, "0");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("0").unwrap();
        assert_eq!(code, ErrorCode::Success);

        let code: ErrorCode = serde_json::from_str("3002").unwrap();
        assert_eq!(code, ErrorCode::PaymentRejected);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display_and_message() {
        assert_eq!(format!("{}", ErrorCode::PlanNotFound), "2001");
        assert_eq!(ErrorCode::NotFound.message(), "Resource not found");
        assert_eq!(
            ErrorCode::UnsupportedCurrency.message(),
            "Unsupported currency"
        );
    }

    #[test]
    fn test_roundtrip() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::NotAuthenticated,
            ErrorCode::PlanNotFound,
            ErrorCode::PostChargeInconsistency,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let json = serde_json::to_string(&code).unwrap();
            let parsed: ErrorCode = serde_json::from_str(&json).unwrap();
            assert_eq!(code, parsed);
        }
    }
}
