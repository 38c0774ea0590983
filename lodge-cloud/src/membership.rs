//! Membership lifecycle states and transition rules

/// Billing period granted by a paid upgrade (30 days, epoch milliseconds)
pub const PERIOD_MILLIS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Membership lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Pending,
    Active,
    Cancelled,
    Inactive,
}

impl MembershipStatus {
    /// Parse from the database representation
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "cancelled" => Some(Self::Cancelled),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    /// Database representation
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Cancellation is only valid from the active state
    pub fn can_cancel(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Fields written to the membership row when a paid upgrade commits
#[derive(Debug, Clone)]
pub struct UpgradeTransition {
    pub plan_id: i64,
    pub status: MembershipStatus,
    pub period_start: i64,
    pub period_end: i64,
}

/// Compute the membership state after a successful charge. A paid upgrade
/// re-enters the active state regardless of the previous status and clears
/// any pending cancellation.
pub fn upgrade_transition(plan_id: i64, now: i64) -> UpgradeTransition {
    UpgradeTransition {
        plan_id,
        status: MembershipStatus::Active,
        period_start: now,
        period_end: now + PERIOD_MILLIS,
    }
}
