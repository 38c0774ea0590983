//! Scriptable in-memory gateway for tests

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{Charge, ChargeRequest, GatewayError, PaymentGateway};

/// Gateway double that pops pre-scripted outcomes and counts calls
pub struct MockGateway {
    outcomes: Mutex<Vec<Result<Charge, GatewayError>>>,
    calls: AtomicUsize,
}

impl MockGateway {
    pub fn with_outcomes(outcomes: Vec<Result<Charge, GatewayError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every charge succeeds with the given charge id
    pub fn succeeding(charge_id: &str) -> Self {
        Self::with_outcomes(vec![Ok(Charge {
            id: charge_id.to_string(),
        })])
    }

    /// Every charge is declined with the given reason and charge id
    pub fn rejecting(charge_id: Option<&str>, reason: &str) -> Self {
        Self::with_outcomes(vec![Err(GatewayError::Rejected {
            charge_id: charge_id.map(String::from),
            reason: reason.to_string(),
        })])
    }

    /// Every charge fails with a transport error
    pub fn unavailable() -> Self {
        Self::with_outcomes(vec![Err(GatewayError::Unavailable(
            "connection refused".to_string(),
        ))])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn charge(&self, _req: &ChargeRequest) -> Result<Charge, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.len() > 1 {
            outcomes.remove(0)
        } else {
            outcomes
                .first()
                .cloned()
                .unwrap_or(Err(GatewayError::Unavailable("no outcome scripted".into())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChargeRequest {
        ChargeRequest {
            amount_minor: 1700,
            currency: "eur",
            token: "tok_visa".to_string(),
            description: "Silver Membership - Silver".to_string(),
        }
    }

    #[tokio::test]
    async fn test_succeeding_gateway() {
        let gateway = MockGateway::succeeding("ch_mock1");
        let charge = gateway.charge(&request()).await.unwrap();
        assert_eq!(charge.id, "ch_mock1");
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_rejecting_gateway() {
        let gateway = MockGateway::rejecting(Some("ch_mock2"), "card declined");
        let err = gateway.charge(&request()).await.unwrap_err();
        match err {
            GatewayError::Rejected { charge_id, reason } => {
                assert_eq!(charge_id.as_deref(), Some("ch_mock2"));
                assert_eq!(reason, "card declined");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scripted_sequence_then_sticky_last() {
        let gateway = MockGateway::with_outcomes(vec![
            Err(GatewayError::Unavailable("timeout".to_string())),
            Ok(Charge {
                id: "ch_retry".to_string(),
            }),
        ]);
        assert!(gateway.charge(&request()).await.is_err());
        assert_eq!(gateway.charge(&request()).await.unwrap().id, "ch_retry");
        // Last outcome repeats once the script is exhausted.
        assert_eq!(gateway.charge(&request()).await.unwrap().id, "ch_retry");
        assert_eq!(gateway.calls(), 3);
    }
}
