//! Payment gateway client
//!
//! Talks to the Stripe Charges REST API directly over HTTPS (no SDK).
//! The [`PaymentGateway`] trait is the seam that lets the upgrade flow run
//! against a scripted gateway in tests.

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

const STRIPE_CHARGES_URL: &str = "https://api.stripe.com/v1/charges";

/// A charge request, already converted to gateway minor units
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    /// Amount in minor units (cents)
    pub amount_minor: i64,
    /// Lowercase ISO currency code
    pub currency: &'static str,
    /// Single-use card token supplied by the client
    pub token: String,
    /// Statement description
    pub description: String,
}

/// A confirmed gateway charge
#[derive(Debug, Clone)]
pub struct Charge {
    /// Gateway-assigned charge identifier (e.g. `ch_...`)
    pub id: String,
}

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The gateway processed the request and declined it. A charge id is
    /// present when the gateway created a charge object before declining.
    #[error("charge rejected: {reason}")]
    Rejected {
        charge_id: Option<String>,
        reason: String,
    },
    /// Network failure or gateway-side error; no charge was confirmed
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a charge. Callers must treat an `Unavailable` result as
    /// "no money moved" and a `Rejected` result as a final decline.
    async fn charge(&self, req: &ChargeRequest) -> Result<Charge, GatewayError>;
}

/// Stripe Charges API client
pub struct StripeGateway {
    secret_key: String,
    client: reqwest::Client,
}

impl StripeGateway {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn charge(&self, req: &ChargeRequest) -> Result<Charge, GatewayError> {
        let amount = req.amount_minor.to_string();
        let response = self
            .client
            .post(STRIPE_CHARGES_URL)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[
                ("amount", amount.as_str()),
                ("currency", req.currency),
                ("source", req.token.as_str()),
                ("description", req.description.as_str()),
            ])
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let status = response.status().as_u16();
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        parse_charge_response(status, &body)
    }
}

/// Interpret a Stripe charges response. Declines (4xx, or a charge object
/// that did not reach `succeeded`) surface as `Rejected`; 5xx and malformed
/// bodies as `Unavailable`.
fn parse_charge_response(
    status: u16,
    body: &serde_json::Value,
) -> Result<Charge, GatewayError> {
    if (200..300).contains(&status) {
        return match (body["id"].as_str(), body["status"].as_str()) {
            (Some(id), Some("succeeded")) => Ok(Charge { id: id.to_string() }),
            (Some(id), Some(other)) => Err(GatewayError::Rejected {
                charge_id: Some(id.to_string()),
                reason: format!("charge status: {other}"),
            }),
            _ => Err(GatewayError::Unavailable(
                "malformed charge response".to_string(),
            )),
        };
    }

    if (400..500).contains(&status) {
        let error = &body["error"];
        let reason = error["message"]
            .as_str()
            .unwrap_or("charge declined")
            .to_string();
        let charge_id = error["charge"].as_str().map(String::from);
        return Err(GatewayError::Rejected { charge_id, reason });
    }

    Err(GatewayError::Unavailable(format!(
        "gateway returned HTTP {status}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_succeeded_charge() {
        let body = json!({"id": "ch_1abc", "status": "succeeded"});
        let charge = parse_charge_response(200, &body).unwrap();
        assert_eq!(charge.id, "ch_1abc");
    }

    #[test]
    fn test_parse_non_succeeded_charge_is_rejected() {
        let body = json!({"id": "ch_1abc", "status": "failed"});
        let err = parse_charge_response(200, &body).unwrap_err();
        match err {
            GatewayError::Rejected { charge_id, reason } => {
                assert_eq!(charge_id.as_deref(), Some("ch_1abc"));
                assert!(reason.contains("failed"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_card_decline() {
        let body = json!({
            "error": {
                "type": "card_error",
                "message": "Your card was declined.",
                "charge": "ch_declined1"
            }
        });
        let err = parse_charge_response(402, &body).unwrap_err();
        match err {
            GatewayError::Rejected { charge_id, reason } => {
                assert_eq!(charge_id.as_deref(), Some("ch_declined1"));
                assert_eq!(reason, "Your card was declined.");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_decline_without_charge_object() {
        // Invalid token: Stripe rejects before creating a charge.
        let body = json!({
            "error": {"type": "invalid_request_error", "message": "No such token"}
        });
        let err = parse_charge_response(400, &body).unwrap_err();
        match err {
            GatewayError::Rejected { charge_id, .. } => assert!(charge_id.is_none()),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_server_error_is_unavailable() {
        let body = json!({"error": {"message": "internal"}});
        let err = parse_charge_response(500, &body).unwrap_err();
        assert!(matches!(err, GatewayError::Unavailable(_)));
    }

    #[test]
    fn test_parse_malformed_success_body_is_unavailable() {
        let body = json!({"object": "charge"});
        let err = parse_charge_response(200, &body).unwrap_err();
        assert!(matches!(err, GatewayError::Unavailable(_)));
    }
}
