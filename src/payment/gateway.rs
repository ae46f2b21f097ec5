//! Payment order gateway adapter.
//!
//! The gateway mints payment orders and later signs completion payloads.
//! [`HttpPaymentGateway`] talks to a Razorpay-style REST API;
//! [`MockPaymentGateway`] stands in for development and tests.

use crate::error::{RegistryError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Payment gateway trait.
///
/// Abstraction over the external payment processor. The order object is
/// passed through to clients verbatim, so it stays untyped JSON.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Mint a payment order for `amount_minor` minor currency units.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Gateway`] if the gateway call fails or the
    /// gateway rejects the order.
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<Value>;
}

/// HTTP gateway client authenticated with key id/secret.
pub struct HttpPaymentGateway {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl HttpPaymentGateway {
    /// Creates a new client for the given gateway endpoint.
    #[must_use]
    pub fn new(base_url: impl Into<String>, key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount_minor,
                "currency": currency,
                "receipt": receipt,
            }))
            .send()
            .await
            .map_err(|e| RegistryError::Gateway(format!("Order request failed: {e}")))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| RegistryError::Gateway(format!("Malformed gateway response: {e}")))?;

        if !status.is_success() {
            return Err(RegistryError::Gateway(format!(
                "Gateway rejected order ({status}): {body}"
            )));
        }

        Ok(body)
    }
}

/// Mock payment gateway (always succeeds).
#[derive(Clone, Debug, Default)]
pub struct MockPaymentGateway;

impl MockPaymentGateway {
    /// Creates a new mock gateway.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Creates an Arc-wrapped instance for sharing.
    #[must_use]
    pub fn shared() -> Arc<dyn PaymentGateway> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<Value> {
        let order_id = format!("order_{}", uuid::Uuid::new_v4().simple());

        tracing::info!(
            order_id = %order_id,
            amount = amount_minor,
            currency,
            "Mock order created"
        );

        Ok(json!({
            "id": order_id,
            "entity": "order",
            "amount": amount_minor,
            "amount_paid": 0,
            "amount_due": amount_minor,
            "currency": currency,
            "receipt": receipt,
            "status": "created",
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_order_echoes_amount_and_currency() {
        let gateway = MockPaymentGateway::new();
        let order = gateway.create_order(4900, "INR", "rcpt_1").await.unwrap();

        assert_eq!(order["amount"], 4900);
        assert_eq!(order["currency"], "INR");
        assert_eq!(order["status"], "created");
        assert!(order["id"].as_str().unwrap().starts_with("order_"));
    }
}
