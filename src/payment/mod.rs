//! Payment flow: order creation and signature reconciliation.

pub mod gateway;
pub mod verify;

pub use gateway::{HttpPaymentGateway, MockPaymentGateway, PaymentGateway};
pub use verify::PaymentVerifier;

use crate::error::{RegistryError, Result};
use crate::store::RegistrationRepository;
use crate::types::{PaymentStatus, RegistrationId};
use serde_json::Value;
use std::sync::Arc;

/// Fixed settlement currency.
pub const CURRENCY: &str = "INR";

/// Payment service: mints gateway orders and reconciles verified
/// completions against the registration ledger.
pub struct PaymentService {
    registrations: Arc<dyn RegistrationRepository>,
    gateway: Arc<dyn PaymentGateway>,
    verifier: PaymentVerifier,
}

impl PaymentService {
    /// Creates a new payment service.
    #[must_use]
    pub fn new(
        registrations: Arc<dyn RegistrationRepository>,
        gateway: Arc<dyn PaymentGateway>,
        verifier: PaymentVerifier,
    ) -> Self {
        Self {
            registrations,
            gateway,
            verifier,
        }
    }

    /// Mint a gateway order for `amount` whole currency units.
    ///
    /// The amount is converted to minor units (`× 100`), the currency is
    /// fixed to INR, and the gateway's order object is returned verbatim.
    /// Nothing is persisted here: the order is only durably linked to a
    /// registration when verification succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidRequest`] for a non-positive
    /// amount or one whose minor-unit value would overflow, or
    /// [`RegistryError::Gateway`] if the gateway call fails.
    pub async fn create_order(&self, amount: i64) -> Result<Value> {
        if amount <= 0 {
            return Err(RegistryError::InvalidRequest(
                "Amount must be positive".to_string(),
            ));
        }
        // The amount is client-supplied; the minor-unit conversion must
        // not wrap.
        let amount_minor = amount.checked_mul(100).ok_or_else(|| {
            RegistryError::InvalidRequest("Amount is too large".to_string())
        })?;

        let receipt = format!("rcpt_{}", uuid::Uuid::new_v4().simple());
        let order = self
            .gateway
            .create_order(amount_minor, CURRENCY, &receipt)
            .await?;

        tracing::info!(amount, receipt = %receipt, "Gateway order created");
        Ok(order)
    }

    /// Verify a claimed payment completion and reconcile the ledger.
    ///
    /// On a signature match the referenced entry's payment status becomes
    /// `completed` and both gateway references are stored together, once.
    /// Repeat verification of a completed entry is an idempotent no-op.
    /// An unknown registration ID still reports success without
    /// persisting anything; this mirrors the legacy system and is logged
    /// at warn level.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidSignature`] on a mismatch, or a
    /// database error.
    pub async fn verify_and_reconcile(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
        registration_id: RegistrationId,
    ) -> Result<&'static str> {
        if !self.verifier.verify(order_id, payment_id, signature) {
            tracing::warn!(order_id, registration_id = %registration_id, "Signature mismatch");
            return Err(RegistryError::InvalidSignature);
        }

        match self.registrations.get(registration_id).await? {
            Some(entry) if entry.payment_status == PaymentStatus::Completed => {
                Ok("Payment already verified")
            }
            Some(_) => {
                self.registrations
                    .record_payment(registration_id, order_id, payment_id)
                    .await?;
                tracing::info!(
                    registration_id = %registration_id,
                    order_id,
                    payment_id,
                    "Payment verified"
                );
                Ok("Payment verified successfully")
            }
            None => {
                tracing::warn!(
                    registration_id = %registration_id,
                    order_id,
                    "Verified payment references an unknown registration; nothing persisted"
                );
                Ok("Payment verified successfully")
            }
        }
    }
}
