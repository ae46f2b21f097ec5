//! Payment signature verification.
//!
//! The gateway proves a payment completion by signing
//! `order_id|payment_id` with the shared key secret. Verification
//! recomputes the HMAC-SHA256 and compares against the claimed hex
//! signature in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Recomputes and checks gateway payment signatures.
#[derive(Clone)]
pub struct PaymentVerifier {
    secret: String,
}

impl PaymentVerifier {
    /// Creates a verifier for the given shared secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self, order_id: &str, payment_id: &str) -> HmacSha256 {
        // An HMAC key can be of any length, so new_from_slice cannot fail.
        #[allow(clippy::unwrap_used)]
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes()).unwrap();
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        mac
    }

    /// Hex signature the gateway is expected to produce for this
    /// order/payment pair. Exposed for tests and tooling.
    #[must_use]
    pub fn expected_signature(&self, order_id: &str, payment_id: &str) -> String {
        hex::encode(self.mac(order_id, payment_id).finalize().into_bytes())
    }

    /// Whether `signature` (hex) matches the recomputed HMAC. Comparison
    /// is constant-time via the Mac's own verification.
    #[must_use]
    pub fn verify(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        let Ok(claimed) = hex::decode(signature) else {
            return false;
        };
        self.mac(order_id, payment_id).verify_slice(&claimed).is_ok()
    }
}
