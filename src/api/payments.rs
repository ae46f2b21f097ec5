//! Payment endpoints.
//!
//! - `POST /payments/create-order` - mint a gateway order
//! - `POST /payments/verify` - verify a signed payment completion
//!
//! Error bodies on these endpoints carry the
//! `{"success": false, "message": ...}` shape; existing clients depend
//! on it.

use crate::error::AppError;
use crate::server::AppState;
use crate::types::RegistrationId;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Maps a body-extraction rejection into the payment error shape, so a
/// malformed body gets the same `{"success": false, ...}` envelope as
/// every other payment failure.
fn payment_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<Json<T>, AppError> {
    payload.map_err(|rejection| {
        AppError::new(rejection.status(), rejection.body_text()).payment_wire()
    })
}

/// Request to mint a gateway order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Event the payment is for. Required but not persisted here; the
    /// order is only linked to a registration at verification time.
    pub event_id: Option<Uuid>,
    /// Amount in whole currency units.
    pub amount: Option<i64>,
}

/// Response carrying the gateway's order object verbatim.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    /// Always true on the success path.
    pub success: bool,
    /// The gateway's order object.
    pub order: Value,
}

/// Request to verify a claimed payment completion.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    /// Gateway order ID.
    pub order_id: Option<String>,
    /// Gateway payment ID.
    pub payment_id: Option<String>,
    /// Hex HMAC-SHA256 signature over `orderId|paymentId`.
    pub signature: Option<String>,
    /// Event the payment is for.
    pub event_id: Option<Uuid>,
    /// Ledger entry to reconcile.
    pub registration_id: Option<Uuid>,
}

/// Verification outcome.
#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
}

/// Mint a gateway order for `amount × 100` minor units of INR.
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>, AppError> {
    let Json(request) = payment_body(payload)?;
    if request.event_id.is_none() {
        return Err(AppError::bad_request("eventId is required").payment_wire());
    }
    let Some(amount) = request.amount else {
        return Err(AppError::bad_request("amount is required").payment_wire());
    };

    let order = state
        .payments
        .create_order(amount)
        .await
        .map_err(|e| AppError::from(e).payment_wire())?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order,
    }))
}

/// Verify a signed payment completion and reconcile the ledger entry.
pub async fn verify_payment(
    State(state): State<AppState>,
    payload: Result<Json<VerifyPaymentRequest>, JsonRejection>,
) -> Result<Json<VerifyPaymentResponse>, AppError> {
    let Json(request) = payment_body(payload)?;
    let (Some(order_id), Some(payment_id), Some(signature), Some(_event_id), Some(registration_id)) = (
        request.order_id,
        request.payment_id,
        request.signature,
        request.event_id,
        request.registration_id,
    ) else {
        return Err(AppError::bad_request("Missing required payment fields").payment_wire());
    };

    let message = state
        .payments
        .verify_and_reconcile(
            &order_id,
            &payment_id,
            &signature,
            RegistrationId(registration_id),
        )
        .await
        .map_err(|e| AppError::from(e).payment_wire())?;

    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: message.to_string(),
    }))
}
