//! Router configuration.

use super::health::{health_check, readiness_check};
use super::state::AppState;
use crate::api::{events, payments, registrations};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the complete Axum router.
///
/// Routes:
/// - Health checks
/// - Event catalog endpoints
/// - Registration endpoints (team, individual, listing, status)
/// - Payment endpoints (order creation, verification)
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health checks (no authentication)
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Event catalog
        .route("/events", post(events::create_event).get(events::list_events))
        .route("/events/:id", get(events::get_event))
        // Registrations
        .route("/registrations", post(registrations::register_individual))
        .route("/registrations/group", post(registrations::register_team))
        .route(
            "/registrations/event/:event_id",
            get(registrations::list_for_event),
        )
        .route(
            "/registrations/:id",
            get(registrations::get_registration).patch(registrations::update_status),
        )
        // Payments
        .route("/payments/create-order", post(payments::create_order))
        .route("/payments/verify", post(payments::verify_payment))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
