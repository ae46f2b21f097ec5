//! Application state shared across HTTP handlers.

use crate::payment::PaymentService;
use crate::registration::RegistrationService;
use crate::store::EventRepository;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via Arc) for each request.
#[derive(Clone)]
pub struct AppState {
    /// Event catalog storage, used directly by the event endpoints.
    pub events: Arc<dyn EventRepository>,
    /// Registration orchestration and query service.
    pub registrations: Arc<RegistrationService>,
    /// Order creation and payment reconciliation service.
    pub payments: Arc<PaymentService>,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(
        events: Arc<dyn EventRepository>,
        registrations: Arc<RegistrationService>,
        payments: Arc<PaymentService>,
    ) -> Self {
        Self {
            events,
            registrations,
            payments,
        }
    }
}
