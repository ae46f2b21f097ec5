//! Fest registration backend - event registration and payment reconciliation
//! for a college technical fest.
//!
//! The service exposes a small JSON API over a document-style Postgres
//! store:
//!
//! - **Registration ledger**: one record per registrant (individual or team
//!   member), carrying lifecycle and payment state.
//! - **Team registration orchestrator**: creates a full team's worth of
//!   ledger entries in one transaction and links them back into the owning
//!   event's embedded registration list.
//! - **Payment verification**: recomputes the gateway's HMAC-SHA256
//!   signature over `order_id|payment_id` and reconciles the ledger entry.
//! - **Query/status API**: grouped listings and lifecycle status updates
//!   for admins, single-entry reads for participants.
//!
//! # Flow
//!
//! ```text
//! Client ──▶ POST /registrations/group ──▶ ledger inserts + event append
//!    │
//!    ├──▶ POST /payments/create-order ──▶ gateway mints order (no persistence)
//!    │         (client completes payment in the gateway UI)
//!    │
//!    └──▶ POST /payments/verify ──▶ HMAC check ──▶ ledger payment update
//! ```
//!
//! Authorization is an external concern: the fronting auth layer tags each
//! request with the caller's role, and the [`auth`] extractors only read
//! that tag.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod payment;
pub mod registration;
pub mod server;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::{AppError, RegistryError};
pub use payment::{PaymentGateway, PaymentService, PaymentVerifier};
pub use registration::RegistrationService;
pub use server::{build_router, AppState};
pub use types::*;
