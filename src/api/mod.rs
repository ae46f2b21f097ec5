//! HTTP API handlers.

pub mod events;
pub mod payments;
pub mod registrations;
