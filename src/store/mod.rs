//! Storage abstractions for the event catalog and registration ledger.
//!
//! Two repository traits sit at the storage seam: [`EventRepository`] for
//! the event catalog and [`RegistrationRepository`] for the ledger. The
//! Postgres implementations store full domain documents as JSONB; the
//! in-memory implementations back the test suites.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

use crate::error::Result;
use crate::types::{
    EventId, FestEvent, Registration, RegistrationId, RegistrationStatus,
};
use async_trait::async_trait;

/// Event catalog storage.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a new event definition.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    async fn create_event(&self, event: &FestEvent) -> Result<FestEvent>;

    /// Fetch an event by ID, or `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn get_event(&self, id: EventId) -> Result<Option<FestEvent>>;

    /// List all events, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_events(&self) -> Result<Vec<FestEvent>>;
}

/// Registration ledger storage.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert a batch of ledger entries and append a matching reference
    /// for each into the owning event's embedded registration list, as one
    /// atomic unit: either every entry lands and the event is patched, or
    /// nothing is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::RegistryError::InvalidRequest`] if a team
    /// leader entry collides with an existing leader for the same
    /// (event, team name) pair, or a database error on other failures.
    async fn create_linked(
        &self,
        event_id: EventId,
        entries: Vec<Registration>,
    ) -> Result<Vec<Registration>>;

    /// Fetch a ledger entry by ID, or `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn get(&self, id: RegistrationId) -> Result<Option<Registration>>;

    /// List all ledger entries for an event, oldest first.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Registration>>;

    /// Set the lifecycle status of an entry. Returns the updated entry, or
    /// `None` if the ID is unknown.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    async fn update_status(
        &self,
        id: RegistrationId,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>>;

    /// Record a verified payment: sets payment status to `completed` and
    /// stores both gateway references together. First successful
    /// verification wins; an already-completed entry is left untouched.
    /// Returns the entry as stored afterwards, or `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails.
    async fn record_payment(
        &self,
        id: RegistrationId,
        order_id: &str,
        payment_id: &str,
    ) -> Result<Option<Registration>>;

    /// Whether any ledger entry already uses `team_name` for `event_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn team_exists(&self, event_id: EventId, team_name: &str) -> Result<bool>;
}
