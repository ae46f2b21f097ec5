//! Registration orchestration and query surface.
//!
//! [`RegistrationService`] is the write/read core of the system: it
//! validates registration requests against the event catalog, creates
//! ledger entries through the repository seam, and serves the grouped
//! listing used by the admin back office.

pub mod query;
pub mod validate;

use crate::error::{RegistryError, Result};
use crate::store::{EventRepository, RegistrationRepository};
use crate::types::{
    EventId, EventKind, Participant, Registration, RegistrationId, RegistrationStatus,
};
use std::sync::Arc;

/// A validated team registration request.
#[derive(Debug, Clone)]
pub struct TeamSignup {
    /// Owning event.
    pub event_id: EventId,
    /// Team name (unique per event).
    pub team_name: String,
    /// Team leader identity.
    pub leader: Participant,
    /// Additional members, excluding the leader.
    pub members: Vec<Participant>,
}

/// Outcome of a team registration: the created ledger entries plus the
/// total fee for downstream payment initiation. The fee is returned to
/// the caller, never persisted on the entries themselves.
#[derive(Debug, Clone)]
pub struct TeamSignupOutcome {
    /// Created entries: leader first, then members.
    pub registrations: Vec<Registration>,
    /// `event.fee × (members + 1)`.
    pub total_fee: i64,
}

/// Registration service over the event catalog and ledger repositories.
pub struct RegistrationService {
    events: Arc<dyn EventRepository>,
    registrations: Arc<dyn RegistrationRepository>,
}

impl RegistrationService {
    /// Creates a new service over the given repositories.
    #[must_use]
    pub fn new(
        events: Arc<dyn EventRepository>,
        registrations: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self {
            events,
            registrations,
        }
    }

    /// Register a full team for a group event.
    ///
    /// Preconditions are evaluated in order, first failure wins:
    /// event exists, event is a group event, member count (excluding the
    /// leader) within `[2, max_team_size]`, identity payloads well formed,
    /// team name unused for this event. The leader entry and every member
    /// entry are inserted and linked into the event document as one atomic
    /// unit.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EventNotFound`] for an unknown event,
    /// [`RegistryError::InvalidRequest`] for any failed precondition, or a
    /// database error.
    pub async fn register_team(&self, signup: TeamSignup) -> Result<TeamSignupOutcome> {
        let event = self
            .events
            .get_event(signup.event_id)
            .await?
            .ok_or(RegistryError::EventNotFound)?;

        if event.kind != EventKind::Group {
            return Err(RegistryError::InvalidRequest(
                "This event does not accept team registrations".to_string(),
            ));
        }

        let member_count = signup.members.len();
        if member_count < 2 {
            return Err(RegistryError::InvalidRequest(
                "At least 2 team members are required".to_string(),
            ));
        }
        if member_count > event.max_team_size as usize {
            return Err(RegistryError::InvalidRequest(format!(
                "Team size exceeds the maximum of {} members for this event",
                event.max_team_size
            )));
        }

        validate::validate_participant(&signup.leader)?;
        for member in &signup.members {
            validate::validate_participant(member)?;
        }

        if self
            .registrations
            .team_exists(signup.event_id, &signup.team_name)
            .await?
        {
            return Err(RegistryError::InvalidRequest(
                "Team name already registered for this event".to_string(),
            ));
        }

        let mut entries = Vec::with_capacity(member_count + 1);
        entries.push(Registration::new(
            event.id,
            signup.leader,
            Some(signup.team_name.clone()),
            true,
        ));
        for member in signup.members {
            entries.push(Registration::new(
                event.id,
                member,
                Some(signup.team_name.clone()),
                false,
            ));
        }

        let registrations = self.registrations.create_linked(event.id, entries).await?;

        // Total head-count is members plus the leader.
        #[allow(clippy::cast_possible_wrap)]
        let total_fee = event.fee * (member_count as i64 + 1);

        tracing::info!(
            event_id = %event.id,
            team = %signup.team_name,
            head_count = registrations.len(),
            total_fee,
            "Team registered"
        );

        Ok(TeamSignupOutcome {
            registrations,
            total_fee,
        })
    }

    /// Register one participant for an individual event.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EventNotFound`] for an unknown event,
    /// [`RegistryError::InvalidRequest`] for a group event or a malformed
    /// payload, or a database error.
    pub async fn register_individual(
        &self,
        event_id: EventId,
        participant: Participant,
    ) -> Result<(Registration, i64)> {
        let event = self
            .events
            .get_event(event_id)
            .await?
            .ok_or(RegistryError::EventNotFound)?;

        if event.kind != EventKind::Individual {
            return Err(RegistryError::InvalidRequest(
                "This event only accepts team registrations".to_string(),
            ));
        }

        validate::validate_participant(&participant)?;

        let entry = Registration::new(event.id, participant, None, false);
        let mut created = self.registrations.create_linked(event.id, vec![entry]).await?;
        let registration = created
            .pop()
            .ok_or_else(|| RegistryError::Database("insert returned no entry".to_string()))?;

        tracing::info!(
            event_id = %event.id,
            registration_id = %registration.id,
            "Individual registered"
        );

        Ok((registration, event.fee))
    }

    /// Grouped listing of every registration for an event, keyed
    /// `individuals` plus one key per team name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EventNotFound`] for an unknown event, or a
    /// database error.
    pub async fn list_grouped(&self, event_id: EventId) -> Result<serde_json::Value> {
        let event = self
            .events
            .get_event(event_id)
            .await?
            .ok_or(RegistryError::EventNotFound)?;

        let entries = self.registrations.list_by_event(event_id).await?;
        Ok(query::group_registrations(&event, entries))
    }

    /// Fetch one ledger entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RegistrationNotFound`] for an unknown ID,
    /// or a database error.
    pub async fn get(&self, id: RegistrationId) -> Result<Registration> {
        self.registrations
            .get(id)
            .await?
            .ok_or(RegistryError::RegistrationNotFound)
    }

    /// Set the lifecycle status of one ledger entry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RegistrationNotFound`] for an unknown ID,
    /// or a database error.
    pub async fn update_status(
        &self,
        id: RegistrationId,
        status: RegistrationStatus,
    ) -> Result<Registration> {
        let updated = self
            .registrations
            .update_status(id, status)
            .await?
            .ok_or(RegistryError::RegistrationNotFound)?;

        tracing::info!(registration_id = %id, status = status.as_str(), "Status updated");
        Ok(updated)
    }
}
