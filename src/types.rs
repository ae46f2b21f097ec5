//! Core domain types for the fest registration system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a fest event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Creates a new random event ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a registration ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(pub Uuid);

impl RegistrationId {
    /// Creates a new random registration ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Enumerations
// ============================================================================

/// Business-level registration approval state, independent of payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Awaiting admin review.
    Pending,
    /// Approved by an admin.
    Confirmed,
    /// Cancelled by an admin.
    Cancelled,
}

impl RegistrationStatus {
    /// Returns the lowercase wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses the lowercase wire representation.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Payment state of a ledger entry.
///
/// The canonical vocabulary is `pending | completed | failed`. The legacy
/// system also emitted a `"paid"` literal at the verification endpoint;
/// that alias is not part of the wire contract here (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No successful payment has been verified yet.
    Pending,
    /// A gateway payment was verified against this entry.
    Completed,
    /// A payment attempt failed.
    Failed,
}

impl PaymentStatus {
    /// Returns the lowercase wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Whether an event accepts individual or team registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// One ledger entry per registration call.
    Individual,
    /// Leader plus members, registered as a unit.
    Group,
}

// ============================================================================
// Documents
// ============================================================================

/// Identity payload for one registrant.
///
/// Field names match the client payload (snake case), and the struct is
/// flattened into [`Registration`] so the stored document is flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Full name.
    pub name: String,
    /// Email address (format-validated before insertion).
    pub email: String,
    /// College registration number.
    pub registration_no: String,
    /// Mobile number: 10 digits, or 11-12 digits with a country prefix.
    pub mobile_no: String,
    /// Current semester.
    pub semester: String,
}

/// One registration ledger entry: one person at one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Ledger entry ID.
    pub id: RegistrationId,
    /// Owning event (guaranteed to exist at creation time).
    pub event_id: EventId,
    /// Registrant identity.
    #[serde(flatten)]
    pub participant: Participant,
    /// Team name; absent for individual registrations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    /// Whether this entry is the team leader. Meaningful only with a team.
    pub is_leader: bool,
    /// Lifecycle status.
    pub status: RegistrationStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Gateway order ID, set together with `payment_id` on verification.
    pub order_id: Option<String>,
    /// Gateway payment ID, set together with `order_id` on verification.
    pub payment_id: Option<String>,
    /// Immutable creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// Creates a pending entry for `participant` at `event_id`.
    #[must_use]
    pub fn new(
        event_id: EventId,
        participant: Participant,
        team_name: Option<String>,
        is_leader: bool,
    ) -> Self {
        Self {
            id: RegistrationId::new(),
            event_id,
            participant,
            team_name,
            is_leader,
            status: RegistrationStatus::Pending,
            payment_status: PaymentStatus::Pending,
            order_id: None,
            payment_id: None,
            created_at: Utc::now(),
        }
    }
}

/// Reference to a ledger entry embedded in the owning event document.
///
/// The event's `registrations` array is the only place the event
/// aggregates its registrations; it is appended to, never rewritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRef {
    /// The referenced ledger entry.
    pub registration_id: RegistrationId,
    /// When the entry was linked.
    pub registered_at: DateTime<Utc>,
    /// Lifecycle status at link time (always `pending`).
    pub status: RegistrationStatus,
}

/// Event catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FestEvent {
    /// Event ID.
    pub id: EventId,
    /// Event title.
    pub title: String,
    /// Event description.
    pub description: String,
    /// Venue name.
    pub venue: String,
    /// Scheduled start.
    pub starts_at: DateTime<Utc>,
    /// Scheduled end.
    pub ends_at: DateTime<Utc>,
    /// Registration fee per head, in whole currency units. 0 = free.
    pub fee: i64,
    /// Individual or group event.
    pub kind: EventKind,
    /// Maximum team members, excluding the leader. Only meaningful for
    /// group events.
    pub max_team_size: u32,
    /// Embedded, monotonically growing registration list.
    #[serde(default)]
    pub registrations: Vec<RegistrationRef>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn registration_serializes_camel_case_with_flat_participant() {
        let registration = Registration::new(
            EventId::new(),
            Participant {
                name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
                registration_no: "21BCE1001".to_string(),
                mobile_no: "9876543210".to_string(),
                semester: "5".to_string(),
            },
            Some("Null Pointers".to_string()),
            true,
        );

        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["teamName"], "Null Pointers");
        assert_eq!(json["isLeader"], true);
        assert_eq!(json["paymentStatus"], "pending");
        assert_eq!(json["status"], "pending");
        // Participant fields stay flat and snake_case.
        assert_eq!(json["registration_no"], "21BCE1001");
        assert_eq!(json["mobile_no"], "9876543210");
    }

    #[test]
    fn registration_round_trips_through_json() {
        let registration = Registration::new(
            EventId::new(),
            Participant {
                name: "Dev Mehta".to_string(),
                email: "dev@example.com".to_string(),
                registration_no: "21BCE1002".to_string(),
                mobile_no: "919876543210".to_string(),
                semester: "3".to_string(),
            },
            None,
            false,
        );

        let json = serde_json::to_value(&registration).unwrap();
        let back: Registration = serde_json::from_value(json).unwrap();
        assert_eq!(back, registration);
        assert!(back.team_name.is_none());
    }

    #[test]
    fn status_parse_accepts_only_wire_values() {
        assert_eq!(
            RegistrationStatus::parse("confirmed"),
            Some(RegistrationStatus::Confirmed)
        );
        assert_eq!(RegistrationStatus::parse("Confirmed"), None);
        assert_eq!(RegistrationStatus::parse("paid"), None);
    }
}
