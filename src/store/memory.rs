//! In-memory store for tests and local development.
//!
//! Mirrors the Postgres behavior, including the leader-uniqueness
//! constraint and the all-or-nothing semantics of
//! [`RegistrationRepository::create_linked`].

use crate::error::{RegistryError, Result};
use crate::store::{EventRepository, RegistrationRepository};
use crate::types::{
    EventId, FestEvent, PaymentStatus, Registration, RegistrationId, RegistrationRef,
    RegistrationStatus,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    events: HashMap<EventId, FestEvent>,
    registrations: HashMap<RegistrationId, Registration>,
}

/// In-memory implementation of both repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| RegistryError::Database("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn create_event(&self, event: &FestEvent) -> Result<FestEvent> {
        let mut inner = self.lock()?;
        inner.events.insert(event.id, event.clone());
        Ok(event.clone())
    }

    async fn get_event(&self, id: EventId) -> Result<Option<FestEvent>> {
        Ok(self.lock()?.events.get(&id).cloned())
    }

    async fn list_events(&self) -> Result<Vec<FestEvent>> {
        let mut events: Vec<FestEvent> = self.lock()?.events.values().cloned().collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(events)
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryStore {
    async fn create_linked(
        &self,
        event_id: EventId,
        entries: Vec<Registration>,
    ) -> Result<Vec<Registration>> {
        let mut inner = self.lock()?;

        if !inner.events.contains_key(&event_id) {
            return Err(RegistryError::EventNotFound);
        }

        // Backstop mirroring the partial unique index: a second leader for
        // the same (event, team name) pair fails the whole batch.
        for entry in &entries {
            if let (true, Some(team)) = (entry.is_leader, entry.team_name.as_deref()) {
                let taken = inner.registrations.values().any(|existing| {
                    existing.event_id == event_id
                        && existing.is_leader
                        && existing.team_name.as_deref() == Some(team)
                });
                if taken {
                    return Err(RegistryError::InvalidRequest(
                        "Team name already registered for this event".to_string(),
                    ));
                }
            }
        }

        for entry in &entries {
            inner.registrations.insert(entry.id, entry.clone());
        }

        if let Some(event) = inner.events.get_mut(&event_id) {
            for entry in &entries {
                event.registrations.push(RegistrationRef {
                    registration_id: entry.id,
                    registered_at: Utc::now(),
                    status: RegistrationStatus::Pending,
                });
            }
        }

        Ok(entries)
    }

    async fn get(&self, id: RegistrationId) -> Result<Option<Registration>> {
        Ok(self.lock()?.registrations.get(&id).cloned())
    }

    async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Registration>> {
        let mut entries: Vec<Registration> = self
            .lock()?
            .registrations
            .values()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(entries)
    }

    async fn update_status(
        &self,
        id: RegistrationId,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>> {
        let mut inner = self.lock()?;
        Ok(inner.registrations.get_mut(&id).map(|entry| {
            entry.status = status;
            entry.clone()
        }))
    }

    async fn record_payment(
        &self,
        id: RegistrationId,
        order_id: &str,
        payment_id: &str,
    ) -> Result<Option<Registration>> {
        let mut inner = self.lock()?;
        Ok(inner.registrations.get_mut(&id).map(|entry| {
            if entry.payment_status != PaymentStatus::Completed {
                entry.payment_status = PaymentStatus::Completed;
                entry.order_id = Some(order_id.to_string());
                entry.payment_id = Some(payment_id.to_string());
            }
            entry.clone()
        }))
    }

    async fn team_exists(&self, event_id: EventId, team_name: &str) -> Result<bool> {
        Ok(self.lock()?.registrations.values().any(|r| {
            r.event_id == event_id && r.team_name.as_deref() == Some(team_name)
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{EventKind, Participant};

    fn sample_event(kind: EventKind) -> FestEvent {
        FestEvent {
            id: EventId::new(),
            title: "Code Sprint".to_string(),
            description: "24h hackathon".to_string(),
            venue: "Main Block".to_string(),
            starts_at: Utc::now(),
            ends_at: Utc::now(),
            fee: 49,
            kind,
            max_team_size: 3,
            registrations: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn participant(name: &str) -> Participant {
        Participant {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            registration_no: "21BCE1001".to_string(),
            mobile_no: "9876543210".to_string(),
            semester: "5".to_string(),
        }
    }

    #[tokio::test]
    async fn create_linked_appends_refs_to_event() {
        let store = InMemoryStore::new();
        let event = sample_event(EventKind::Group);
        store.create_event(&event).await.unwrap();

        let entries = vec![
            Registration::new(event.id, participant("Asha"), Some("A".to_string()), true),
            Registration::new(event.id, participant("Dev"), Some("A".to_string()), false),
        ];
        store.create_linked(event.id, entries).await.unwrap();

        let stored = store.get_event(event.id).await.unwrap().unwrap();
        assert_eq!(stored.registrations.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_team_leader_is_rejected() {
        let store = InMemoryStore::new();
        let event = sample_event(EventKind::Group);
        store.create_event(&event).await.unwrap();

        let first = vec![Registration::new(
            event.id,
            participant("Asha"),
            Some("A".to_string()),
            true,
        )];
        store.create_linked(event.id, first).await.unwrap();

        let second = vec![Registration::new(
            event.id,
            participant("Dev"),
            Some("A".to_string()),
            true,
        )];
        let err = store.create_linked(event.id, second).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn record_payment_is_first_write_wins() {
        let store = InMemoryStore::new();
        let event = sample_event(EventKind::Individual);
        store.create_event(&event).await.unwrap();

        let entry = Registration::new(event.id, participant("Asha"), None, false);
        let id = entry.id;
        store.create_linked(event.id, vec![entry]).await.unwrap();

        store
            .record_payment(id, "order_1", "pay_1")
            .await
            .unwrap()
            .unwrap();
        let after = store
            .record_payment(id, "order_2", "pay_2")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(after.order_id.as_deref(), Some("order_1"));
        assert_eq!(after.payment_id.as_deref(), Some("pay_1"));
    }
}
