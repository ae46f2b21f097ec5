//! `PostgreSQL`-backed storage using JSONB documents.
//!
//! Events and registrations are stored as full domain documents in a
//! `data` JSONB column. Registrations additionally carry `event_id`,
//! `team_name` and `is_leader` columns for indexing and for the partial
//! unique index that enforces one leader per (event, team name) pair.

use crate::error::{RegistryError, Result};
use crate::store::{EventRepository, RegistrationRepository};
use crate::types::{
    EventId, FestEvent, Registration, RegistrationId, RegistrationRef, RegistrationStatus,
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

/// `PostgreSQL` store implementing both repositories over one pool.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    ///
    /// # Errors
    ///
    /// Returns error if migrations fail.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RegistryError::Database(format!("Migration failed: {e}")))?;
        Ok(())
    }
}

fn decode_event(json: sqlx::types::JsonValue) -> Result<FestEvent> {
    serde_json::from_value(json)
        .map_err(|e| RegistryError::Database(format!("Failed to decode event document: {e}")))
}

fn decode_registration(json: sqlx::types::JsonValue) -> Result<Registration> {
    serde_json::from_value(json).map_err(|e| {
        RegistryError::Database(format!("Failed to decode registration document: {e}"))
    })
}

fn encode<T: serde::Serialize>(value: &T) -> Result<sqlx::types::JsonValue> {
    serde_json::to_value(value)
        .map_err(|e| RegistryError::Database(format!("Failed to encode document: {e}")))
}

/// Maps a unique-index violation on the team-leader index to a client
/// error; everything else surfaces as a database fault.
fn map_insert_error(err: sqlx::Error) -> RegistryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return RegistryError::InvalidRequest(
                "Team name already registered for this event".to_string(),
            );
        }
    }
    RegistryError::Database(format!("Insert failed: {err}"))
}

#[async_trait]
impl EventRepository for PostgresStore {
    async fn create_event(&self, event: &FestEvent) -> Result<FestEvent> {
        let json = encode(event)?;
        sqlx::query("INSERT INTO events (id, data, created_at) VALUES ($1, $2, $3)")
            .bind(event.id.as_uuid())
            .bind(&json)
            .bind(event.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| RegistryError::Database(format!("Failed to insert event: {e}")))?;
        Ok(event.clone())
    }

    async fn get_event(&self, id: EventId) -> Result<Option<FestEvent>> {
        let row: Option<(sqlx::types::JsonValue,)> =
            sqlx::query_as("SELECT data FROM events WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RegistryError::Database(format!("Failed to get event: {e}")))?;

        row.map(|(json,)| decode_event(json)).transpose()
    }

    async fn list_events(&self) -> Result<Vec<FestEvent>> {
        let rows: Vec<(sqlx::types::JsonValue,)> =
            sqlx::query_as("SELECT data FROM events ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RegistryError::Database(format!("Failed to list events: {e}")))?;

        rows.into_iter().map(|(json,)| decode_event(json)).collect()
    }
}

#[async_trait]
impl RegistrationRepository for PostgresStore {
    async fn create_linked(
        &self,
        event_id: EventId,
        entries: Vec<Registration>,
    ) -> Result<Vec<Registration>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RegistryError::Database(format!("Failed to begin transaction: {e}")))?;

        for entry in &entries {
            let json = encode(entry)?;
            sqlx::query(
                "INSERT INTO registrations (id, event_id, team_name, is_leader, data, created_at)
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(entry.id.as_uuid())
            .bind(event_id.as_uuid())
            .bind(entry.team_name.as_deref())
            .bind(entry.is_leader)
            .bind(&json)
            .bind(entry.created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_insert_error)?;
        }

        // Append one reference per entry into the event document's
        // embedded registration list. `||` appends, never rewrites.
        let refs: Vec<RegistrationRef> = entries
            .iter()
            .map(|entry| RegistrationRef {
                registration_id: entry.id,
                registered_at: Utc::now(),
                status: RegistrationStatus::Pending,
            })
            .collect();
        let refs_json = encode(&refs)?;

        let patched = sqlx::query(
            "UPDATE events
             SET data = jsonb_set(data, '{registrations}',
                                  COALESCE(data->'registrations', '[]'::jsonb) || $2)
             WHERE id = $1",
        )
        .bind(event_id.as_uuid())
        .bind(&refs_json)
        .execute(&mut *tx)
        .await
        .map_err(|e| RegistryError::Database(format!("Failed to patch event: {e}")))?;

        if patched.rows_affected() == 0 {
            return Err(RegistryError::EventNotFound);
        }

        tx.commit()
            .await
            .map_err(|e| RegistryError::Database(format!("Failed to commit: {e}")))?;

        Ok(entries)
    }

    async fn get(&self, id: RegistrationId) -> Result<Option<Registration>> {
        let row: Option<(sqlx::types::JsonValue,)> =
            sqlx::query_as("SELECT data FROM registrations WHERE id = $1")
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    RegistryError::Database(format!("Failed to get registration: {e}"))
                })?;

        row.map(|(json,)| decode_registration(json)).transpose()
    }

    async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Registration>> {
        let rows: Vec<(sqlx::types::JsonValue,)> = sqlx::query_as(
            "SELECT data FROM registrations WHERE event_id = $1 ORDER BY created_at ASC",
        )
        .bind(event_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RegistryError::Database(format!("Failed to list registrations: {e}")))?;

        rows.into_iter()
            .map(|(json,)| decode_registration(json))
            .collect()
    }

    async fn update_status(
        &self,
        id: RegistrationId,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>> {
        let row: Option<(sqlx::types::JsonValue,)> = sqlx::query_as(
            "UPDATE registrations
             SET data = jsonb_set(data, '{status}', to_jsonb($2::text))
             WHERE id = $1
             RETURNING data",
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RegistryError::Database(format!("Failed to update status: {e}")))?;

        row.map(|(json,)| decode_registration(json)).transpose()
    }

    async fn record_payment(
        &self,
        id: RegistrationId,
        order_id: &str,
        payment_id: &str,
    ) -> Result<Option<Registration>> {
        // First successful verification wins: the guard on paymentStatus
        // makes repeat verification a no-op at the storage level too.
        let row: Option<(sqlx::types::JsonValue,)> = sqlx::query_as(
            "UPDATE registrations
             SET data = data || jsonb_build_object(
                 'paymentStatus', 'completed',
                 'orderId', $2::text,
                 'paymentId', $3::text)
             WHERE id = $1 AND data->>'paymentStatus' <> 'completed'
             RETURNING data",
        )
        .bind(id.as_uuid())
        .bind(order_id)
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RegistryError::Database(format!("Failed to record payment: {e}")))?;

        match row {
            Some((json,)) => Ok(Some(decode_registration(json)?)),
            // Guard skipped the update: either unknown ID or already
            // completed. Return whatever is stored.
            None => self.get(id).await,
        }
    }

    async fn team_exists(&self, event_id: EventId, team_name: &str) -> Result<bool> {
        let row: Option<(i32,)> = sqlx::query_as(
            "SELECT 1 FROM registrations WHERE event_id = $1 AND team_name = $2 LIMIT 1",
        )
        .bind(event_id.as_uuid())
        .bind(team_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RegistryError::Database(format!("Failed to check team name: {e}")))?;

        Ok(row.is_some())
    }
}
