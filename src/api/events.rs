//! Event catalog endpoints.
//!
//! - `POST /events` - create an event definition (admin)
//! - `GET /events` - list events
//! - `GET /events/:id` - get one event

use crate::auth::RequireAdmin;
use crate::error::AppError;
use crate::server::AppState;
use crate::types::{EventId, EventKind, FestEvent};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Request to create a new event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
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
    /// Fee per head in whole currency units.
    pub fee: i64,
    /// Individual or group event.
    pub kind: EventKind,
    /// Maximum team members, excluding the leader.
    #[serde(default)]
    pub max_team_size: u32,
}

/// Create a new event definition.
pub async fn create_event(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<FestEvent>), AppError> {
    if request.fee < 0 {
        return Err(AppError::bad_request("Fee cannot be negative"));
    }

    let event = FestEvent {
        id: EventId::new(),
        title: request.title,
        description: request.description,
        venue: request.venue,
        starts_at: request.starts_at,
        ends_at: request.ends_at,
        fee: request.fee,
        kind: request.kind,
        max_team_size: request.max_team_size,
        registrations: Vec::new(),
        created_at: Utc::now(),
    };

    let created = state.events.create_event(&event).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List all events, newest first.
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<FestEvent>>, AppError> {
    Ok(Json(state.events.list_events().await?))
}

/// Get one event by ID.
pub async fn get_event(
    Path(event_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<FestEvent>, AppError> {
    let event = state
        .events
        .get_event(EventId(event_id))
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;
    Ok(Json(event))
}
