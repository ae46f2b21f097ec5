//! Registration endpoints.
//!
//! - `POST /registrations/group` - register a full team
//! - `POST /registrations` - register one individual
//! - `GET /registrations/event/:eventId` - grouped listing (admin)
//! - `GET /registrations/:id` - single entry (authenticated)
//! - `PATCH /registrations/:id` - lifecycle status update (admin)
//!
//! Error bodies on these endpoints are the bare `{"message": ...}` shape;
//! existing clients depend on it.

use crate::auth::{AuthenticatedCaller, RequireAdmin};
use crate::error::AppError;
use crate::registration::TeamSignup;
use crate::server::AppState;
use crate::types::{EventId, Participant, Registration, RegistrationId, RegistrationStatus};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to register a team. Top-level fields are optional so missing
/// ones surface as a 400 with a named field rather than a generic
/// deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRegistrationRequest {
    /// Owning event.
    pub event_id: Option<Uuid>,
    /// Team name.
    pub team_name: Option<String>,
    /// Team leader identity.
    pub leader: Option<Participant>,
    /// Additional members, excluding the leader.
    #[serde(default)]
    pub team_members: Vec<Participant>,
}

/// Response after a team registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRegistrationResponse {
    /// Success message.
    pub message: String,
    /// Created entries: leader first, then members.
    pub registrations: Vec<Registration>,
    /// Total fee for downstream payment initiation.
    pub total_fee: i64,
}

/// Request to register one individual.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualRegistrationRequest {
    /// Owning event.
    pub event_id: Option<Uuid>,
    /// Registrant identity.
    pub participant: Option<Participant>,
}

/// Response after an individual registration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualRegistrationResponse {
    /// Success message.
    pub message: String,
    /// Created entry.
    pub registration: Registration,
    /// Event fee for downstream payment initiation.
    pub fee: i64,
}

/// Request to update a lifecycle status. The status arrives as a plain
/// string so unknown values produce a 400 with a message instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// One of `pending | confirmed | cancelled`.
    pub status: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Register a full team for a group event.
pub async fn register_team(
    State(state): State<AppState>,
    Json(request): Json<TeamRegistrationRequest>,
) -> Result<(StatusCode, Json<TeamRegistrationResponse>), AppError> {
    let event_id = request
        .event_id
        .ok_or_else(|| AppError::bad_request("eventId is required"))?;
    let team_name = request
        .team_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| AppError::bad_request("teamName is required"))?;
    let leader = request
        .leader
        .ok_or_else(|| AppError::bad_request("leader is required"))?;

    let outcome = state
        .registrations
        .register_team(TeamSignup {
            event_id: EventId(event_id),
            team_name,
            leader,
            members: request.team_members,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TeamRegistrationResponse {
            message: "Team registered successfully".to_string(),
            registrations: outcome.registrations,
            total_fee: outcome.total_fee,
        }),
    ))
}

/// Register one participant for an individual event.
pub async fn register_individual(
    State(state): State<AppState>,
    Json(request): Json<IndividualRegistrationRequest>,
) -> Result<(StatusCode, Json<IndividualRegistrationResponse>), AppError> {
    let event_id = request
        .event_id
        .ok_or_else(|| AppError::bad_request("eventId is required"))?;
    let participant = request
        .participant
        .ok_or_else(|| AppError::bad_request("participant is required"))?;

    let (registration, fee) = state
        .registrations
        .register_individual(EventId(event_id), participant)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(IndividualRegistrationResponse {
            message: "Registered successfully".to_string(),
            registration,
            fee,
        }),
    ))
}

/// Grouped listing of an event's registrations (admin only).
pub async fn list_for_event(
    _admin: RequireAdmin,
    Path(event_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let grouped = state.registrations.list_grouped(EventId(event_id)).await?;
    Ok(Json(grouped))
}

/// Single ledger entry read for any authenticated caller.
pub async fn get_registration(
    _caller: AuthenticatedCaller,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Registration>, AppError> {
    let entry = state.registrations.get(RegistrationId(id)).await?;
    Ok(Json(entry))
}

/// Lifecycle status update (admin only). Returns the updated entry.
pub async fn update_status(
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Registration>, AppError> {
    let status = request
        .status
        .as_deref()
        .and_then(RegistrationStatus::parse)
        .ok_or_else(|| {
            AppError::bad_request("status must be one of: pending, confirmed, cancelled")
        })?;

    let updated = state
        .registrations
        .update_status(RegistrationId(id), status)
        .await?;
    Ok(Json(updated))
}
