//! Attendee API endpoints

use api_types::attendee::AttendeeUpsert;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::Attendee;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

/// Handle requests for adding an attendee to an event.
pub async fn create(
    State(state): State<ServerState>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<AttendeeUpsert>,
) -> Result<Json<Attendee>, ServerError> {
    let attendee = state
        .engine
        .add_attendee(
            event_id,
            &payload.name,
            payload.contribution.unwrap_or_default(),
        )
        .await?;
    Ok(Json(attendee))
}

/// Handle requests for updating an attendee.
pub async fn update(
    State(state): State<ServerState>,
    Path(attendee_id): Path<Uuid>,
    Json(payload): Json<AttendeeUpsert>,
) -> Result<Json<Attendee>, ServerError> {
    let attendee = state
        .engine
        .update_attendee(
            attendee_id,
            &payload.name,
            payload.contribution.unwrap_or_default(),
        )
        .await?;
    Ok(Json(attendee))
}

/// Handle requests for deleting an attendee.
pub async fn remove(
    State(state): State<ServerState>,
    Path(attendee_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_attendee(attendee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
