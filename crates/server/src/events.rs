//! Event API endpoints

use api_types::event::{EventNew, EventUpdate};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Event, EventSnapshot};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

/// Handle requests for listing events, newest first.
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Event>>, ServerError> {
    let events = state.engine.list_events().await?;
    Ok(Json(events))
}

/// Handle requests for creating a new event.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventNew>,
) -> Result<Json<Event>, ServerError> {
    let event = state
        .engine
        .new_event(&payload.name, payload.event_date)
        .await?;
    Ok(Json(event))
}

/// Handle requests for the full event aggregate.
pub async fn get(
    State(state): State<ServerState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventSnapshot>, ServerError> {
    let snapshot = state.engine.event_snapshot(event_id).await?;
    Ok(Json(snapshot))
}

/// Handle requests for updating an event.
pub async fn update(
    State(state): State<ServerState>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<EventUpdate>,
) -> Result<Json<Event>, ServerError> {
    let event = state
        .engine
        .update_event(event_id, &payload.name, payload.event_date)
        .await?;
    Ok(Json(event))
}

/// Handle requests for deleting an event and everything it owns.
pub async fn remove(
    State(state): State<ServerState>,
    Path(event_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_event(event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
