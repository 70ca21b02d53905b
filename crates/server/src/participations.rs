//! Participation API endpoints

use api_types::participation::ParticipationSet;
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

/// Handle requests for toggling one participation flag.
pub async fn set(
    State(state): State<ServerState>,
    Json(payload): Json<ParticipationSet>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .set_participation(
            payload.attendee_id,
            payload.category_id,
            payload.participates,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
