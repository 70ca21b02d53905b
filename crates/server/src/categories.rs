//! Category API endpoints

use api_types::category::CategoryUpsert;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::Category;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

/// Handle requests for adding an expense category to an event.
pub async fn create(
    State(state): State<ServerState>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<CategoryUpsert>,
) -> Result<Json<Category>, ServerError> {
    let category = state
        .engine
        .add_category(
            event_id,
            payload.name.resolve(),
            payload.subcategory.as_deref(),
            payload.amount,
        )
        .await?;
    Ok(Json(category))
}

/// Handle requests for updating a category.
pub async fn update(
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<CategoryUpsert>,
) -> Result<Json<Category>, ServerError> {
    let category = state
        .engine
        .update_category(
            category_id,
            payload.name.resolve(),
            payload.subcategory.as_deref(),
            payload.amount,
        )
        .await?;
    Ok(Json(category))
}

/// Handle requests for deleting a category.
pub async fn remove(
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
