use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use crate::{attendees, categories, events, participations, reports};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/events", get(events::list).post(events::create))
        .route(
            "/events/{id}",
            get(events::get).put(events::update).delete(events::remove),
        )
        .route("/events/{id}/attendees", post(attendees::create))
        .route(
            "/attendees/{id}",
            axum::routing::put(attendees::update).delete(attendees::remove),
        )
        .route("/events/{id}/categories", post(categories::create))
        .route(
            "/categories/{id}",
            axum::routing::put(categories::update).delete(categories::remove),
        )
        .route("/participations", post(participations::set))
        .route("/events/{id}/calculate", get(reports::calculate))
        .route("/events/{id}/export", get(reports::export_summary))
        .route("/events/{id}/export/details", get(reports::export_details))
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
