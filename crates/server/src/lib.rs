use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{run, run_with_listener};

mod attendees;
mod categories;
mod events;
mod participations;
mod reports;
mod server;

pub mod types {
    pub mod event {
        pub use api_types::event::{EventNew, EventUpdate};
        pub use engine::{Event, EventSnapshot};
    }

    pub mod attendee {
        pub use api_types::attendee::AttendeeUpsert;
        pub use engine::Attendee;
    }

    pub mod category {
        pub use api_types::category::{CategoryName, CategoryUpsert, PredefinedCategory};
        pub use engine::Category;
    }

    pub mod participation {
        pub use api_types::participation::ParticipationSet;
    }

    pub mod report {
        pub use api_types::report::{CalculateQuery, CategoryKeyParam, StrategyParam};
        pub use engine::EventReport;
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_) | EngineError::InvalidName(_) | EngineError::InvalidId(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
