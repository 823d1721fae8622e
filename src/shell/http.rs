use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::modules::projects::use_cases::project_lifecycle::inbound::http as lifecycle_http;
use crate::modules::projects::use_cases::track_time::inbound::http as track_time_http;
use crate::shell::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    if status.is_server_error() {
        tracing::error!(%status, "request failed");
    }
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn router(state: AppState) -> Router {
    lifecycle_http::routes()
        .merge(track_time_http::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
