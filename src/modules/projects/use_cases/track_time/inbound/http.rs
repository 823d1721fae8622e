use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::modules::projects::core::project::ProjectId;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects/{id}/timer/start", post(start))
        .route("/projects/{id}/timer/stop", post(stop))
}

pub async fn start(State(state): State<AppState>, Path(id): Path<ProjectId>) -> impl IntoResponse {
    match state.time_tracker.start_timer(id).await {
        Ok(Some(project)) => Json(project).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, format!("project {id} not found")),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

pub async fn stop(State(state): State<AppState>, Path(id): Path<ProjectId>) -> impl IntoResponse {
    match state.time_tracker.stop_timer(id).await {
        Ok(Some(project)) => Json(project).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, format!("project {id} not found")),
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}
