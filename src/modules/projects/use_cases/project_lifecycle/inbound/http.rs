use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde::Deserialize;

use crate::modules::projects::adapters::outbound::project_repository::RepositoryError;
use crate::modules::projects::core::listing::ProjectQuery;
use crate::modules::projects::core::patch::{ProjectPatch, TaskPatch};
use crate::modules::projects::core::project::{Project, ProjectId};
use crate::modules::projects::core::task::TaskId;
use crate::modules::projects::use_cases::project_lifecycle::command::{ProjectDraft, TaskDraft};
use crate::modules::projects::use_cases::project_lifecycle::handler::LifecycleError;
use crate::shell::http::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct NoteBody {
    pub text: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/projects", get(list).post(create))
        .route("/projects/{id}", get(show).patch(update).delete(remove))
        .route("/projects/{id}/start", post(start))
        .route("/projects/{id}/complete", post(complete))
        .route("/projects/{id}/tasks", post(add_task))
        .route("/projects/{id}/tasks/{task_id}", patch(update_task))
        .route("/projects/{id}/notes", post(add_note))
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> impl IntoResponse {
    match state.lifecycle.list(&query).await {
        Ok(summaries) => Json(summaries).into_response(),
        Err(err) => lifecycle_error(err),
    }
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ProjectDraft>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    match state.lifecycle.create_project(draft).await {
        Ok(project) => (StatusCode::CREATED, Json(project)).into_response(),
        Err(err) => lifecycle_error(err),
    }
}

pub async fn show(State(state): State<AppState>, Path(id): Path<ProjectId>) -> impl IntoResponse {
    project_response(id, state.lifecycle.get(id).await)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    body: Result<Json<ProjectPatch>, JsonRejection>,
) -> impl IntoResponse {
    let Json(patch) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };
    project_response(id, state.lifecycle.update_details(id, patch).await)
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<ProjectId>) -> impl IntoResponse {
    project_response(id, state.lifecycle.delete_project(id).await)
}

pub async fn start(State(state): State<AppState>, Path(id): Path<ProjectId>) -> impl IntoResponse {
    project_response(id, state.lifecycle.start_project(id).await)
}

pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> impl IntoResponse {
    project_response(id, state.lifecycle.complete_project(id).await)
}

pub async fn add_task(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    body: Result<Json<TaskDraft>, JsonRejection>,
) -> impl IntoResponse {
    let Json(draft) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };
    match state.lifecycle.add_task(id, draft).await {
        Ok(Some(project)) => (StatusCode::CREATED, Json(project)).into_response(),
        other => project_response(id, other),
    }
}

pub async fn update_task(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(ProjectId, TaskId)>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> impl IntoResponse {
    let Json(patch) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };
    project_response(id, state.lifecycle.update_task(id, task_id, patch).await)
}

pub async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    body: Result<Json<NoteBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };
    match state.lifecycle.add_note(id, &body.text).await {
        Ok(Some(project)) => (StatusCode::CREATED, Json(project)).into_response(),
        other => project_response(id, other),
    }
}

fn project_response(id: ProjectId, result: Result<Option<Project>, LifecycleError>) -> Response {
    match result {
        Ok(Some(project)) => Json(project).into_response(),
        Ok(None) => lifecycle_error(LifecycleError::NotFound(id)),
        Err(err) => lifecycle_error(err),
    }
}

fn lifecycle_error(err: LifecycleError) -> Response {
    let status = match &err {
        LifecycleError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LifecycleError::LimitReached { .. } => StatusCode::FORBIDDEN,
        LifecycleError::NotFound(_) => StatusCode::NOT_FOUND,
        LifecycleError::Repository(
            RepositoryError::DuplicateProject { .. } | RepositoryError::DuplicateTask { .. },
        ) => StatusCode::CONFLICT,
        LifecycleError::Repository(RepositoryError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}
