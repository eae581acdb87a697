//! Project status and push endpoints.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::project;
use crate::rest::dto::{
    ProjectStatusRequest, ProjectStatusResponse, PushProjectRequest, PushProjectResponse,
};
use crate::rest::error::{ApiError, ErrorResponse};
use crate::rest::state::ApiState;

/// Report whether a folder is a repository and list its remotes
#[utoipa::path(
    post,
    path = "/api/project/status",
    tag = "Project",
    request_body = ProjectStatusRequest,
    responses(
        (status = 200, description = "Folder state", body = ProjectStatusResponse),
        (status = 400, description = "Missing or nonexistent folder", body = ErrorResponse),
        (status = 500, description = "git failed", body = ErrorResponse)
    )
)]
pub async fn status(
    State(state): State<ApiState>,
    payload: Result<Json<ProjectStatusRequest>, JsonRejection>,
) -> Result<Json<ProjectStatusResponse>, ApiError> {
    let Json(request) = payload?;

    let status = project::inspect(&state.git, &request.folder)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Status check error"))?;

    Ok(Json(status.into()))
}

/// Initialize, commit and publish a folder to a remote
#[utoipa::path(
    post,
    path = "/api/project/push",
    tag = "Project",
    request_body = PushProjectRequest,
    responses(
        (status = 200, description = "Project pushed", body = PushProjectResponse),
        (status = 400, description = "Missing folder or repo URL", body = ErrorResponse),
        (status = 500, description = "A workflow step failed", body = ErrorResponse)
    )
)]
pub async fn push(
    State(state): State<ApiState>,
    payload: Result<Json<PushProjectRequest>, JsonRejection>,
) -> Result<Json<PushProjectResponse>, ApiError> {
    let Json(request) = payload?;
    let request = request.into_push_request();

    // PushError's Display is already masked
    let outcome = project::push(&state.git, &state.config.git, &request)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Push error"))?;

    Ok(Json(outcome.into()))
}
