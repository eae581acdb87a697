//! Native folder selection endpoint.

use axum::{extract::State, Json};

use crate::rest::dto::FolderSelectionResponse;
use crate::rest::error::{ApiError, ErrorResponse};
use crate::rest::state::ApiState;

/// Open the native folder dialog and return the chosen path
#[utoipa::path(
    post,
    path = "/api/folder/select",
    tag = "Folder",
    responses(
        (status = 200, description = "Folder selected", body = FolderSelectionResponse),
        (status = 400, description = "User cancelled the dialog", body = ErrorResponse),
        (status = 500, description = "Dialog could not be shown", body = ErrorResponse)
    )
)]
pub async fn select(
    State(state): State<ApiState>,
) -> Result<Json<FolderSelectionResponse>, ApiError> {
    match state.picker.pick().await {
        Ok(Some(path)) => Ok(Json(FolderSelectionResponse {
            path: path.to_string_lossy().to_string(),
        })),
        Ok(None) => {
            tracing::info!("Folder selection cancelled");
            Err(ApiError::BadRequest("No folder selected".to_string()))
        }
        Err(e) => {
            tracing::error!(error = %e, "Pick folder error");
            Err(e.into())
        }
    }
}
