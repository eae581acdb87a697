//! Health check and status endpoints.

use axum::{extract::State, Json};

use crate::rest::dto::{AgentStatusResponse, HealthResponse};
use crate::rest::state::ApiState;

/// Agent liveness probe used by the browser UI
#[utoipa::path(
    get,
    path = "/status",
    tag = "Health",
    responses(
        (status = 200, description = "Agent is running", body = AgentStatusResponse)
    )
)]
pub async fn status() -> Json<AgentStatusResponse> {
    Json(AgentStatusResponse {
        status: "ok".to_string(),
        message: "Repopilot Agent is running".to_string(),
    })
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Plain-text banner pointing at the web UI
pub async fn root(State(state): State<ApiState>) -> String {
    format!(
        "Repopilot Agent is running. Open the web app at {}",
        state.config.server.web_ui_url
    )
}
