//! OpenAPI specification builder using utoipa.

use utoipa::OpenApi;

use crate::rest::dto::{
    AgentStatusResponse, DiagnosisResponse, FailureDetails, FolderSelectionResponse,
    HealthResponse, ProjectStatusRequest, ProjectStatusResponse, PushProjectRequest,
    PushProjectResponse, RemoteRefsResponse, RemoteResponse, StepResponse,
};
use crate::rest::error::ErrorResponse;

/// OpenAPI documentation for the Repopilot agent
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Repopilot Agent API",
        description = "Local agent that initializes, commits and publishes project folders.",
        license(name = "MIT")
    ),
    paths(
        crate::rest::routes::health::status,
        crate::rest::routes::health::health,
        crate::rest::routes::folder::select,
        crate::rest::routes::project::status,
        crate::rest::routes::project::push,
    ),
    components(
        schemas(
            AgentStatusResponse,
            HealthResponse,
            FolderSelectionResponse,
            ProjectStatusRequest,
            ProjectStatusResponse,
            RemoteResponse,
            RemoteRefsResponse,
            PushProjectRequest,
            PushProjectResponse,
            StepResponse,
            DiagnosisResponse,
            FailureDetails,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and health endpoints"),
        (name = "Folder", description = "Native folder selection"),
        (name = "Project", description = "Repository inspection and publishing"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI specification as a JSON string
    pub fn json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }

    /// Generate the OpenAPI specification as a YAML string
    pub fn yaml() -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&Self::openapi())
    }
}
