//! Data Transfer Objects for the REST API.
//!
//! Field names are camelCase to match what the browser UI sends and reads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::credentials::Token;
use crate::diagnosis::Diagnosis;
use crate::git::RemoteBinding;
use crate::project::{ProjectStatus, PushOutcome, PushRequest, StepRecord};

// =============================================================================
// Health/Status DTOs
// =============================================================================

/// Agent liveness probe
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AgentStatusResponse {
    pub status: String,
    pub message: String,
}

/// Health check response with version
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Folder DTOs
// =============================================================================

/// Folder chosen in the native dialog
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FolderSelectionResponse {
    pub path: String,
}

// =============================================================================
// Project status DTOs
// =============================================================================

/// Request to inspect a folder
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ProjectStatusRequest {
    #[serde(default)]
    pub folder: String,
}

/// Fetch and push URLs of a remote
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemoteRefsResponse {
    pub fetch: String,
    pub push: String,
}

/// A configured remote
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemoteResponse {
    pub name: String,
    pub refs: RemoteRefsResponse,
}

impl From<RemoteBinding> for RemoteResponse {
    fn from(remote: RemoteBinding) -> Self {
        Self {
            name: remote.name,
            refs: RemoteRefsResponse {
                fetch: remote.refs.fetch,
                push: remote.refs.push,
            },
        }
    }
}

/// Version-control state of a folder
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatusResponse {
    pub is_repo: bool,
    pub has_remote: bool,
    pub remotes: Vec<RemoteResponse>,
}

impl From<ProjectStatus> for ProjectStatusResponse {
    fn from(status: ProjectStatus) -> Self {
        Self {
            is_repo: status.is_repo,
            has_remote: status.has_remote,
            remotes: status.remotes.into_iter().map(RemoteResponse::from).collect(),
        }
    }
}

// =============================================================================
// Push DTOs
// =============================================================================

/// Request to run the push workflow
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushProjectRequest {
    #[serde(default)]
    pub folder: String,
    #[serde(default)]
    pub repo_url: String,
    /// Access token for https remotes; ignored for SSH remotes
    #[serde(default)]
    pub token: Option<String>,
}

impl PushProjectRequest {
    pub fn into_push_request(self) -> PushRequest {
        PushRequest {
            folder: self.folder,
            repo_url: self.repo_url,
            token: self.token.and_then(Token::new),
        }
    }
}

/// One completed workflow step
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StepResponse {
    pub step: String,
    pub detail: String,
}

impl From<StepRecord> for StepResponse {
    fn from(record: StepRecord) -> Self {
        Self {
            step: record.step.to_string(),
            detail: record.detail,
        }
    }
}

/// Successful push
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PushProjectResponse {
    pub success: bool,
    pub message: String,
    pub steps: Vec<StepResponse>,
}

impl From<PushOutcome> for PushProjectResponse {
    fn from(outcome: PushOutcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            steps: outcome.steps.into_iter().map(StepResponse::from).collect(),
        }
    }
}

// =============================================================================
// Failure DTOs
// =============================================================================

/// User-facing explanation of a git failure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResponse {
    pub title: String,
    pub description: String,
    pub advice: String,
    pub is_translated: bool,
}

impl From<Diagnosis> for DiagnosisResponse {
    fn from(d: Diagnosis) -> Self {
        Self {
            title: d.title.to_string(),
            description: d.description.to_string(),
            advice: d.advice.to_string(),
            is_translated: d.is_translated,
        }
    }
}

/// Details attached to a 500 response. `output` never contains a token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FailureDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<DiagnosisResponse>,
}
