//! API error types and responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::picker::PickerError;
use crate::project::{ProjectError, PushError};
use crate::rest::dto::FailureDetails;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Invalid or missing input, or a cancelled dialog
    BadRequest(String),
    /// An external tool failed
    Internal {
        error: String,
        details: Option<FailureDetails>,
    },
}

/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<FailureDetails>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(error) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error,
                    details: None,
                },
            ),
            ApiError::Internal { error, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse { error, details },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::InvalidInput(msg) => ApiError::BadRequest(msg),
            ProjectError::Git(e) => {
                let raw = e.raw_output();
                ApiError::Internal {
                    error: "Failed to read repository status".to_string(),
                    details: Some(FailureDetails {
                        step: None,
                        diagnosis: Some(crate::diagnosis::classify(&raw).into()),
                        output: raw,
                    }),
                }
            }
        }
    }
}

impl From<PushError> for ApiError {
    fn from(err: PushError) -> Self {
        match err {
            PushError::InvalidInput(msg) => ApiError::BadRequest(msg),
            PushError::Step(failure) => ApiError::Internal {
                error: format!("Push failed at the {} step", failure.step),
                details: Some(FailureDetails {
                    step: Some(failure.step.to_string()),
                    output: failure.output().to_string(),
                    diagnosis: Some(failure.diagnosis().into()),
                }),
            },
        }
    }
}

impl From<PickerError> for ApiError {
    fn from(err: PickerError) -> Self {
        ApiError::Internal {
            error: "Failed to pick folder".to_string(),
            details: Some(FailureDetails {
                step: None,
                output: err.to_string(),
                diagnosis: None,
            }),
        }
    }
}
