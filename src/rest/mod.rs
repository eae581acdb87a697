//! REST API for the Repopilot agent.
//!
//! Provides HTTP endpoints for picking a folder, inspecting its git state and
//! publishing it. Each request runs to completion on its own; there is no
//! queue and no shared mutable state between requests.

use std::future::Future;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub mod dto;
pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::ApiState;

/// Serve the generated OpenAPI document
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the API router with all routes
pub fn build_router(state: ApiState) -> Router {
    // The web UI is served from a different localhost port
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health::root))
        // Health endpoints
        .route("/status", get(routes::health::status))
        .route("/api/health", get(routes::health::health))
        // Folder picker
        .route("/api/folder/select", post(routes::folder::select))
        // Project endpoints
        .route("/api/project/status", post(routes::project::status))
        .route("/api/project/push", post(routes::project::push))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the REST API server, stopping when `shutdown` resolves
pub async fn serve<F>(state: ApiState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config.bind_address();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Repopilot agent listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
