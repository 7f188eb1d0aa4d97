//! HTTP server for a metadata snapshot
//!
//! Exposes a [`MetadataService`] under `/latest/meta-data/`, so tools that
//! expect the real metadata endpoint can run against a recorded snapshot.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{MetadataError, Result};
use crate::service::MetadataService;

/// Build the router for a snapshot
pub fn router(service: MetadataService) -> Router {
    let state = Arc::new(service);
    Router::new()
        .route("/latest/meta-data", get(handle_root))
        .route("/latest/meta-data/", get(handle_root))
        .route("/latest/meta-data/{*path}", get(handle_path))
        .with_state(state)
}

/// Bind `addr` and serve the snapshot until the task is cancelled
pub async fn serve(service: MetadataService, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Serving metadata snapshot");
    axum::serve(listener, router(service)).await?;
    Ok(())
}

async fn handle_root(State(service): State<Arc<MetadataService>>) -> Response {
    respond(&service, "")
}

async fn handle_path(
    State(service): State<Arc<MetadataService>>,
    Path(path): Path<String>,
) -> Response {
    respond(&service, &path)
}

fn respond(service: &MetadataService, path: &str) -> Response {
    match service.resolve(path) {
        Ok(value) => {
            debug!(path = %path, "Metadata hit");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain")],
                value,
            )
                .into_response()
        }
        Err(MetadataError::NotFound(_)) => {
            debug!(path = %path, "Metadata miss");
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
        Err(e) => {
            warn!(path = %path, error = %e, "Rejected metadata request");
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}
