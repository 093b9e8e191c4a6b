use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roadnet_core::NodeId;
use thiserror::Error;
use tokio::task::JoinError;
use tower::BoxError;

use crate::config::ConfigError;
use crate::dto::ErrorResponse;

/// Error returned by request handlers, rendered as a JSON body
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),
    #[error("No path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },
    #[error("No intersection within {0} km")]
    NothingNearby(f64),
    #[error("Request timed out")]
    Timeout,
    #[error("{0}")]
    Internal(String),
}

/// Startup failures of the server binary
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to load road network: {0}")]
    Network(#[from] roadnet_core::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Network loading task failed: {0}")]
    Join(#[from] JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownNode(_) | ApiError::NoPath { .. } | ApiError::NothingNearby(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine readable error kind
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::UnknownNode(_) => "unknown_node",
            ApiError::NoPath { .. } => "no_path",
            ApiError::NothingNearby(_) => "nothing_nearby",
            ApiError::Timeout => "timeout",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<roadnet_core::Error> for ApiError {
    fn from(e: roadnet_core::Error) -> Self {
        match e {
            roadnet_core::Error::UnknownNode(id) => ApiError::UnknownNode(id),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<JoinError> for ApiError {
    fn from(e: JoinError) -> Self {
        ApiError::Internal(format!("Query task failed: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("[{status}] {self}");
        } else {
            tracing::debug!("[{status}] {self}");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        });
        (status, body).into_response()
    }
}

/// Turns failures of the timeout and concurrency layers into responses
pub async fn handle_middleware_error(error: BoxError) -> ApiError {
    if error.is::<tower::timeout::error::Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Internal(format!("Unhandled middleware error: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn elapsed_requests_become_408() {
        let error = handle_middleware_error(Box::new(tower::timeout::error::Elapsed::new())).await;

        assert!(matches!(error, ApiError::Timeout));
        assert_eq!(error.into_response().status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn core_errors_map_to_statuses() {
        let unknown = ApiError::from(roadnet_core::Error::UnknownNode(4));
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
        assert_eq!(unknown.code(), "unknown_node");

        let stale = ApiError::from(roadnet_core::Error::StaleSearchState);
        assert_eq!(stale.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let no_path = ApiError::NoPath { from: 1, to: 2 };
        assert_eq!(no_path.status(), StatusCode::NOT_FOUND);
        assert_ne!(no_path.code(), unknown.code());
    }
}
