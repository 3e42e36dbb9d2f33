//! WebServer-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use catalog::CatalogError;
use shared::{component_error, component_warn, Component, SharedError};

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("HTTP server startup failed on {address}: {message}")]
    ServerStartupFailed { address: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type WebServerResult<T> = Result<T, WebServerError>;

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::Catalog(err) => match err {
                CatalogError::RefreshFailed(_) | CatalogError::SourceUnavailable { .. } => StatusCode::BAD_REQUEST,
                CatalogError::InvalidPattern(_) => StatusCode::BAD_REQUEST,
                CatalogError::NotFound { .. } | CatalogError::ArtifactAbsent => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            component_error!(Component::WebServer, "Request failed: {}", self);
        } else {
            component_warn!(Component::WebServer, "Request rejected ({}): {}", status, self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let refresh: WebServerError = CatalogError::RefreshFailed(Box::new(CatalogError::source_unavailable(
            "exchange rates",
            "HTTP 503 Service Unavailable",
        )))
        .into();
        assert_eq!(refresh.status_code(), StatusCode::BAD_REQUEST);

        let missing: WebServerError = CatalogError::not_found("Atlantis").into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "Country 'Atlantis' not found");

        let absent: WebServerError = CatalogError::ArtifactAbsent.into();
        assert_eq!(absent.status_code(), StatusCode::NOT_FOUND);

        let store: WebServerError = CatalogError::store("disk full").into();
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_refresh_failure_message_names_cause() {
        let err: WebServerError = CatalogError::RefreshFailed(Box::new(CatalogError::source_unavailable(
            "country directory",
            "HTTP 502 Bad Gateway",
        )))
        .into();
        assert!(err.to_string().starts_with("Failed to refresh countries: "));
        assert!(err.to_string().contains("country directory"));
    }
}
