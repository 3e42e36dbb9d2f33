//! Catalog error types

use thiserror::Error;
use shared::SharedError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Source '{feed}' unavailable: {message}")]
    SourceUnavailable { feed: String, message: String },

    #[error("Failed to refresh countries: {0}")]
    RefreshFailed(#[source] Box<CatalogError>),

    #[error("Country '{name}' not found")]
    NotFound { name: String },

    #[error("Summary image not found")]
    ArtifactAbsent,

    #[error("Store operation failed: {message}")]
    Store { message: String },

    #[error("Summary rendering failed: {message}")]
    Render { message: String },

    #[error("Invalid lookup pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn source_unavailable(feed: &str, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            feed: feed.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Innermost cause for a failed refresh, or the error itself
    pub fn root_cause(&self) -> &CatalogError {
        match self {
            CatalogError::RefreshFailed(cause) => cause.root_cause(),
            other => other,
        }
    }
}
