//! HTTP adapter for the country catalog
//!
//! Exposes refresh, query, delete, status and summary-image endpoints over
//! axum, backed by any `CatalogService`.

pub mod config;
pub mod error;
pub mod state;
pub mod traits;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use config::Args;
pub use error::{WebServerError, WebServerResult};
pub use state::WebServerState;
pub use traits::{CatalogService, MockCatalogService};
pub use webserver_impl::{router, WebServer};
