//! Shared types for the country catalog
//!
//! Holds the data model exchanged between the catalog core and the web
//! server, the runtime configuration, and the tracing setup.

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::CatalogConfig;
pub use errors::*;
pub use types::*;
