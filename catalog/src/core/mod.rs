//! Catalog core business logic

pub mod normalizer;
pub mod query;
pub mod reconciler;
pub mod refresh;
pub mod summary;

pub use normalizer::{normalize, normalize_key};
pub use query::QueryService;
pub use reconciler::Reconciler;
pub use refresh::RefreshOrchestrator;
pub use summary::{SummaryReporter, TOP_COUNT};
