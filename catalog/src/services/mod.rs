//! Catalog service implementations

pub mod memory_store;
pub mod metric_factor;
pub mod refresh_ledger;
pub mod source_clients;
pub mod svg_renderer;

#[cfg(test)]
pub mod tests;

pub use memory_store::*;
pub use metric_factor::*;
pub use refresh_ledger::*;
pub use source_clients::*;
pub use svg_renderer::*;
