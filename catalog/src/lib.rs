//! Country catalog library
//!
//! Fetches a country directory and an exchange-rate table, reconciles them
//! by a canonical join key, keeps the result in a keyed store, and serves
//! filtered queries plus a rendered top-5 summary over it.

pub mod catalog_impl;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use catalog_impl::{CountryCatalog, LiveCatalog};
pub use error::{CatalogError, CatalogResult};
pub use types::*;

// Re-export trait definitions and their mocks
pub use traits::{
    CatalogStore, DirectorySource, MetricFactor, RateSource, RefreshLedger, SummaryRenderer,
    MockCatalogStore, MockDirectorySource, MockMetricFactor, MockRateSource, MockRefreshLedger,
    MockSummaryRenderer,
};

// Re-export service implementations
pub use services::{
    ExchangeRateClient, FixedMetricFactor, InMemoryRefreshLedger, MemoryCatalogStore, RandomMetricFactor,
    RestCountriesClient, SeededMetricFactor, SvgSummaryRenderer,
};
