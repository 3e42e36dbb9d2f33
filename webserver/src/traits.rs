//! Service trait definitions for dependency injection
//!
//! Handlers only see the catalog through `CatalogService`, so router tests
//! can run against a mock without any feed or store behind it.

use async_trait::async_trait;

use catalog::{
    CatalogResult, CatalogStore, CountryCatalog, DirectorySource, MetricFactor, RateSource, RefreshLedger,
    SummaryRenderer,
};
use shared::{CatalogFilter, CatalogStatus, CountryRecord, DeleteOutcome, RefreshOutcome, SortOrder};

/// Catalog operations exposed over HTTP
#[mockall::automock]
#[async_trait]
pub trait CatalogService: Send + Sync + 'static {
    async fn refresh(&self) -> CatalogResult<RefreshOutcome>;

    async fn find_all(&self, filter: CatalogFilter, sort: SortOrder) -> CatalogResult<Vec<CountryRecord>>;

    async fn find_one(&self, name: &str) -> CatalogResult<CountryRecord>;

    async fn delete(&self, name: &str) -> CatalogResult<DeleteOutcome>;

    async fn status(&self) -> CatalogResult<CatalogStatus>;

    /// Rendered summary bytes
    async fn summary_artifact(&self) -> CatalogResult<Vec<u8>>;

    fn summary_content_type(&self) -> &'static str;
}

#[async_trait]
impl<D, X, S, L, F, R> CatalogService for CountryCatalog<D, X, S, L, F, R>
where
    D: DirectorySource + 'static,
    X: RateSource + 'static,
    S: CatalogStore + Clone + 'static,
    L: RefreshLedger + Clone + 'static,
    F: MetricFactor + 'static,
    R: SummaryRenderer + 'static,
{
    async fn refresh(&self) -> CatalogResult<RefreshOutcome> {
        CountryCatalog::refresh(self).await
    }

    async fn find_all(&self, filter: CatalogFilter, sort: SortOrder) -> CatalogResult<Vec<CountryRecord>> {
        CountryCatalog::find_all(self, &filter, sort).await
    }

    async fn find_one(&self, name: &str) -> CatalogResult<CountryRecord> {
        CountryCatalog::find_one(self, name).await
    }

    async fn delete(&self, name: &str) -> CatalogResult<DeleteOutcome> {
        CountryCatalog::delete(self, name).await
    }

    async fn status(&self) -> CatalogResult<CatalogStatus> {
        CountryCatalog::status(self).await
    }

    async fn summary_artifact(&self) -> CatalogResult<Vec<u8>> {
        CountryCatalog::summary_artifact(self).await
    }

    fn summary_content_type(&self) -> &'static str {
        CountryCatalog::summary_content_type(self)
    }
}
