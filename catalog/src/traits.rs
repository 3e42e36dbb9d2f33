//! Service trait definitions for dependency injection
//!
//! Every collaborator of the refresh pipeline and the query layer sits behind
//! one of these traits so tests can swap in mocks or in-memory versions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};

use shared::{CatalogFilter, CountryRecord, RateTable, RawCountry, SortOrder, SummaryReport};
use crate::error::CatalogResult;
use crate::types::{KeyPattern, UpsertKind};

/// Country directory feed
#[mockall::automock]
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Fetch every country object the feed publishes
    async fn fetch_directory(&self) -> CatalogResult<Vec<RawCountry>>;
}

/// Exchange-rate feed
#[mockall::automock]
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch rates relative to `base`
    async fn fetch_rates(&self, base: &str) -> CatalogResult<RateTable>;
}

/// Keyed persistent collection of country records
///
/// Implementations must keep keys unique; `upsert` fully replaces any record
/// stored under the same key.
#[mockall::automock]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn upsert(&self, record: CountryRecord) -> CatalogResult<UpsertKind>;

    /// Upsert every record, reporting each result against its key.
    ///
    /// The default runs per-record upserts with at most `concurrency` in
    /// flight; stores that can apply a batch in one write override it.
    async fn upsert_batch(
        &self,
        records: Vec<CountryRecord>,
        concurrency: usize,
    ) -> Vec<(String, CatalogResult<UpsertKind>)> {
        stream::iter(records)
            .map(|record| async move {
                let key = record.name.clone();
                (key, self.upsert(record).await)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await
    }

    /// Filtered records in iteration order, then sorted (stable) by `sort`
    async fn find_many(&self, filter: &CatalogFilter, sort: SortOrder) -> CatalogResult<Vec<CountryRecord>>;

    async fn find_one(&self, pattern: &KeyPattern) -> CatalogResult<Option<CountryRecord>>;

    /// Remove the first record matching `pattern`, returning how many were removed
    async fn delete_one(&self, pattern: &KeyPattern) -> CatalogResult<u64>;

    async fn count(&self) -> CatalogResult<u64>;
}

/// Renders the summary artifact and reads it back
#[mockall::automock]
#[async_trait]
pub trait SummaryRenderer: Send + Sync {
    async fn render(&self, report: &SummaryReport) -> CatalogResult<()>;

    /// `None` when nothing has been rendered yet
    async fn read_artifact(&self) -> CatalogResult<Option<Vec<u8>>>;

    /// MIME type of the rendered artifact
    fn content_type(&self) -> &'static str;
}

/// Process-wide "last successful refresh" state
#[mockall::automock]
#[async_trait]
pub trait RefreshLedger: Send + Sync {
    async fn record(&self, at: DateTime<Utc>);

    async fn last_refreshed(&self) -> Option<DateTime<Utc>>;
}

/// Source of the per-record multiplier used by the reconciler
#[mockall::automock]
pub trait MetricFactor: Send + Sync {
    /// Draw a factor from `[1000, 2000)`
    fn draw(&self) -> f64;
}
