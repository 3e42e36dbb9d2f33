//! Catalog facade wiring the refresh pipeline, query layer and summary
//!
//! One store and one ledger are shared by all three components. Refresh
//! calls are single-flight, and each successful refresh regenerates the
//! summary artifact.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use shared::{
    component_info, component_warn, logging, CatalogConfig, CatalogFilter, CatalogStatus, Component,
    CountryRecord, DeleteOutcome, RefreshOutcome, SortOrder, SummaryReport,
};
use crate::core::{QueryService, RefreshOrchestrator, SummaryReporter};
use crate::error::CatalogResult;
use crate::services::{
    ExchangeRateClient, InMemoryRefreshLedger, MemoryCatalogStore, RandomMetricFactor, RestCountriesClient,
    SvgSummaryRenderer,
};
use crate::traits::{CatalogStore, DirectorySource, MetricFactor, RateSource, RefreshLedger, SummaryRenderer};

pub struct CountryCatalog<D, X, S, L, F, R>
where
    D: DirectorySource,
    X: RateSource,
    S: CatalogStore + Clone,
    L: RefreshLedger + Clone,
    F: MetricFactor,
    R: SummaryRenderer,
{
    refresher: RefreshOrchestrator<D, X, S, L, F>,
    queries: QueryService<S, L>,
    summary: SummaryReporter<S, L, R>,
    refresh_guard: Mutex<()>,
}

/// Catalog wired to the live feeds, the memory store and the SVG renderer
pub type LiveCatalog = CountryCatalog<
    RestCountriesClient,
    ExchangeRateClient,
    MemoryCatalogStore,
    InMemoryRefreshLedger,
    RandomMetricFactor,
    SvgSummaryRenderer,
>;

impl LiveCatalog {
    pub async fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;

        let store = match &config.snapshot_path {
            Some(path) => MemoryCatalogStore::with_snapshot(path.clone()).await?,
            None => MemoryCatalogStore::new(),
        };
        logging::log_progress(
            Component::Sources,
            "Feeds configured",
            &format!("directory {} | rates {}", config.countries_url, config.rates_url),
        );

        Ok(Self::new(
            RestCountriesClient::from_config(config)?,
            ExchangeRateClient::from_config(config)?,
            store,
            InMemoryRefreshLedger::new(),
            RandomMetricFactor,
            SvgSummaryRenderer::new(config.cache_dir.clone()),
        )
        .with_base_currency(config.base_currency.clone())
        .with_upsert_concurrency(config.upsert_concurrency))
    }
}

impl<D, X, S, L, F, R> CountryCatalog<D, X, S, L, F, R>
where
    D: DirectorySource + 'static,
    X: RateSource + 'static,
    S: CatalogStore + Clone + 'static,
    L: RefreshLedger + Clone + 'static,
    F: MetricFactor + 'static,
    R: SummaryRenderer + 'static,
{
    pub fn new(directory: D, rates: X, store: S, ledger: L, factor: F, renderer: R) -> Self {
        Self {
            queries: QueryService::new(store.clone(), ledger.clone()),
            summary: SummaryReporter::new(store.clone(), ledger.clone(), renderer),
            refresher: RefreshOrchestrator::new(directory, rates, store, ledger, factor),
            refresh_guard: Mutex::new(()),
        }
    }

    pub fn with_base_currency(mut self, base: impl Into<String>) -> Self {
        self.refresher = self.refresher.with_base_currency(base);
        self
    }

    pub fn with_upsert_concurrency(mut self, limit: usize) -> Self {
        self.refresher = self.refresher.with_upsert_concurrency(limit);
        self
    }

    /// Run one refresh cycle, then regenerate the summary.
    ///
    /// Concurrent callers queue behind the cycle in flight. A summary render
    /// failure is logged and does not fail the refresh.
    pub async fn refresh(&self) -> CatalogResult<RefreshOutcome> {
        let _in_flight = self.refresh_guard.lock().await;
        let outcome = self.refresher.refresh().await?;

        if let Err(e) = self.summary.generate().await {
            component_warn!(Component::Summary, "Summary regeneration failed: {}", e);
        }
        Ok(outcome)
    }

    pub async fn find_all(&self, filter: &CatalogFilter, sort: SortOrder) -> CatalogResult<Vec<CountryRecord>> {
        self.queries.find_all(filter, sort).await
    }

    pub async fn find_one(&self, name: &str) -> CatalogResult<CountryRecord> {
        self.queries.find_one(name).await
    }

    pub async fn delete(&self, name: &str) -> CatalogResult<DeleteOutcome> {
        self.queries.delete(name).await
    }

    pub async fn status(&self) -> CatalogResult<CatalogStatus> {
        self.queries.status().await
    }

    pub async fn build_summary(&self) -> CatalogResult<SummaryReport> {
        self.summary.build_summary().await
    }

    pub async fn summary_artifact(&self) -> CatalogResult<Vec<u8>> {
        self.summary.artifact().await
    }

    pub fn summary_content_type(&self) -> &'static str {
        self.summary.content_type()
    }

    /// Refresh every `every`, starting immediately; failures are logged
    pub fn spawn_scheduled_refresh(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            component_info!(Component::Refresh, "⏱️ Scheduled refresh every {:?}", every);

            loop {
                ticker.tick().await;
                if let Err(e) = self.refresh().await {
                    logging::log_error(Component::Refresh, "Scheduled refresh", &e);
                }
            }
        })
    }
}
