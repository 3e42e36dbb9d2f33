//! Refresh cycle: fetch both feeds, reconcile, upsert

use std::collections::HashMap;
use chrono::Utc;

use shared::{component_debug, component_info, component_warn, logging, Component, CountryRecord, RefreshOutcome};
use crate::core::normalizer;
use crate::core::reconciler::Reconciler;
use crate::error::{CatalogError, CatalogResult};
use crate::traits::{CatalogStore, DirectorySource, MetricFactor, RateSource, RefreshLedger};
use crate::types::UpsertKind;

pub const REFRESH_MESSAGE: &str = "Countries refreshed successfully";

/// Runs refresh cycles against injected feeds, store and ledger
pub struct RefreshOrchestrator<D, X, S, L, F>
where
    D: DirectorySource,
    X: RateSource,
    S: CatalogStore,
    L: RefreshLedger,
    F: MetricFactor,
{
    directory: D,
    rates: X,
    store: S,
    ledger: L,
    reconciler: Reconciler<F>,
    base_currency: String,
    upsert_concurrency: usize,
}

impl<D, X, S, L, F> RefreshOrchestrator<D, X, S, L, F>
where
    D: DirectorySource,
    X: RateSource,
    S: CatalogStore,
    L: RefreshLedger,
    F: MetricFactor,
{
    pub fn new(directory: D, rates: X, store: S, ledger: L, factor: F) -> Self {
        Self {
            directory,
            rates,
            store,
            ledger,
            reconciler: Reconciler::new(factor),
            base_currency: shared::config::DEFAULT_BASE_CURRENCY.to_string(),
            upsert_concurrency: 16,
        }
    }

    pub fn with_base_currency(mut self, base: impl Into<String>) -> Self {
        self.base_currency = base.into();
        self
    }

    pub fn with_upsert_concurrency(mut self, limit: usize) -> Self {
        self.upsert_concurrency = limit.max(1);
        self
    }

    /// Run one refresh cycle.
    ///
    /// Either feed failing aborts before any write. Individual upsert
    /// failures are counted in the outcome and do not abort the cycle,
    /// unless every upsert failed, which fails the cycle without touching
    /// the ledger.
    pub async fn refresh(&self) -> CatalogResult<RefreshOutcome> {
        component_info!(Component::Refresh, "🔄 Starting refresh cycle (base {})", self.base_currency);

        let (raw_countries, rates) = tokio::try_join!(
            self.directory.fetch_directory(),
            self.rates.fetch_rates(&self.base_currency),
        )
        .map_err(|e| {
            logging::log_error(Component::Refresh, "Source fetch", &e);
            CatalogError::RefreshFailed(Box::new(e))
        })?;

        component_debug!(
            Component::Refresh,
            "Fetched {} directory entries and {} rates",
            raw_countries.len(),
            rates.len()
        );

        let refreshed_at = Utc::now();
        let mut skipped = 0usize;
        let mut records: Vec<CountryRecord> = Vec::with_capacity(raw_countries.len());
        let mut positions: HashMap<String, usize> = HashMap::new();

        for raw in &raw_countries {
            let Some(country) = normalizer::normalize(raw) else {
                skipped += 1;
                component_debug!(Component::Refresh, "Skipping entry without usable name: {:?}", raw.name);
                continue;
            };
            let record = self.reconciler.build_record(country, &rates, refreshed_at);

            // Later entries win on key collisions, matching feed order
            match positions.get(record.key()) {
                Some(&index) => {
                    component_debug!(Component::Refresh, "Key '{}' repeated in feed; keeping later entry", record.key());
                    records[index] = record;
                }
                None => {
                    positions.insert(record.name.clone(), records.len());
                    records.push(record);
                }
            }
        }

        let results = self.store.upsert_batch(records, self.upsert_concurrency).await;

        let (mut inserted, mut replaced, mut failed) = (0usize, 0usize, 0usize);
        for (key, result) in results {
            match result {
                Ok(UpsertKind::Inserted) => inserted += 1,
                Ok(UpsertKind::Replaced) => replaced += 1,
                Err(e) => {
                    failed += 1;
                    component_warn!(Component::Refresh, "Upsert of '{}' failed: {}", key, e);
                }
            }
        }

        if failed > 0 && inserted + replaced == 0 {
            let err = CatalogError::store(format!("all {failed} upserts failed"));
            logging::log_error(Component::Refresh, "Refresh", &err);
            return Err(err);
        }

        let total = self.store.count().await?;
        let completed_at = Utc::now();
        self.ledger.record(completed_at).await;

        logging::log_success(
            Component::Refresh,
            &format!(
                "Refresh complete: {total} stored ({inserted} new, {replaced} replaced, {skipped} skipped, {failed} failed)"
            ),
        );

        Ok(RefreshOutcome {
            message: REFRESH_MESSAGE.to_string(),
            total,
            inserted,
            replaced,
            skipped,
            failed,
            refreshed_at: completed_at,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }
}
