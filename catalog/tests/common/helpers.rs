//! Test helpers for catalog tests
//!
//! Builds mock feeds and wires orchestrators over the in-memory store so
//! each test only states what differs.

use catalog::core::RefreshOrchestrator;
use catalog::*;
use shared::{CatalogFilter, CountryRecord, RateTable, RawCountry, SortOrder};

use super::fixtures::TestFixtures;

pub type TestRefresher<F> =
    RefreshOrchestrator<MockDirectorySource, MockRateSource, MemoryCatalogStore, InMemoryRefreshLedger, F>;

pub struct TestHelpers;

impl TestHelpers {
    pub fn directory_returning(entries: Vec<RawCountry>) -> MockDirectorySource {
        let mut directory = MockDirectorySource::new();
        directory
            .expect_fetch_directory()
            .returning(move || Ok(entries.clone()));
        directory
    }

    pub fn rates_returning(rates: RateTable) -> MockRateSource {
        let mut source = MockRateSource::new();
        source
            .expect_fetch_rates()
            .withf(|base| base == TestFixtures::BASE_CURRENCY)
            .returning(move |_| Ok(rates.clone()));
        source
    }

    pub fn failing_directory() -> MockDirectorySource {
        let mut directory = MockDirectorySource::new();
        directory
            .expect_fetch_directory()
            .returning(|| Err(CatalogError::source_unavailable("country directory", "HTTP 502 Bad Gateway")));
        directory
    }

    pub fn failing_rates() -> MockRateSource {
        let mut source = MockRateSource::new();
        source
            .expect_fetch_rates()
            .returning(|_| Err(CatalogError::source_unavailable("exchange rates", "connection reset")));
        source
    }

    /// Orchestrator over the standard fixtures with a deterministic factor
    pub fn fixture_refresher(store: MemoryCatalogStore, ledger: InMemoryRefreshLedger) -> TestRefresher<FixedMetricFactor> {
        RefreshOrchestrator::new(
            Self::directory_returning(TestFixtures::directory()),
            Self::rates_returning(TestFixtures::rates()),
            store,
            ledger,
            FixedMetricFactor::new(1500.0),
        )
        .with_base_currency(TestFixtures::BASE_CURRENCY)
        .with_upsert_concurrency(4)
    }

    pub async fn store_with(records: Vec<CountryRecord>) -> MemoryCatalogStore {
        let store = MemoryCatalogStore::new();
        for record in records {
            store.upsert(record).await.expect("seed record");
        }
        store
    }

    pub async fn all_records<S: CatalogStore>(store: &S) -> Vec<CountryRecord> {
        store
            .find_many(&CatalogFilter::default(), SortOrder::Unspecified)
            .await
            .expect("list records")
    }

    pub async fn lookup<S: CatalogStore>(store: &S, name: &str) -> Option<CountryRecord> {
        let pattern = KeyPattern::case_insensitive(name).expect("valid pattern");
        store.find_one(&pattern).await.expect("lookup")
    }
}
