//! Top-ranked summary handed to the renderer

use shared::{component_debug, CatalogFilter, Component, RankedCountry, SortOrder, SummaryReport};
use crate::error::{CatalogError, CatalogResult};
use crate::traits::{CatalogStore, RefreshLedger, SummaryRenderer};

/// Number of countries ranked in the summary
pub const TOP_COUNT: usize = 5;

pub struct SummaryReporter<S, L, R>
where
    S: CatalogStore,
    L: RefreshLedger,
    R: SummaryRenderer,
{
    store: S,
    ledger: L,
    renderer: R,
}

impl<S, L, R> SummaryReporter<S, L, R>
where
    S: CatalogStore,
    L: RefreshLedger,
    R: SummaryRenderer,
{
    pub fn new(store: S, ledger: L, renderer: R) -> Self {
        Self { store, ledger, renderer }
    }

    pub async fn build_summary(&self) -> CatalogResult<SummaryReport> {
        let ranked = self
            .store
            .find_many(&CatalogFilter::default(), SortOrder::GdpDesc)
            .await?;
        let top = ranked
            .into_iter()
            .filter(|record| record.estimated_gdp.is_finite())
            .take(TOP_COUNT)
            .map(|record| RankedCountry {
                name: record.name,
                estimated_gdp: record.estimated_gdp,
            })
            .collect();

        Ok(SummaryReport {
            total_count: self.store.count().await?,
            last_refreshed_at: self.ledger.last_refreshed().await,
            top,
        })
    }

    /// Build the report and persist the rendered artifact
    pub async fn generate(&self) -> CatalogResult<SummaryReport> {
        let report = self.build_summary().await?;
        self.renderer.render(&report).await?;
        component_debug!(Component::Summary, "Rendered summary for {} countries", report.total_count);
        Ok(report)
    }

    /// Rendered artifact bytes; `ArtifactAbsent` when nothing was generated yet
    pub async fn artifact(&self) -> CatalogResult<Vec<u8>> {
        self.renderer
            .read_artifact()
            .await?
            .ok_or(CatalogError::ArtifactAbsent)
    }

    pub fn content_type(&self) -> &'static str {
        self.renderer.content_type()
    }
}
