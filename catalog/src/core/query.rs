//! Read access to the catalog

use shared::{component_debug, component_info, CatalogFilter, CatalogStatus, Component, CountryRecord, DeleteOutcome, SortOrder};
use crate::error::{CatalogError, CatalogResult};
use crate::traits::{CatalogStore, RefreshLedger};
use crate::types::KeyPattern;

pub struct QueryService<S, L>
where
    S: CatalogStore,
    L: RefreshLedger,
{
    store: S,
    ledger: L,
}

impl<S, L> QueryService<S, L>
where
    S: CatalogStore,
    L: RefreshLedger,
{
    pub fn new(store: S, ledger: L) -> Self {
        Self { store, ledger }
    }

    pub async fn find_all(&self, filter: &CatalogFilter, sort: SortOrder) -> CatalogResult<Vec<CountryRecord>> {
        let records = self.store.find_many(filter, sort).await?;
        component_debug!(Component::Query, "find_all {:?} {:?} -> {} records", filter, sort, records.len());
        Ok(records)
    }

    /// Case-insensitive exact lookup by name
    pub async fn find_one(&self, name: &str) -> CatalogResult<CountryRecord> {
        let pattern = KeyPattern::case_insensitive(name)?;
        self.store
            .find_one(&pattern)
            .await?
            .ok_or_else(|| CatalogError::not_found(name))
    }

    pub async fn delete(&self, name: &str) -> CatalogResult<DeleteOutcome> {
        let pattern = KeyPattern::case_insensitive(name)?;
        let removed = self.store.delete_one(&pattern).await?;
        if removed == 0 {
            return Err(CatalogError::not_found(name));
        }

        component_info!(Component::Query, "🗑️ Deleted country '{}'", name);
        Ok(DeleteOutcome {
            message: format!("Country '{name}' deleted successfully"),
            removed,
        })
    }

    /// Record count plus the last refresh time.
    ///
    /// Falls back to the newest stored record when this process has not
    /// refreshed yet, e.g. after restarting over a persisted snapshot.
    pub async fn status(&self) -> CatalogResult<CatalogStatus> {
        let total_countries = self.store.count().await?;
        let last_refreshed_at = match self.ledger.last_refreshed().await {
            Some(at) => Some(at),
            None => self
                .store
                .find_many(&CatalogFilter::default(), SortOrder::Unspecified)
                .await?
                .iter()
                .map(|record| record.last_refreshed_at)
                .max(),
        };

        Ok(CatalogStatus {
            total_countries,
            last_refreshed_at,
        })
    }
}
