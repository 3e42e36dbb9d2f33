//! Process-wide record of the last successful refresh

use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::traits::RefreshLedger;

/// Shared ledger; clones observe the same value
#[derive(Clone, Debug, Default)]
pub struct InMemoryRefreshLedger {
    last: Arc<RwLock<Option<DateTime<Utc>>>>,
}

impl InMemoryRefreshLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshLedger for InMemoryRefreshLedger {
    async fn record(&self, at: DateTime<Utc>) {
        let mut last = self.last.write().await;
        // never move backwards if two completions race
        if last.map_or(true, |prev| at > prev) {
            *last = Some(at);
        }
    }

    async fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        *self.last.read().await
    }
}
