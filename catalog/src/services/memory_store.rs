//! In-memory catalog store with optional JSON snapshot persistence
//!
//! Records keep insertion order, which is the iteration order `find_many`
//! exposes before sorting. Keys are unique: an upsert for an existing key
//! replaces that record in place. When a snapshot path is configured the
//! whole collection is rewritten atomically after every mutation, and the
//! in-memory state only changes once that write has succeeded. A batch
//! upsert writes the snapshot once for the whole batch.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;

use shared::{component_debug, component_info, CatalogFilter, Component, CountryRecord, SortOrder};
use crate::error::{CatalogError, CatalogResult};
use crate::traits::CatalogStore;
use crate::types::{KeyPattern, UpsertKind};

#[derive(Clone, Default)]
struct StoreInner {
    records: Vec<CountryRecord>,
    index: HashMap<String, usize>,
}

impl StoreInner {
    fn from_records(records: Vec<CountryRecord>) -> Self {
        let mut inner = StoreInner::default();
        for record in records {
            inner.put(record);
        }
        inner
    }

    fn put(&mut self, record: CountryRecord) -> UpsertKind {
        match self.index.get(record.key()) {
            Some(&position) => {
                self.records[position] = record;
                UpsertKind::Replaced
            }
            None => {
                self.index.insert(record.name.clone(), self.records.len());
                self.records.push(record);
                UpsertKind::Inserted
            }
        }
    }

    fn contains_match(&self, pattern: &KeyPattern) -> bool {
        self.records.iter().any(|r| pattern.matches(r.key()))
    }

    fn remove_first(&mut self, pattern: &KeyPattern) -> Option<CountryRecord> {
        let position = self.records.iter().position(|r| pattern.matches(r.key()))?;
        let removed = self.records.remove(position);
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), i))
            .collect();
        Some(removed)
    }
}

#[derive(Clone, Default)]
pub struct MemoryCatalogStore {
    inner: Arc<RwLock<StoreInner>>,
    snapshot: Option<Arc<PathBuf>>,
}

impl MemoryCatalogStore {
    /// Volatile store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store backed by a JSON snapshot, loading it when the file exists
    pub async fn with_snapshot(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let path = path.into();
        let records = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<CountryRecord>>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        component_info!(
            Component::Store,
            "📂 Opened catalog snapshot {} ({} records)",
            path.display(),
            records.len()
        );

        Ok(Self {
            inner: Arc::new(RwLock::new(StoreInner::from_records(records))),
            snapshot: Some(Arc::new(path)),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot.as_deref().map(PathBuf::as_path)
    }

    /// Write the snapshot via a temp file and rename
    async fn persist(&self, records: &[CountryRecord]) -> CatalogResult<()> {
        let Some(path) = self.snapshot.as_deref() else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_vec_pretty(records)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| CatalogError::store(format!("Failed to write {}: {e}", tmp_path.display())))?;
        fs::rename(&tmp_path, path)
            .await
            .map_err(|e| CatalogError::store(format!("Failed to replace {}: {e}", path.display())))?;

        component_debug!(Component::Store, "💾 Snapshot written ({} records)", records.len());
        Ok(())
    }

    /// Apply `change` to a copy, persist the copy, then swap it in
    async fn commit<T, C>(&self, inner: &mut StoreInner, change: C) -> CatalogResult<T>
    where
        C: FnOnce(&mut StoreInner) -> T + Send,
        T: Send,
    {
        if self.snapshot.is_none() {
            return Ok(change(inner));
        }

        let mut candidate = inner.clone();
        let value = change(&mut candidate);
        self.persist(&candidate.records).await?;
        *inner = candidate;
        Ok(value)
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn upsert(&self, record: CountryRecord) -> CatalogResult<UpsertKind> {
        let mut inner = self.inner.write().await;
        self.commit(&mut inner, |candidate| candidate.put(record)).await
    }

    async fn upsert_batch(
        &self,
        records: Vec<CountryRecord>,
        _concurrency: usize,
    ) -> Vec<(String, CatalogResult<UpsertKind>)> {
        if records.is_empty() {
            return Vec::new();
        }

        let keys: Vec<String> = records.iter().map(|r| r.name.clone()).collect();
        let mut inner = self.inner.write().await;
        let applied = self
            .commit(&mut inner, |candidate| {
                records.into_iter().map(|record| candidate.put(record)).collect::<Vec<_>>()
            })
            .await;

        match applied {
            Ok(kinds) => keys.into_iter().zip(kinds.into_iter().map(Ok)).collect(),
            Err(e) => {
                let message = e.to_string();
                keys.into_iter()
                    .map(|key| (key, Err(CatalogError::store(message.clone()))))
                    .collect()
            }
        }
    }

    async fn find_many(&self, filter: &CatalogFilter, sort: SortOrder) -> CatalogResult<Vec<CountryRecord>> {
        let inner = self.inner.read().await;
        let mut records: Vec<CountryRecord> = inner
            .records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        sort.apply(&mut records);
        Ok(records)
    }

    async fn find_one(&self, pattern: &KeyPattern) -> CatalogResult<Option<CountryRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.records.iter().find(|r| pattern.matches(r.key())).cloned())
    }

    async fn delete_one(&self, pattern: &KeyPattern) -> CatalogResult<u64> {
        let mut inner = self.inner.write().await;
        if !inner.contains_match(pattern) {
            return Ok(0);
        }
        let removed = self.commit(&mut inner, |candidate| candidate.remove_first(pattern)).await?;
        Ok(removed.map_or(0, |_| 1))
    }

    async fn count(&self) -> CatalogResult<u64> {
        Ok(self.inner.read().await.records.len() as u64)
    }
}
