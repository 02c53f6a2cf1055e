//! In-memory record store.
//!
//! Backs development runs without a database and every integration test.
//! All records live behind one tokio `RwLock`, so `save_if` compares and
//! writes under a single write guard.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Filter, Record, RecordStore, Sort};

type Collection = BTreeMap<String, Record>;

/// Record store held entirely in process memory.
#[derive(Default)]
pub struct InMemoryRecordStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with `records`. Later duplicates win.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut collections: HashMap<String, Collection> = HashMap::new();
        for record in records {
            collections
                .entry(record.collection().to_string())
                .or_default()
                .insert(record.id().to_string(), record);
        }
        Self {
            collections: RwLock::new(collections),
        }
    }

    /// Number of records in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Record>, DomainError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned())
    }

    async fn find_first_by_filter(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Record>, DomainError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.values().find(|r| filter.matches(r)))
            .cloned())
    }

    async fn find_by_filter(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Option<&Sort>,
        limit: usize,
    ) -> Result<Vec<Record>, DomainError> {
        let collections = self.collections.read().await;
        let mut matched: Vec<Record> = collections
            .get(collection)
            .map(|records| {
                records
                    .values()
                    .filter(|r| filter.matches(r))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = sort {
            matched.sort_by(|a, b| sort.compare(a, b));
        }
        matched.truncate(limit);
        Ok(matched)
    }

    async fn create(&self, record: &Record) -> Result<(), DomainError> {
        let mut collections = self.collections.write().await;
        let records = collections.entry(record.collection().to_string()).or_default();
        if records.contains_key(record.id()) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Record '{}' already exists", record.id()),
            )
            .with_detail("collection", record.collection()));
        }
        records.insert(record.id().to_string(), record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> Result<(), DomainError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(record.collection().to_string())
            .or_default()
            .insert(record.id().to_string(), record.clone());
        Ok(())
    }

    async fn save_if(
        &self,
        record: &Record,
        field: &str,
        expected: &Value,
    ) -> Result<bool, DomainError> {
        let mut collections = self.collections.write().await;
        let Some(stored) = collections
            .get_mut(record.collection())
            .and_then(|records| records.get_mut(record.id()))
        else {
            return Ok(false);
        };

        if stored.get(field) != Some(expected) {
            return Ok(false);
        }
        *stored = record.clone();
        Ok(true)
    }
}
