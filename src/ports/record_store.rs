//! Generic record store port.
//!
//! The store knows nothing about payments or users: it holds dynamic records
//! grouped into named collections, each record a flat map of JSON values
//! keyed by field name. Typed repositories sit on top and do the mapping.
//!
//! # Concurrency
//!
//! `save_if` is the only coordination primitive. It writes the record only if
//! one stored field still holds the expected value, which is enough for
//! monotonic status updates racing each other on the same record.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;

use crate::domain::foundation::DomainError;

/// One stored record: collection, id and dynamic fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    collection: String,
    id: String,
    fields: Map<String, Value>,
}

impl Record {
    /// Creates an empty record that is not yet persisted.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Rebuilds a record read back from storage.
    pub fn from_fields(
        collection: impl Into<String>,
        id: impl Into<String>,
        fields: Map<String, Value>,
    ) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            fields,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.fields.get(key).and_then(Value::as_i64)
    }
}

/// Conjunction of field equality conditions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `field == value`.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    /// True when every condition holds for `record`.
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Ordering on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Descending,
        }
    }

    /// Compares two records on the sort field. Missing values sort first.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ordering = compare_values(a.get(&self.field), b.get(&self.field));
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Port for the external record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Finds a record by id. Returns `None` if absent.
    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Record>, DomainError>;

    /// Finds the first record matching `filter`. Returns `None` if none match.
    async fn find_first_by_filter(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Record>, DomainError>;

    /// Finds up to `limit` records matching `filter`, optionally sorted.
    async fn find_by_filter(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Option<&Sort>,
        limit: usize,
    ) -> Result<Vec<Record>, DomainError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// - `Conflict` if a record with the same id already exists
    /// - `DatabaseError` on persistence failure
    async fn create(&self, record: &Record) -> Result<(), DomainError>;

    /// Inserts or replaces a record.
    async fn save(&self, record: &Record) -> Result<(), DomainError>;

    /// Replaces a record only if its stored `field` equals `expected`.
    ///
    /// Returns `false` without writing when the record is missing or the
    /// stored value differs.
    async fn save_if(
        &self,
        record: &Record,
        field: &str,
        expected: &Value,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(name: &str, created: &str, enabled: bool) -> Record {
        let mut record = Record::new("products", name);
        record.set("name", name);
        record.set("created", created);
        record.set("enabled", enabled);
        record.set("price", 130.43);
        record
    }

    #[test]
    fn record_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn RecordStore) {}
    }

    #[test]
    fn typed_getters_read_matching_types_only() {
        let mut record = product("P1", "2024-01-01", true);
        record.set("count", 3);

        assert_eq!(record.get_string("name"), Some("P1"));
        assert_eq!(record.get_bool("enabled"), Some(true));
        assert_eq!(record.get_float("price"), Some(130.43));
        assert_eq!(record.get_i64("count"), Some(3));
        assert_eq!(record.get_string("enabled"), None);
        assert_eq!(record.get_bool("missing"), None);
    }

    #[test]
    fn filter_requires_all_conditions() {
        let record = product("P1", "2024-01-01", true);

        assert!(Filter::new().matches(&record));
        assert!(Filter::new().eq("name", "P1").eq("enabled", true).matches(&record));
        assert!(!Filter::new().eq("name", "P1").eq("enabled", false).matches(&record));
        assert!(!Filter::new().eq("absent", json!(null)).matches(&record));
    }

    #[test]
    fn sort_descending_puts_newest_first() {
        let old = product("old", "2024-01-01T00:00:00.000000Z", true);
        let new = product("new", "2024-06-01T00:00:00.000000Z", true);
        let sort = Sort::descending("created");

        let mut records = vec![old.clone(), new.clone()];
        records.sort_by(|a, b| sort.compare(a, b));

        assert_eq!(records, vec![new, old]);
    }
}
