//! In-memory storage backend
//!
//! Holds per-entity record lists behind a read lock and answers count and
//! fetch by scanning with the predicate tree. Reference `StorageSession`
//! implementation for tests and embedded use; not a persistence engine.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::predicate::PredicateTree;
use crate::sort::SortSpec;

use super::{StorageFuture, StorageSession};

/// Maps entity type name to its record list
type RecordStore = HashMap<String, Vec<Value>>;

/// Scanning in-memory record store
pub struct MemoryStorage {
    records: RwLock<RecordStore>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the record set for an entity type
    pub fn load(&self, entity: impl Into<String>, records: Vec<Value>) {
        self.lock_write().insert(entity.into(), records);
    }

    /// Append one record to an entity type
    pub fn insert(&self, entity: &str, record: Value) {
        self.lock_write()
            .entry(entity.to_string())
            .or_default()
            .push(record);
    }

    /// Number of records stored for an entity type, unfiltered
    pub fn len(&self, entity: &str) -> usize {
        self.lock_read().get(entity).map_or(0, Vec::len)
    }

    /// Returns true if no records are stored for the entity type
    pub fn is_empty(&self, entity: &str) -> bool {
        self.len(entity) == 0
    }

    /// Records matching the predicate, unsorted
    fn matching(&self, entity: &str, predicate: &PredicateTree) -> Vec<Value> {
        self.lock_read()
            .get(entity)
            .map(|rows| {
                rows.iter()
                    .filter(|row| predicate.matches(row))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    // Records are plain JSON values, nothing to repair after a panic;
    // recover the guard.
    fn lock_read(&self) -> std::sync::RwLockReadGuard<'_, RecordStore> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_write(&self) -> std::sync::RwLockWriteGuard<'_, RecordStore> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageSession for MemoryStorage {
    fn count<'a>(
        &'a self,
        entity: &'a str,
        predicate: &'a PredicateTree,
    ) -> StorageFuture<'a, u64> {
        let total = self.matching(entity, predicate).len() as u64;
        Box::pin(async move { Ok(total) })
    }

    fn fetch<'a>(
        &'a self,
        entity: &'a str,
        predicate: &'a PredicateTree,
        sort: &'a SortSpec,
        offset: u64,
        limit: u64,
    ) -> StorageFuture<'a, Vec<Value>> {
        let mut rows = self.matching(entity, predicate);
        rows.sort_by(|a, b| sort.compare(a, b));
        let window: Vec<Value> = rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Box::pin(async move { Ok(window) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Predicate;
    use crate::sort::{SortDirection, SortSpec};
    use serde_json::json;

    fn spec_by(field: &str) -> SortSpec {
        SortSpec {
            field: field.to_string(),
            direction: SortDirection::Ascending,
            tie_break: "id".to_string(),
        }
    }

    fn seeded() -> MemoryStorage {
        let storage = MemoryStorage::new();
        storage.load(
            "cars",
            vec![
                json!({"id": 1, "make": "Toyota", "year": 2020}),
                json!({"id": 2, "make": "Honda", "year": 2021}),
                json!({"id": 3, "make": "Toyota", "year": 2021}),
            ],
        );
        storage
    }

    #[tokio::test]
    async fn test_count_matches_predicate() {
        let storage = seeded();
        let tree = PredicateTree {
            filters: vec![Predicate::contains("make", "toyota")],
            search: Vec::new(),
        };
        assert_eq!(storage.count("cars", &tree).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fetch_applies_sort_offset_limit() {
        let storage = seeded();
        let tree = PredicateTree::default();

        let rows = storage
            .fetch("cars", &tree, &spec_by("year"), 1, 10)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        // Year ties between ids 2 and 3 resolve by the identity tie-break.
        assert_eq!(rows[0]["id"], 2);
        assert_eq!(rows[1]["id"], 3);
    }

    #[tokio::test]
    async fn test_unknown_entity_yields_empty() {
        let storage = seeded();
        let tree = PredicateTree::default();
        assert_eq!(storage.count("boats", &tree).await.unwrap(), 0);
        assert!(storage
            .fetch("boats", &tree, &spec_by("id"), 0, 10)
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_insert_appends() {
        let storage = seeded();
        storage.insert("cars", json!({"id": 4, "make": "Fiat", "year": 1999}));
        assert_eq!(storage.len("cars"), 4);
        assert!(!storage.is_empty("cars"));
        assert!(storage.is_empty("boats"));
    }
}
