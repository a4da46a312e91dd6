//! Offset pagination over the storage capability
//!
//! Clamps page and limit, issues the count query followed by the fetch
//! query with the same predicate tree, and assembles the page result.
//!
//! The two calls are not wrapped in a snapshot: a row written between them
//! can make `total` and `items` differ by one. Accepted trade-off for a
//! read-mostly listing path; storage failures propagate unchanged.

mod result;

pub use result::PageResult;

use crate::predicate::PredicateTree;
use crate::sort::SortSpec;
use crate::storage::{StorageResult, StorageSession};

/// Page sizes a request may ask for
pub const ALLOWED_LIMITS: [u64; 4] = [10, 25, 50, 100];

/// Page size used when the requested one is not allow-listed
pub const DEFAULT_LIMIT: u64 = 10;

/// Clamp a requested page number to >= 1
pub fn clamp_page(page: u64) -> u64 {
    page.max(1)
}

/// Clamp a requested limit to the allow-listed set
pub fn clamp_limit(limit: u64) -> u64 {
    if ALLOWED_LIMITS.contains(&limit) {
        limit
    } else {
        DEFAULT_LIMIT
    }
}

/// `ceil(total / limit)`, minimum 1 even for an empty set
pub fn total_pages(total: u64, limit: u64) -> u64 {
    (total.div_ceil(limit)).max(1)
}

/// Issues the count and fetch queries for one request
pub struct Pager;

impl Pager {
    /// Serve one page through the storage capability
    ///
    /// Both queries use the same predicate tree so `total` always reflects
    /// the full matching set for the filters that produced `items`.
    pub async fn paginate(
        storage: &dyn StorageSession,
        entity: &str,
        predicate: &PredicateTree,
        sort: &SortSpec,
        page: u64,
        limit: u64,
    ) -> StorageResult<PageResult> {
        let page = clamp_page(page);
        let limit = clamp_limit(limit);

        let total = storage.count(entity, predicate).await?;
        // A page far past the end must yield an empty page, not an
        // arithmetic overflow.
        let offset = (page - 1).saturating_mul(limit);
        let items = storage.fetch(entity, predicate, sort, offset, limit).await?;

        Ok(PageResult {
            items,
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;
    use crate::storage::{MemoryStorage, StorageError, StorageFuture};
    use serde_json::{json, Value};

    fn id_sort() -> SortSpec {
        SortSpec {
            field: "id".to_string(),
            direction: SortDirection::Ascending,
            tie_break: "id".to_string(),
        }
    }

    fn storage_with(n: i64) -> MemoryStorage {
        let storage = MemoryStorage::new();
        storage.load(
            "items",
            (1..=n).map(|i| json!({"id": i})).collect::<Vec<Value>>(),
        );
        storage
    }

    /// Storage stub whose calls always fail
    struct BrokenStorage;

    impl StorageSession for BrokenStorage {
        fn count<'a>(
            &'a self,
            _entity: &'a str,
            _predicate: &'a PredicateTree,
        ) -> StorageFuture<'a, u64> {
            Box::pin(async { Err(StorageError::Unavailable("offline".to_string())) })
        }

        fn fetch<'a>(
            &'a self,
            _entity: &'a str,
            _predicate: &'a PredicateTree,
            _sort: &'a SortSpec,
            _offset: u64,
            _limit: u64,
        ) -> StorageFuture<'a, Vec<Value>> {
            Box::pin(async { Err(StorageError::Unavailable("offline".to_string())) })
        }
    }

    #[test]
    fn test_clamping() {
        assert_eq!(clamp_page(0), 1);
        assert_eq!(clamp_page(7), 7);
        assert_eq!(clamp_limit(25), 25);
        assert_eq!(clamp_limit(100), 100);
        assert_eq!(clamp_limit(0), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(33), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(1_000_000), DEFAULT_LIMIT);
    }

    #[test]
    fn test_total_pages_rounds_up_with_floor_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(245, 10), 25);
    }

    #[tokio::test]
    async fn test_paginate_first_and_last_page() {
        let storage = storage_with(25);
        let tree = PredicateTree::default();

        let first = Pager::paginate(&storage, "items", &tree, &id_sort(), 1, 10)
            .await
            .unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total, 25);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items[0]["id"], 1);

        let last = Pager::paginate(&storage, "items", &tree, &id_sort(), 3, 10)
            .await
            .unwrap();
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.total, 25);
        assert_eq!(last.items[0]["id"], 21);
    }

    #[tokio::test]
    async fn test_page_beyond_end_returns_empty_with_total() {
        let storage = storage_with(25);
        let tree = PredicateTree::default();

        let result = Pager::paginate(&storage, "items", &tree, &id_sort(), 9, 10)
            .await
            .unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total, 25);
        assert_eq!(result.total_pages, 3);
    }

    #[tokio::test]
    async fn test_out_of_range_request_is_normalized() {
        let storage = storage_with(5);
        let tree = PredicateTree::default();

        let result = Pager::paginate(&storage, "items", &tree, &id_sort(), 0, 9999)
            .await
            .unwrap();
        assert_eq!(result.page, 1);
        assert_eq!(result.limit, DEFAULT_LIMIT);
        assert_eq!(result.items.len(), 5);
    }

    #[tokio::test]
    async fn test_huge_page_saturates_offset() {
        let storage = storage_with(5);
        let tree = PredicateTree::default();

        let result = Pager::paginate(&storage, "items", &tree, &id_sort(), u64::MAX, 10)
            .await
            .unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total, 5);
        assert_eq!(result.page, u64::MAX);
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let tree = PredicateTree::default();
        let result = Pager::paginate(&BrokenStorage, "items", &tree, &id_sort(), 1, 10).await;
        assert!(matches!(result, Err(StorageError::Unavailable(_))));
    }
}
