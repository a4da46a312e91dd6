//! Page result type

use serde::Serialize;
use serde_json::Value;

/// One page of matching records plus pagination metadata
///
/// Serializes to the wire contract expected by transport layers:
///
/// ```json
/// {"items": [...], "total": 245, "page": 1, "limit": 10, "total_pages": 25}
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    /// Records for the requested page, in sort order; at most `limit`
    pub items: Vec<Value>,
    /// Count of all records matching the predicate, independent of paging
    pub total: u64,
    /// Page number after clamping
    pub page: u64,
    /// Page size after clamping
    pub limit: u64,
    /// `ceil(total / limit)`, minimum 1
    pub total_pages: u64,
}

impl PageResult {
    /// Returns true if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
