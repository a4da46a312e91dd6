//! Storage access capability
//!
//! The engine reads through a narrow two-operation capability: count the
//! records matching a predicate, and fetch one ordered window of them.
//! Implementations own connections, retries, and cooperative cancellation;
//! the engine only sequences the calls.

mod errors;
mod memory;

pub use errors::{StorageError, StorageResult};
pub use memory::MemoryStorage;

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::predicate::PredicateTree;
use crate::sort::SortSpec;

/// Boxed future returned by storage calls
pub type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = StorageResult<T>> + Send + 'a>>;

/// Read capability over an entity store
pub trait StorageSession: Send + Sync {
    /// Count records matching the predicate, independent of pagination
    fn count<'a>(&'a self, entity: &'a str, predicate: &'a PredicateTree)
        -> StorageFuture<'a, u64>;

    /// Fetch one window of matching records in the given total order
    fn fetch<'a>(
        &'a self,
        entity: &'a str,
        predicate: &'a PredicateTree,
        sort: &'a SortSpec,
        offset: u64,
        limit: u64,
    ) -> StorageFuture<'a, Vec<Value>>;
}
