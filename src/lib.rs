//! datagrid - a generic server-side pagination, filtering, and sorting engine
//!
//! Given the reflected field metadata of an entity type, the engine turns
//! untrusted request parameters into a typed predicate tree, resolves a
//! total sort order, and serves one page of matching records together with
//! an exact total count. It works for any registered entity type without
//! per-entity query code.

pub mod engine;
pub mod pager;
pub mod predicate;
pub mod schema;
pub mod sort;
pub mod storage;
