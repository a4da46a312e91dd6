//! Predicate subsystem
//!
//! Turns a validated page request (field filters plus an optional search
//! term) into a boolean predicate tree, using field descriptors to choose
//! comparison semantics per field.
//!
//! # Guarantees
//!
//! - Building never fails: malformed filter values are dropped, so bad
//!   input narrows functionality rather than failing the request.
//! - The same tree instance drives both the count and the fetch call of a
//!   request, keeping `total` and `items` consistent with each other.

mod builder;
mod tree;

pub use builder::PredicateBuilder;
pub use tree::{parse_timestamp, FilterOp, Predicate, PredicateTree};
