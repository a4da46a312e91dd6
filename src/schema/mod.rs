//! Entity metadata subsystem
//!
//! Every entity type served by the engine is described once by an ordered
//! list of field descriptors. Descriptors drive the type-aware filter
//! coercion and sort validation; they are derived on first use and cached
//! for the process lifetime.
//!
//! # Invariants
//!
//! - Reflection is deterministic and total: a provider always yields the
//!   same descriptors, and an entity with zero scalar fields yields an
//!   empty but valid list.
//! - The cache is write-once per key; a first-use race recomputes the
//!   identical metadata and either copy may win.

mod errors;
mod registry;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use registry::{EntityMetadataProvider, MetadataRegistry, StaticMetadata};
pub use types::{EntityMetadata, FieldDescriptor, SemanticType};
