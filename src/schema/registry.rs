//! Entity metadata registry and read-through cache
//!
//! Providers are registered once at startup, one per concrete entity type.
//! Reflected metadata is computed lazily on first use and cached for the
//! process lifetime. The cache is append-only: concurrent first use may
//! recompute the same descriptors, and whichever copy lands first wins.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::errors::{SchemaError, SchemaResult};
use super::types::EntityMetadata;

/// Source of reflected metadata for one entity type
pub trait EntityMetadataProvider: Send + Sync {
    /// Entity type name this provider describes
    fn entity(&self) -> &str;

    /// Produce the ordered field descriptors
    ///
    /// Must be deterministic: every call yields the same metadata.
    fn describe(&self) -> EntityMetadata;
}

/// Provider backed by a fixed metadata value
///
/// Covers the common case where an entity's shape is known at registration
/// time and needs no computation.
pub struct StaticMetadata(pub EntityMetadata);

impl EntityMetadataProvider for StaticMetadata {
    fn entity(&self) -> &str {
        &self.0.entity
    }

    fn describe(&self) -> EntityMetadata {
        self.0.clone()
    }
}

/// Registry of metadata providers with a read-through cache
///
/// Shared across concurrent requests; reads take the lock only briefly and
/// the cached `Arc` values are immutable after insertion.
pub struct MetadataRegistry {
    providers: HashMap<String, Box<dyn EntityMetadataProvider>>,
    cache: RwLock<HashMap<String, Arc<EntityMetadata>>>,
}

impl MetadataRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Register a provider for its entity type
    ///
    /// Registering the same entity type twice replaces the provider and
    /// clears any cached metadata for it.
    pub fn register(&mut self, provider: impl EntityMetadataProvider + 'static) {
        let entity = provider.entity().to_string();
        self.providers.insert(entity.clone(), Box::new(provider));
        self.lock_write().remove(&entity);
    }

    /// Register fixed metadata directly
    pub fn register_static(&mut self, metadata: EntityMetadata) {
        self.register(StaticMetadata(metadata));
    }

    /// Returns the reflected metadata for an entity type
    ///
    /// Fails only when no provider was registered, which indicates a caller
    /// bug rather than bad request data.
    pub fn describe(&self, entity: &str) -> SchemaResult<Arc<EntityMetadata>> {
        if let Some(metadata) = self.lock_read().get(entity) {
            return Ok(Arc::clone(metadata));
        }

        let provider = self
            .providers
            .get(entity)
            .ok_or_else(|| SchemaError::UnknownEntity(entity.to_string()))?;
        let computed = Arc::new(provider.describe());

        // Another request may have populated the key between the read and
        // this write; both computed the same value, so keep the first.
        let mut cache = self.lock_write();
        let entry = cache
            .entry(entity.to_string())
            .or_insert_with(|| Arc::clone(&computed));
        Ok(Arc::clone(entry))
    }

    /// Returns the registered entity type names
    pub fn entities(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }

    // The cache holds only derived metadata, so a poisoned lock cannot
    // expose a broken invariant; recover the guard.
    fn lock_read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<EntityMetadata>>> {
        self.cache.read().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<EntityMetadata>>> {
        self.cache.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn cars_metadata() -> EntityMetadata {
        EntityMetadata::new(
            "cars",
            "id",
            vec![FieldDescriptor::integer("id"), FieldDescriptor::text("make")],
        )
    }

    /// Provider that counts how often it is asked to reflect
    struct CountingProvider {
        calls: Arc<AtomicUsize>,
    }

    impl EntityMetadataProvider for CountingProvider {
        fn entity(&self) -> &str {
            "cars"
        }

        fn describe(&self) -> EntityMetadata {
            self.calls.fetch_add(1, Ordering::SeqCst);
            cars_metadata()
        }
    }

    #[test]
    fn test_describe_registered_entity() {
        let mut registry = MetadataRegistry::new();
        registry.register_static(cars_metadata());

        let metadata = registry.describe("cars").unwrap();
        assert_eq!(metadata.entity, "cars");
        assert_eq!(metadata.identity_field, "id");
    }

    #[test]
    fn test_unknown_entity_is_rejected() {
        let registry = MetadataRegistry::new();
        let result = registry.describe("boats");
        assert!(matches!(result, Err(SchemaError::UnknownEntity(name)) if name == "boats"));
    }

    #[test]
    fn test_metadata_is_computed_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = MetadataRegistry::new();
        registry.register(CountingProvider {
            calls: Arc::clone(&calls),
        });

        for _ in 0..5 {
            registry.describe("cars").unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_entities_lists_registered_types() {
        let mut registry = MetadataRegistry::new();
        assert!(registry.entities().is_empty());

        registry.register_static(cars_metadata());
        registry.register_static(EntityMetadata::new(
            "contacts",
            "id",
            vec![FieldDescriptor::integer("id")],
        ));

        let mut entities = registry.entities();
        entities.sort_unstable();
        assert_eq!(entities, vec!["cars", "contacts"]);
    }

    #[test]
    fn test_reregistration_clears_cache() {
        let mut registry = MetadataRegistry::new();
        registry.register_static(cars_metadata());
        registry.describe("cars").unwrap();

        let replacement = EntityMetadata::new("cars", "vin", vec![FieldDescriptor::text("vin")]);
        registry.register_static(replacement);

        let metadata = registry.describe("cars").unwrap();
        assert_eq!(metadata.identity_field, "vin");
    }
}
