//! Query engine façade
//!
//! Orchestrates one request end to end: metadata lookup, predicate
//! building, sort resolution, pagination. Stateless apart from the shared
//! metadata cache; concurrent requests share nothing else and run fully
//! independently.

mod errors;
mod request;

pub use errors::{EngineError, EngineResult};
pub use request::PageRequest;

use std::sync::Arc;

use tracing::debug;

use crate::pager::{PageResult, Pager};
use crate::predicate::PredicateBuilder;
use crate::schema::MetadataRegistry;
use crate::sort::SortResolver;
use crate::storage::StorageSession;

/// Generic paginated query engine
///
/// One instance serves every registered entity type. Requests flow one
/// way: metadata -> predicate + sort -> pager -> page result.
pub struct QueryEngine {
    registry: MetadataRegistry,
    storage: Arc<dyn StorageSession>,
}

impl QueryEngine {
    /// Create an engine over the given registry and storage capability
    pub fn new(registry: MetadataRegistry, storage: impl StorageSession + 'static) -> Self {
        Self {
            registry,
            storage: Arc::new(storage),
        }
    }

    /// Access the metadata registry
    pub fn registry(&self) -> &MetadataRegistry {
        &self.registry
    }

    /// Serve one filtered, searched, sorted page of an entity type
    ///
    /// `searchable_fields` selects which fields the free-text term spans,
    /// typically the two or three most relevant text fields of the entity.
    /// Fails only for an unregistered entity type or a storage failure;
    /// malformed request input degrades to fewer constraints instead.
    pub async fn get_page(
        &self,
        entity: &str,
        request: &PageRequest,
        searchable_fields: &[&str],
    ) -> EngineResult<PageResult> {
        let metadata = self.registry.describe(entity)?;

        let predicate = PredicateBuilder::build(
            &metadata,
            &request.field_filters,
            request.search_term.as_deref(),
            searchable_fields,
        );
        let sort = SortResolver::resolve(
            &metadata,
            request.sort_field.as_deref(),
            request.sort_direction,
        );

        debug!(
            entity,
            page = request.page,
            limit = request.limit,
            sort_field = %sort.field,
            direction = sort.direction.as_str(),
            filters = predicate.filters.len(),
            searched_fields = predicate.search.len(),
            "serving page"
        );

        let result = Pager::paginate(
            self.storage.as_ref(),
            entity,
            &predicate,
            &sort,
            request.page,
            request.limit,
        )
        .await?;
        Ok(result)
    }
}
