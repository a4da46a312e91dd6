//! Type-aware predicate construction from untrusted request input
//!
//! Coercion rules per semantic type:
//! - text: case-insensitive substring match, never equality
//! - integer/decimal: the raw string must parse exactly, else dropped
//! - boolean: "true"/"1" and "false"/"0", else dropped
//! - timestamp: strict ISO-8601, else dropped
//! - enumeration: exact case-sensitive label, else dropped
//!
//! Dropping is silent toward the caller (debug log only); a typo in a
//! filter value must narrow functionality, not break the page.

use std::collections::HashMap;

use tracing::debug;

use crate::schema::{EntityMetadata, FieldDescriptor, SemanticType};

use super::tree::{parse_timestamp, FilterOp, Predicate, PredicateTree};

/// Builds predicate trees from raw filter values and search terms
pub struct PredicateBuilder;

impl PredicateBuilder {
    /// Build the predicate tree for one request
    ///
    /// Total: never fails. Unknown field names, non-filterable fields, and
    /// uncoercible values are elided. A blank search term, or a search term
    /// with no usable searchable fields, yields no search group.
    pub fn build(
        metadata: &EntityMetadata,
        field_filters: &HashMap<String, String>,
        search_term: Option<&str>,
        searchable_fields: &[&str],
    ) -> PredicateTree {
        let mut tree = PredicateTree::default();

        for (field, raw) in field_filters {
            if raw.is_empty() {
                continue;
            }
            let descriptor = match metadata.descriptor(field) {
                Some(d) => d,
                None => {
                    debug!(entity = %metadata.entity, field = %field, "dropping filter on unknown field");
                    continue;
                }
            };
            if !descriptor.filterable {
                debug!(entity = %metadata.entity, field = %field, "dropping filter on non-filterable field");
                continue;
            }
            match Self::coerce(descriptor, raw) {
                Some(op) => {
                    debug!(
                        entity = %metadata.entity,
                        field = %field,
                        op = op.op_name(),
                        "applying field filter"
                    );
                    tree.filters.push(Predicate {
                        field: field.clone(),
                        op,
                    });
                }
                None => {
                    debug!(
                        entity = %metadata.entity,
                        field = %field,
                        value = %raw,
                        field_type = descriptor.semantic_type.type_name(),
                        "dropping filter with uncoercible value"
                    );
                }
            }
        }

        let term = search_term.map(str::trim).filter(|t| !t.is_empty());
        if let Some(term) = term {
            if searchable_fields.is_empty() {
                debug!(entity = %metadata.entity, "ignoring search term: no searchable fields configured");
            }
            for field in searchable_fields {
                if metadata.has_field(field) {
                    tree.search.push(Predicate::contains(*field, term));
                } else {
                    debug!(entity = %metadata.entity, field = %field, "skipping search field not declared on entity");
                }
            }
        }

        tree
    }

    /// Coerce a raw filter value to a typed comparison, or reject it
    fn coerce(descriptor: &FieldDescriptor, raw: &str) -> Option<FilterOp> {
        match &descriptor.semantic_type {
            SemanticType::Text => Some(FilterOp::Contains(raw.to_lowercase())),
            SemanticType::Integer => raw.parse::<i64>().ok().map(FilterOp::EqInt),
            SemanticType::Decimal => raw
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(FilterOp::EqDecimal),
            SemanticType::Boolean => match raw {
                "true" | "1" => Some(FilterOp::EqBool(true)),
                "false" | "0" => Some(FilterOp::EqBool(false)),
                _ => None,
            },
            SemanticType::Timestamp => parse_timestamp(raw).map(FilterOp::EqTimestamp),
            SemanticType::Enumeration { labels } => labels
                .iter()
                .any(|label| label == raw)
                .then(|| FilterOp::EqLabel(raw.to_string())),
        }
    }
}
