//! Sort resolution and deterministic record ordering
//!
//! Resolves the requested sort field against entity metadata, falling back
//! to the identity field, and always appends the identity field as an
//! ascending tie-break. The tie-break turns any sort into a total order,
//! which is what keeps pages from overlapping or skipping rows when the
//! primary sort column has ties.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::debug;

use crate::schema::EntityMetadata;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order
    #[default]
    Ascending,
    /// Descending order
    Descending,
}

impl SortDirection {
    /// Parses `asc`/`desc` (case-insensitive); anything else is ascending
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "desc" => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    /// Returns the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Resolved total ordering for one request
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    /// Primary sort field
    pub field: String,
    /// Primary sort direction
    pub direction: SortDirection,
    /// Identity field, applied ascending after the primary key
    ///
    /// Redundant when `field` is itself the identity field, harmless then.
    pub tie_break: String,
}

impl SortSpec {
    /// Compares two records under this spec
    ///
    /// Total as long as the tie-break field is unique per record.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        let primary = compare_values(a.get(&self.field), b.get(&self.field));
        let primary = match self.direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        primary.then_with(|| compare_values(a.get(&self.tie_break), b.get(&self.tie_break)))
    }
}

/// Validates sort requests against entity metadata
pub struct SortResolver;

impl SortResolver {
    /// Resolve the sort spec for one request
    ///
    /// An absent, unknown, or non-sortable sort field falls back to the
    /// identity field ascending; the requested direction is kept only for
    /// a valid field.
    pub fn resolve(
        metadata: &EntityMetadata,
        sort_field: Option<&str>,
        direction: SortDirection,
    ) -> SortSpec {
        let field = match sort_field {
            Some(name) => match metadata.descriptor(name) {
                Some(descriptor) if descriptor.sortable => name.to_string(),
                _ => {
                    debug!(
                        entity = %metadata.entity,
                        field = %name,
                        "sort field unknown or not sortable, falling back to identity field"
                    );
                    metadata.identity_field.clone()
                }
            },
            None => metadata.identity_field.clone(),
        };

        SortSpec {
            field,
            direction,
            tie_break: metadata.identity_field.clone(),
        }
    }
}

/// Compares two optional JSON values for sorting
///
/// Ordering rules: absent < null < bool < number < string; natural order
/// within a type. Arrays and objects are never sort keys and compare equal.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (a_val, b_val) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
        (Some(a_val), Some(b_val)) => (a_val, b_val),
    };

    let type_order = |v: &Value| -> u8 {
        match v {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
            Value::Object(_) => 5,
        }
    };

    let a_type = type_order(a_val);
    let b_type = type_order(b_val);
    if a_type != b_type {
        return a_type.cmp(&b_type);
    }

    match (a_val, b_val) {
        (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
        (Value::Number(a_n), Value::Number(b_n)) => {
            let a_f = a_n.as_f64().unwrap_or(0.0);
            let b_f = b_n.as_f64().unwrap_or(0.0);
            a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
        }
        (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
        _ => Ordering::Equal,
    }
}
