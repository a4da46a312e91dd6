//! Field metadata type definitions
//!
//! Supported semantic types:
//! - text: UTF-8 string, substring-matched
//! - integer: 64-bit signed integer
//! - decimal: 64-bit floating point
//! - boolean: true/false
//! - timestamp: ISO-8601 instant
//! - enumeration: closed set of labels

use serde::{Deserialize, Serialize};

/// Semantic type of a scalar entity field
///
/// The semantic type decides how raw filter values coerce and how records
/// compare when sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SemanticType {
    /// UTF-8 string
    Text,
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point
    Decimal,
    /// Boolean
    Boolean,
    /// ISO-8601 date/time
    Timestamp,
    /// Closed set of case-sensitive labels
    Enumeration {
        /// Declared labels, in declaration order
        labels: Vec<String>,
    },
}

impl SemanticType {
    /// Returns the type name for log and error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            SemanticType::Text => "text",
            SemanticType::Integer => "integer",
            SemanticType::Decimal => "decimal",
            SemanticType::Boolean => "boolean",
            SemanticType::Timestamp => "timestamp",
            SemanticType::Enumeration { .. } => "enumeration",
        }
    }
}

/// Reflected metadata for one field of an entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within the entity
    pub name: String,
    /// Semantic type driving coercion and comparison
    #[serde(flatten)]
    pub semantic_type: SemanticType,
    /// Whether the field may be used as a sort key
    pub sortable: bool,
    /// Whether the field accepts filters
    pub filterable: bool,
}

impl FieldDescriptor {
    /// Create a descriptor that is sortable and filterable (the default for
    /// all scalar types)
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            sortable: true,
            filterable: true,
        }
    }

    /// Create a text field descriptor
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, SemanticType::Text)
    }

    /// Create an integer field descriptor
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, SemanticType::Integer)
    }

    /// Create a decimal field descriptor
    pub fn decimal(name: impl Into<String>) -> Self {
        Self::new(name, SemanticType::Decimal)
    }

    /// Create a boolean field descriptor
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, SemanticType::Boolean)
    }

    /// Create a timestamp field descriptor
    pub fn timestamp(name: impl Into<String>) -> Self {
        Self::new(name, SemanticType::Timestamp)
    }

    /// Create an enumeration field descriptor with the declared labels
    pub fn enumeration(
        name: impl Into<String>,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::new(
            name,
            SemanticType::Enumeration {
                labels: labels.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Mark the field as not usable for sorting
    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Mark the field as not accepting filters
    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }
}

/// Complete reflected metadata for one entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Entity type name
    pub entity: String,
    /// Unique identifier field, used as the sort fallback and tie-break
    pub identity_field: String,
    /// Field descriptors in the entity's declared order
    pub fields: Vec<FieldDescriptor>,
}

impl EntityMetadata {
    /// Create metadata for an entity type
    pub fn new(
        entity: impl Into<String>,
        identity_field: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        Self {
            entity: entity.into(),
            identity_field: identity_field.into(),
            fields,
        }
    }

    /// Look up the descriptor for a field name
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns true if the entity declares the field
    pub fn has_field(&self, name: &str) -> bool {
        self.descriptor(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> EntityMetadata {
        EntityMetadata::new(
            "cars",
            "id",
            vec![
                FieldDescriptor::integer("id"),
                FieldDescriptor::text("make"),
                FieldDescriptor::decimal("price"),
                FieldDescriptor::enumeration("status", ["new", "used"]),
            ],
        )
    }

    #[test]
    fn test_descriptor_lookup() {
        let metadata = sample_metadata();
        assert!(metadata.has_field("make"));
        assert!(!metadata.has_field("nonexistent"));

        let price = metadata.descriptor("price").unwrap();
        assert_eq!(price.semantic_type, SemanticType::Decimal);
    }

    #[test]
    fn test_fields_keep_declared_order() {
        let metadata = sample_metadata();
        let names: Vec<&str> = metadata.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "make", "price", "status"]);
    }

    #[test]
    fn test_descriptor_defaults() {
        let field = FieldDescriptor::text("name");
        assert!(field.sortable);
        assert!(field.filterable);

        let hidden = FieldDescriptor::text("notes").not_sortable().not_filterable();
        assert!(!hidden.sortable);
        assert!(!hidden.filterable);
    }

    #[test]
    fn test_semantic_type_names() {
        assert_eq!(SemanticType::Text.type_name(), "text");
        assert_eq!(SemanticType::Integer.type_name(), "integer");
        assert_eq!(SemanticType::Decimal.type_name(), "decimal");
        assert_eq!(SemanticType::Boolean.type_name(), "boolean");
        assert_eq!(SemanticType::Timestamp.type_name(), "timestamp");
        assert_eq!(
            SemanticType::Enumeration { labels: Vec::new() }.type_name(),
            "enumeration"
        );
    }
}
