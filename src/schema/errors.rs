//! Schema subsystem errors

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Schema errors
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// No metadata provider registered for the entity type.
    ///
    /// This is a caller bug, not a data problem: requests only reach the
    /// engine for entity types the embedding application registered.
    #[error("unknown entity type: {0}")]
    UnknownEntity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_entity_message() {
        let err = SchemaError::UnknownEntity("cars".to_string());
        assert_eq!(err.to_string(), "unknown entity type: cars");
    }
}
