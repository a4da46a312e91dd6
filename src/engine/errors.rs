//! Engine façade errors

use thiserror::Error;

use crate::schema::SchemaError;
use crate::storage::StorageError;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Request-fatal engine failures
///
/// Malformed request input is never an error here: it is normalized or
/// dropped before any storage call is issued. Only a missing entity
/// registration (caller bug) or a failed storage call ends a request.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// No metadata registered for the requested entity type
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The underlying storage call failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}
