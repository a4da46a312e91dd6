//! Storage capability errors

use thiserror::Error;

/// Result type for storage calls
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure of an underlying storage call
///
/// Fatal to the request: the engine returns no partial result and performs
/// no retries. Retrying, if wanted, belongs to the storage implementation.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Connection lost or backend refused the call
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete within the backend's deadline
    #[error("storage call timed out after {0}ms")]
    Timeout(u64),
}
