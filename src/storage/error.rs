//! Storage Errors
//!
//! TigerStyle: Explicit error taxonomy, no stringly-typed catch-alls.
//!
//! These errors never cross the public API of the crate: the primitives
//! layer ([`JsonStorage`](super::JsonStorage)) catches them, logs them,
//! and degrades to an empty/no-op result. They exist so backends can
//! report failures precisely and so tests can assert on them.

/// Result alias for backend operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors a [`StorageBackend`](super::StorageBackend) can report.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem failure in a file-backed store.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend's capacity cap would be exceeded by this write.
    #[error("capacity exceeded: {needed_bytes} > {cap_bytes}")]
    CapacityExceeded {
        /// Total bytes the store would hold after the write.
        needed_bytes: usize,
        /// Configured capacity in bytes.
        cap_bytes: usize,
    },

    /// Any other backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Construct a backend-specific error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
