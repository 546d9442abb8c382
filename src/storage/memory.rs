//! MemoryBackend - In-Memory Storage
//!
//! TigerStyle: Deterministic testing backend, no filesystem.
//!
//! Also useful as a real backend for sessions that do not need to
//! survive the process. An optional capacity cap makes quota-exceeded
//! writes reproducible, so the swallow-and-log policy of the primitives
//! layer can be exercised without a real full disk.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::backend::StorageBackend;
use super::error::{StorageError, StorageResult};

/// In-memory key-value backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
    /// Total bytes of stored values allowed, if capped.
    cap_bytes: Option<usize>,
}

impl MemoryBackend {
    /// Create an unbounded in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that rejects writes once total stored value
    /// bytes would exceed `cap_bytes`.
    ///
    /// # Panics
    /// Panics if `cap_bytes` is zero.
    #[must_use]
    pub fn with_capacity(cap_bytes: usize) -> Self {
        assert!(cap_bytes > 0, "capacity must be non-zero");
        Self {
            entries: RwLock::new(HashMap::new()),
            cap_bytes: Some(cap_bytes),
        }
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the backend holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Store a raw value directly, bypassing the capacity cap.
    ///
    /// Test seam for corrupt-payload scenarios (e.g. planting text that
    /// is not valid JSON under a collection key).
    pub fn plant(&self, key: &str, raw: &str) {
        self.entries.write().insert(key.to_string(), raw.to_string());
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write();

        if let Some(cap_bytes) = self.cap_bytes {
            let current: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let needed_bytes = current + value.len();
            if needed_bytes > cap_bytes {
                return Err(StorageError::CapacityExceeded {
                    needed_bytes,
                    cap_bytes,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn erase(&self, key: &str) -> StorageResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}
