//! JsonStorage - Guarded JSON Primitives
//!
//! TigerStyle: Storage failures degrade, they never propagate.
//!
//! Persistence is a best-effort side channel subordinate to the caller's
//! session: a malformed payload or a rejected write must never abort
//! program flow. Every failure is caught here, logged with its key, and
//! converted into the benign default (absence, empty collection, no-op).
//! Internally each step is `Result`-typed; only this outward surface
//! swallows.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::backend::StorageBackend;

/// Guarded JSON read/write/erase over an injected backend.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct JsonStorage {
    backend: Arc<dyn StorageBackend>,
}

impl JsonStorage {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Decode raw text into `T`, treating decode failure as absence.
    ///
    /// Guarantees: never panics, never returns an error. A malformed
    /// payload is logged and yields `None`, exactly like a missing key.
    #[must_use]
    pub fn parse<T: DeserializeOwned>(key: &str, raw: Option<String>) -> Option<T> {
        let raw = raw?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "malformed stored value, treating as absent");
                None
            }
        }
    }

    /// Read and decode the collection under `key`.
    ///
    /// Always returns a valid vec: missing key, read failure, and decode
    /// failure all yield an empty one.
    #[must_use]
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.read_object(key).unwrap_or_default()
    }

    /// Read and decode the single object under `key`, if present and valid.
    #[must_use]
    pub fn read_object<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.read(key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "storage read failed, treating as absent");
                None
            }
        };
        Self::parse(key, raw)
    }

    /// Serialize `value` and persist it under `key`.
    ///
    /// A failed write is logged and swallowed; the stored state remains
    /// whatever it was before the attempt.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "failed to serialize value, write dropped");
                return;
            }
        };
        if let Err(e) = self.backend.write(key, &raw) {
            tracing::warn!(key = %key, error = %e, "storage write failed, value dropped");
        }
    }

    /// Remove the value under `key`, tolerating absence.
    pub fn erase(&self, key: &str) {
        if let Err(e) = self.backend.erase(key) {
            tracing::warn!(key = %key, error = %e, "storage erase failed");
        }
    }

    /// Whether any value (decodable or not) is stored under `key`.
    ///
    /// A failed read counts as absent.
    #[must_use]
    pub fn exists(&self, key: &str) -> bool {
        matches!(self.backend.read(key), Ok(Some(_)))
    }
}

impl std::fmt::Debug for JsonStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonStorage").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    fn storage_with_backend() -> (JsonStorage, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        (JsonStorage::new(backend.clone()), backend)
    }

    #[test]
    fn test_parse_absent_is_none() {
        assert_eq!(JsonStorage::parse::<Vec<u32>>("k", None), None);
    }

    #[test]
    fn test_parse_malformed_is_none() {
        let parsed = JsonStorage::parse::<Vec<u32>>("k", Some("not json".to_string()));
        assert_eq!(parsed, None);
    }

    #[test]
    fn test_read_collection_missing_key_is_empty() {
        let (storage, _) = storage_with_backend();
        let items: Vec<u32> = storage.read_collection("missing");
        assert!(items.is_empty());
    }

    #[test]
    fn test_read_collection_malformed_is_empty() {
        let (storage, backend) = storage_with_backend();
        backend.plant("k", "not json");

        let items: Vec<u32> = storage.read_collection("k");

        assert!(items.is_empty());
    }

    #[test]
    fn test_write_read_roundtrip() {
        let (storage, _) = storage_with_backend();

        storage.write("k", &vec![1u32, 2, 3]);

        let items: Vec<u32> = storage.read_collection("k");
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_failed_write_leaves_prior_state() {
        let backend = Arc::new(MemoryBackend::with_capacity(16));
        let storage = JsonStorage::new(backend);

        storage.write("k", &vec![1u32]);
        // Too large for the cap: swallowed, prior value intact.
        storage.write("k", &vec![1u32; 64]);

        let items: Vec<u32> = storage.read_collection("k");
        assert_eq!(items, vec![1]);
    }

    #[test]
    fn test_erase_then_read_is_empty() {
        let (storage, _) = storage_with_backend();
        storage.write("k", &vec![1u32]);

        storage.erase("k");

        let items: Vec<u32> = storage.read_collection("k");
        assert!(items.is_empty());
    }

    #[test]
    fn test_exists_counts_undecodable_values() {
        let (storage, backend) = storage_with_backend();
        assert!(!storage.exists("k"));

        backend.plant("k", "not json");

        // Present-but-malformed still exists; only init cares.
        assert!(storage.exists("k"));
    }
}
