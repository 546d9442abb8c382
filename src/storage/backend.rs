//! StorageBackend - Key-Value Capability
//!
//! TigerStyle: All persistence goes through an injectable interface.
//!
//! The browser's `localStorage` is a process-global singleton; here it
//! becomes a capability handed to the stores, so tests run against an
//! in-memory backend and production against files (or anything else that
//! maps string keys to string values).

use super::error::StorageResult;

/// A synchronous string key-value store.
///
/// Contract:
/// - `read` of an absent key is `Ok(None)`, not an error.
/// - `erase` of an absent key is `Ok(())`.
/// - `write` either stores the full value or fails leaving the prior
///   value intact; no partial writes.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any prior value.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the value under `key`, tolerating absence.
    fn erase(&self, key: &str) -> StorageResult<()>;
}
