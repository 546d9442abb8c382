//! Storage - Backend Trait and Implementations
//!
//! TigerStyle: Abstract storage with deterministic testing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  JsonStorage (guarded JSON)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    StorageBackend Trait                      │
//! └─────────────────────────────────────────────────────────────┘
//!          ↑                              ↑
//!          │                              │
//! ┌────────┴────────┐           ┌────────┴────────┐
//! │  MemoryBackend  │           │   FileBackend   │
//! │ (tests/session) │           │  (production)   │
//! └─────────────────┘           └─────────────────┘
//! ```
//!
//! Backends report failures precisely; `JsonStorage` is the one place
//! those failures are logged and swallowed, so nothing above it ever
//! sees a storage error.

mod backend;
mod error;
mod file;
mod json;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use json::JsonStorage;
pub use memory::MemoryBackend;
