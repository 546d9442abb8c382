//! FitTrack Store - Local-First Persistence Core
//!
//! TigerStyle persistence layer for a personal fitness tracker: a guarded
//! JSON key-value layer, a generic record store, and typed services for
//! activities, weighings, and settings.
//!
//! # Philosophy
//!
//! Persistence is a best-effort side channel subordinate to the caller's
//! session. A malformed payload or a full store must never crash the
//! caller: failures are logged at the primitives boundary and degrade to
//! empty/default values. Missing targets are values (`None`/`false`),
//! not errors.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  ActivityService / WeighingService / Settings     │
//! ├──────────────────────────────────────────────────┤
//! │  RecordStore<T>       │ list/add/update/remove    │
//! ├──────────────────────────────────────────────────┤
//! │  JsonStorage          │ guarded parse/write/erase │
//! ├──────────────────────────────────────────────────┤
//! │  StorageBackend       │ Memory / File             │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! All operations are synchronous read-modify-write of whole values;
//! there is no locking across processes and last write wins.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use fittrack_store::{ActivityService, MemoryBackend, NewActivity};
//!
//! let backend = Arc::new(MemoryBackend::new());
//! let activities = ActivityService::new(backend);
//!
//! let saved = activities.save(NewActivity { steps: 1000, calories: 50 });
//! assert!(!saved.id.is_empty());
//! assert_eq!(activities.list(), vec![saved]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod clock;
pub mod constants;
pub mod record;
pub mod services;
pub mod storage;

// Re-export common types
pub use clock::{ManualClock, SystemTime, TimeSource};
pub use constants::*;
pub use record::{IdStrategy, Record, RecordStore};
pub use services::{
    Activity, ActivityService, NewActivity, NewWeighing, Settings, SettingsPatch,
    SettingsService, Weighing, WeighingService,
};
pub use storage::{FileBackend, JsonStorage, MemoryBackend, StorageBackend, StorageError, StorageResult};
