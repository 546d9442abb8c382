//! Activity Service
//!
//! TigerStyle: Thin typed facade over the generic record store.
//!
//! Activities live under the `fittrack:activities` key. The service
//! stamps each saved record with its creation time at the moment of
//! save, independent of identifier generation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{SystemTime, TimeSource};
use crate::constants::ACTIVITIES_KEY;
use crate::record::{Record, RecordStore};
use crate::storage::{JsonStorage, StorageBackend};

// =============================================================================
// Types
// =============================================================================

/// One recorded activity session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier.
    pub id: String,
    /// Step count for the session.
    pub steps: u32,
    /// Calories burned.
    pub calories: u32,
    /// When the record was saved (ISO-8601 on the wire).
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Record for Activity {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn set_record_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Payload for a new activity; id and creation time are stamped on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    /// Step count for the session.
    pub steps: u32,
    /// Calories burned.
    pub calories: u32,
}

// =============================================================================
// Service
// =============================================================================

/// CRUD over the activities collection.
#[derive(Debug, Clone)]
pub struct ActivityService {
    store: RecordStore<Activity>,
    clock: Arc<dyn TimeSource>,
}

impl ActivityService {
    /// Create the service over `backend` with the system clock.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_clock(backend, Arc::new(SystemTime))
    }

    /// Create the service with an injected clock (deterministic tests).
    #[must_use]
    pub fn with_clock(backend: Arc<dyn StorageBackend>, clock: Arc<dyn TimeSource>) -> Self {
        let store =
            RecordStore::new(JsonStorage::new(backend), ACTIVITIES_KEY).with_clock(clock.clone());
        Self { store, clock }
    }

    /// All activities in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Activity> {
        self.store.list()
    }

    /// Save a new activity, stamping id and creation time.
    pub fn save(&self, payload: NewActivity) -> Activity {
        self.store.add(Activity {
            id: String::new(),
            steps: payload.steps,
            calories: payload.calories,
            created_at: self.clock.now(),
        })
    }

    /// Overlay `patch` onto the activity with this id.
    pub fn update(&self, id: &str, patch: &serde_json::Value) -> Option<Activity> {
        self.store.update(id, patch)
    }

    /// Delete the activity with this id.
    pub fn delete(&self, id: &str) -> bool {
        self.store.remove(id)
    }

    /// Erase all activities.
    pub fn clear(&self) {
        self.store.clear()
    }
}

// =============================================================================
// Tests
// =============================================================================
