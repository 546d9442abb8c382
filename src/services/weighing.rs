//! Weighing Service
//!
//! TigerStyle: Thin typed facade over the generic record store.
//!
//! Weighings live under the `fittrack:weighings` key. Every measurement
//! besides the date is optional; a scale that reports only weight still
//! produces a valid record.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{SystemTime, TimeSource};
use crate::constants::WEIGHINGS_KEY;
use crate::record::{Record, RecordStore};
use crate::storage::{JsonStorage, StorageBackend};

// =============================================================================
// Types
// =============================================================================

/// One weighing with optional body measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weighing {
    /// Unique identifier.
    pub id: String,
    /// Day of the weighing, as entered by the user.
    pub date: String,
    /// Height in centimeters.
    pub height_cm: Option<f64>,
    /// Weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Body fat percentage.
    pub fat_percent: Option<f64>,
    /// Muscle mass in kilograms.
    pub muscle_kg: Option<f64>,
    /// Body water percentage.
    pub water_percent: Option<f64>,
    /// When the record was saved (ISO-8601 on the wire).
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Record for Weighing {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn set_record_id(&mut self, id: String) {
        self.id = id;
    }
}

/// Payload for a new weighing; id and creation time are stamped on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewWeighing {
    /// Day of the weighing.
    pub date: String,
    /// Height in centimeters.
    pub height_cm: Option<f64>,
    /// Weight in kilograms.
    pub weight_kg: Option<f64>,
    /// Body fat percentage.
    pub fat_percent: Option<f64>,
    /// Muscle mass in kilograms.
    pub muscle_kg: Option<f64>,
    /// Body water percentage.
    pub water_percent: Option<f64>,
}

// =============================================================================
// Service
// =============================================================================

/// CRUD over the weighings collection.
#[derive(Debug, Clone)]
pub struct WeighingService {
    store: RecordStore<Weighing>,
    clock: Arc<dyn TimeSource>,
}

impl WeighingService {
    /// Create the service over `backend` with the system clock.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_clock(backend, Arc::new(SystemTime))
    }

    /// Create the service with an injected clock (deterministic tests).
    #[must_use]
    pub fn with_clock(backend: Arc<dyn StorageBackend>, clock: Arc<dyn TimeSource>) -> Self {
        let store =
            RecordStore::new(JsonStorage::new(backend), WEIGHINGS_KEY).with_clock(clock.clone());
        Self { store, clock }
    }

    /// All weighings in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Weighing> {
        self.store.list()
    }

    /// Save a new weighing, stamping id and creation time.
    pub fn save(&self, payload: NewWeighing) -> Weighing {
        self.store.add(Weighing {
            id: String::new(),
            date: payload.date,
            height_cm: payload.height_cm,
            weight_kg: payload.weight_kg,
            fat_percent: payload.fat_percent,
            muscle_kg: payload.muscle_kg,
            water_percent: payload.water_percent,
            created_at: self.clock.now(),
        })
    }

    /// Overlay `patch` onto the weighing with this id.
    pub fn update(&self, id: &str, patch: &serde_json::Value) -> Option<Weighing> {
        self.store.update(id, patch)
    }

    /// Delete the weighing with this id.
    pub fn delete(&self, id: &str) -> bool {
        self.store.remove(id)
    }

    /// Erase all weighings.
    pub fn clear(&self) {
        self.store.clear()
    }
}

// =============================================================================
// Tests
// =============================================================================
