//! Settings Service
//!
//! TigerStyle: Single object, latest value only, no history.
//!
//! Settings live as one JSON object under `fittrack:settings`, never a
//! collection. `get` falls back to the built-in defaults when nothing is
//! stored or the payload is undecodable; `init` writes the defaults only
//! when no value exists at all, so it never clobbers user choices, not
//! even unreadable ones.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::constants::SETTINGS_KEY;
use crate::storage::{JsonStorage, StorageBackend};

// =============================================================================
// Types
// =============================================================================

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Whether hydration tracking is enabled.
    pub track_hydration: bool,
    /// Height in centimeters to prefill new weighings with.
    pub default_height_cm: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track_hydration: true,
            default_height_cm: None,
        }
    }
}

/// Partial settings change; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    /// New value for hydration tracking, if changing.
    pub track_hydration: Option<bool>,
    /// New default height, if changing (`Some(None)` clears it).
    pub default_height_cm: Option<Option<f64>>,
}

// =============================================================================
// Service
// =============================================================================

/// Read/write access to the settings object.
#[derive(Debug, Clone)]
pub struct SettingsService {
    storage: JsonStorage,
}

impl SettingsService {
    /// Create the service over `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage: JsonStorage::new(backend),
        }
    }

    /// Stored settings, or the defaults when absent or undecodable.
    #[must_use]
    pub fn get(&self) -> Settings {
        self.storage
            .read_object(SETTINGS_KEY)
            .unwrap_or_default()
    }

    /// Overwrite the stored settings wholesale.
    pub fn save(&self, settings: &Settings) {
        self.storage.write(SETTINGS_KEY, settings);
    }

    /// Overlay `patch` onto the current (or default) settings and save.
    pub fn update(&self, patch: SettingsPatch) -> Settings {
        let mut settings = self.get();
        if let Some(track_hydration) = patch.track_hydration {
            settings.track_hydration = track_hydration;
        }
        if let Some(default_height_cm) = patch.default_height_cm {
            settings.default_height_cm = default_height_cm;
        }
        self.save(&settings);
        settings
    }

    /// Write the defaults only if no value is stored yet. Idempotent.
    pub fn init(&self) {
        if self.storage.exists(SETTINGS_KEY) {
            return;
        }
        self.save(&Settings::default());
        tracing::debug!(key = SETTINGS_KEY, "initialized default settings");
    }
}

// =============================================================================
// Tests
// =============================================================================
