//! Constants
//!
//! TigerStyle: All magic values named, in one place.

/// Prefix shared by every storage key this crate owns.
pub const STORAGE_KEY_PREFIX: &str = "fittrack:";

/// Storage key for the activities collection.
pub const ACTIVITIES_KEY: &str = "fittrack:activities";

/// Storage key for the weighings collection.
pub const WEIGHINGS_KEY: &str = "fittrack:weighings";

/// Storage key for the settings object.
pub const SETTINGS_KEY: &str = "fittrack:settings";

/// Serialized identifier field name shared by all record kinds.
pub const RECORD_ID_FIELD: &str = "id";
