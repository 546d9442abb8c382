//! Domain Services
//!
//! Typed facades binding the generic record store (or, for settings, the
//! raw JSON primitives) to the fixed `fittrack:` storage keys.
//!
//! Data flow: service → record store → guarded JSON primitives →
//! injected backend. Nothing here runs outside a caller invocation.

mod activity;
mod settings;
mod weighing;

pub use activity::{Activity, ActivityService, NewActivity};
pub use settings::{Settings, SettingsPatch, SettingsService};
pub use weighing::{NewWeighing, Weighing, WeighingService};
