//! Clock - Injectable Time
//!
//! TigerStyle: No direct reliance on system time in store code.
//!
//! Records are stamped with their creation time, and the timestamp id
//! fallback derives ids from the clock, so time is a capability:
//! production uses the system clock, tests use a manual clock that only
//! moves forward.

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;

/// Source of the current wall-clock time.
pub trait TimeSource: Send + Sync + std::fmt::Debug {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production time source backed by the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for deterministic tests.
///
/// Time only moves forward; all advances are explicit.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock starting at the Unix epoch.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Utc.timestamp_millis_opt(0).single().unwrap_or_default())
    }

    /// Create a clock starting at the given instant.
    #[must_use]
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Advance the clock by the given milliseconds.
    ///
    /// # Panics
    /// Panics if the advance would overflow the timestamp range.
    pub fn advance_ms(&self, ms: i64) {
        assert!(ms >= 0, "ms must be non-negative, got {ms}");
        let mut current = self.current.lock();
        let advanced = *current + chrono::Duration::milliseconds(ms);
        assert!(advanced >= *current, "time must not go backwards");
        *current = advanced;
    }

    /// Set the clock to an absolute instant.
    ///
    /// # Panics
    /// Panics if `instant` is before the current time.
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut current = self.current.lock();
        assert!(
            instant >= *current,
            "cannot set time backwards: {instant} < {current}"
        );
        *current = instant;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_starts_at_epoch() {
        let clock = ManualClock::new();
        assert_eq!(clock.now().timestamp_millis(), 0);
    }

    #[test]
    fn test_advance_ms() {
        let clock = ManualClock::new();

        clock.advance_ms(1_500);

        assert_eq!(clock.now().timestamp_millis(), 1_500);
    }

    #[test]
    fn test_multiple_advances_accumulate() {
        let clock = ManualClock::new();

        clock.advance_ms(100);
        clock.advance_ms(200);
        clock.advance_ms(300);

        assert_eq!(clock.now().timestamp_millis(), 600);
    }

    #[test]
    fn test_set_forward() {
        let clock = ManualClock::new();
        let target = Utc.timestamp_millis_opt(5_000).single().unwrap();

        clock.set(target);

        assert_eq!(clock.now(), target);
    }

    #[test]
    #[should_panic(expected = "cannot set time backwards")]
    fn test_set_backwards_panics() {
        let clock = ManualClock::new();
        clock.advance_ms(1_000);
        clock.set(Utc.timestamp_millis_opt(500).single().unwrap());
    }

    #[test]
    fn test_system_time_is_recent() {
        let now = SystemTime.now();
        // Sanity: later than 2020-01-01.
        assert!(now.timestamp() > 1_577_836_800);
    }
}
