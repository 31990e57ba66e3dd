//! chime — recurring reminder alarms within a daily time window.
//!
//! A schedule is a daily window `[start, end)` and a firing interval; the
//! calculator answers "when must the alarm fire next?" for any instant,
//! including windows that cross midnight.
//!
//! # Examples
//!
//! ```
//! use chime::Schedule;
//!
//! let schedule = Schedule::from_strings("05:00", "00:00", 45).unwrap();
//! println!("{}", schedule); // "every 45 min from 05:00 to 00:00"
//! ```

pub mod display;
pub mod error;
pub mod rearm;
pub mod schedule;
pub mod trigger;

pub use error::ValidationError;
pub use rearm::{handle_firing, rearm, AlarmService, ArmOutcome, ScheduleStore, SoundPlayer};
pub use schedule::Schedule;
pub use trigger::next_trigger;

use jiff::Zoned;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// --- Schedule convenience methods ---

impl Schedule {
    /// Compute the next trigger strictly after `now`, in the zone of `now`.
    pub fn next_from(&self, now: &Zoned) -> Option<Zoned> {
        trigger::next_from(self, now)
    }

    /// Compute the next `n` triggers after `now`.
    pub fn next_n_from(&self, now: &Zoned, n: usize) -> Vec<Zoned> {
        trigger::next_n_from(self, now, n)
    }

    /// Check if an instant is exactly one of this schedule's ticks.
    pub fn matches(&self, at: &Zoned) -> bool {
        trigger::matches(self, at)
    }

    /// Lazy iterator over triggers strictly after `from`.
    pub fn occurrences(&self, from: &Zoned) -> trigger::Occurrences<'_> {
        trigger::Occurrences::new(self, from.clone())
    }

    /// Bounded iterator over triggers in the range (from, to].
    pub fn between(&self, from: &Zoned, to: &Zoned) -> trigger::BoundedOccurrences<'_> {
        trigger::between(self, from, to)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(
            "start",
            &format!("{:02}:{:02}", self.start().hour(), self.start().minute()),
        )?;
        map.serialize_entry(
            "end",
            &format!("{:02}:{:02}", self.end().hour(), self.end().minute()),
        )?;
        map.serialize_entry("interval_minutes", &self.interval_minutes())?;
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            start: String,
            end: String,
            interval_minutes: i64,
        }

        // A stored schedule re-validates on load; a corrupt entry is
        // rejected instead of resurrected as an invalid Schedule.
        let raw = Raw::deserialize(deserializer)?;
        Schedule::from_strings(&raw.start, &raw.end, raw.interval_minutes)
            .map_err(serde::de::Error::custom)
    }
}
