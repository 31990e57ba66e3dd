//! Platform seam for arming the reminder.
//!
//! The surrounding system owns the real timer, the schedule store, and the
//! audio stack; the core only dictates the sequence. `rearm` is the single
//! entry point for every path that needs a timer armed: after a user edit,
//! after each firing, and after a reboot. It always cancels before arming,
//! so at most one timer is ever live.

use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::schedule::Schedule;
use crate::trigger::next_trigger;

/// Persisted schedule access. Saves replace the stored value wholesale;
/// `clear` is user cancellation.
pub trait ScheduleStore {
    fn load(&self) -> Option<Schedule>;
    fn save(&mut self, schedule: &Schedule);
    fn clear(&mut self);
}

/// One-shot wake-up registration with the platform alarm service.
pub trait AlarmService {
    /// Whether the platform currently permits exact-time scheduling.
    fn can_schedule_exact(&self) -> bool;

    /// Arm a one-shot wake-up at this instant, replacing any wake-up armed
    /// earlier. Implementors must replace, never accumulate.
    fn arm(&mut self, at: &Zoned);

    /// Cancel the armed wake-up, if any.
    fn cancel(&mut self);
}

/// Playback of the firing sound. The identifier is opaque to the core;
/// the platform layer resolves it.
pub trait SoundPlayer {
    /// Play the sound behind `sound`. Returns false when the identifier
    /// does not resolve, in which case playback is skipped.
    fn play(&mut self, sound: &str) -> bool;
}

/// Result of a re-arm attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArmOutcome {
    /// A wake-up was armed for this instant.
    Armed(Zoned),
    /// Exact scheduling is not permitted; nothing was armed and the
    /// calculator was not consulted. The caller must prompt for permission
    /// out-of-band.
    PermissionRequired,
    /// No schedule is stored; nothing was armed.
    NoSchedule,
}

/// Cancel any armed wake-up, then arm the next trigger from the stored
/// schedule. This is one logical step: callers never interleave their own
/// timer operations between the cancel and the arm.
pub fn rearm<St, Al>(store: &St, service: &mut Al, now: Timestamp, tz: &TimeZone) -> ArmOutcome
where
    St: ScheduleStore,
    Al: AlarmService,
{
    service.cancel();
    if !service.can_schedule_exact() {
        return ArmOutcome::PermissionRequired;
    }
    let schedule = store.load();
    match next_trigger(now, schedule.as_ref(), tz) {
        Some(at) => {
            service.arm(&at);
            ArmOutcome::Armed(at)
        }
        None => ArmOutcome::NoSchedule,
    }
}

/// Firing handler: play the configured sound, then re-arm for the next
/// trigger. A sound that fails to resolve skips playback; the re-arm
/// happens regardless.
pub fn handle_firing<St, Al, Sp>(
    store: &St,
    service: &mut Al,
    player: &mut Sp,
    sound: &str,
    now: Timestamp,
    tz: &TimeZone,
) -> ArmOutcome
where
    St: ScheduleStore,
    Al: AlarmService,
    Sp: SoundPlayer,
{
    let _ = player.play(sound);
    rearm(store, service, now, tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MemoryStore {
        schedule: Option<Schedule>,
    }

    impl ScheduleStore for MemoryStore {
        fn load(&self) -> Option<Schedule> {
            self.schedule
        }

        fn save(&mut self, schedule: &Schedule) {
            self.schedule = Some(*schedule);
        }

        fn clear(&mut self) {
            self.schedule = None;
        }
    }

    #[derive(Default)]
    struct RecordingAlarm {
        permitted: bool,
        armed: Option<Zoned>,
        calls: Vec<&'static str>,
    }

    impl AlarmService for RecordingAlarm {
        fn can_schedule_exact(&self) -> bool {
            self.permitted
        }

        fn arm(&mut self, at: &Zoned) {
            self.armed = Some(at.clone());
            self.calls.push("arm");
        }

        fn cancel(&mut self) {
            self.armed = None;
            self.calls.push("cancel");
        }
    }

    impl RecordingAlarm {
        fn permitted() -> Self {
            Self {
                permitted: true,
                ..Self::default()
            }
        }
    }

    struct StubPlayer {
        resolves: bool,
        played: Vec<String>,
    }

    impl SoundPlayer for StubPlayer {
        fn play(&mut self, sound: &str) -> bool {
            if self.resolves {
                self.played.push(sound.to_string());
            }
            self.resolves
        }
    }

    fn store_with_schedule() -> MemoryStore {
        MemoryStore {
            schedule: Some(Schedule::from_strings("09:00", "17:00", 60).unwrap()),
        }
    }

    fn noon() -> Timestamp {
        "2026-02-06T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn rearm_cancels_before_arming() {
        let store = store_with_schedule();
        let mut alarm = RecordingAlarm::permitted();
        let outcome = rearm(&store, &mut alarm, noon(), &TimeZone::UTC);

        assert_eq!(alarm.calls, vec!["cancel", "arm"]);
        match outcome {
            ArmOutcome::Armed(at) => assert_eq!(alarm.armed, Some(at)),
            other => panic!("expected Armed, got {other:?}"),
        }
    }

    #[test]
    fn rearm_short_circuits_without_permission() {
        let store = store_with_schedule();
        let mut alarm = RecordingAlarm::default();
        let outcome = rearm(&store, &mut alarm, noon(), &TimeZone::UTC);

        assert_eq!(outcome, ArmOutcome::PermissionRequired);
        // The cancel still ran, but nothing was armed.
        assert_eq!(alarm.calls, vec!["cancel"]);
        assert!(alarm.armed.is_none());
    }

    #[test]
    fn rearm_with_empty_store_arms_nothing() {
        let store = MemoryStore { schedule: None };
        let mut alarm = RecordingAlarm::permitted();
        let outcome = rearm(&store, &mut alarm, noon(), &TimeZone::UTC);

        assert_eq!(outcome, ArmOutcome::NoSchedule);
        assert!(alarm.armed.is_none());
    }

    #[test]
    fn rearm_is_idempotent_for_the_same_instant() {
        let store = store_with_schedule();
        let mut alarm = RecordingAlarm::permitted();
        let first = rearm(&store, &mut alarm, noon(), &TimeZone::UTC);
        let second = rearm(&store, &mut alarm, noon(), &TimeZone::UTC);

        assert_eq!(first, second);
        assert_eq!(alarm.calls, vec!["cancel", "arm", "cancel", "arm"]);
    }

    #[test]
    fn firing_plays_then_rearms() {
        let store = store_with_schedule();
        let mut alarm = RecordingAlarm::permitted();
        let mut player = StubPlayer {
            resolves: true,
            played: Vec::new(),
        };
        let outcome = handle_firing(&store, &mut alarm, &mut player, "alert", noon(), &TimeZone::UTC);

        assert_eq!(player.played, vec!["alert".to_string()]);
        assert!(matches!(outcome, ArmOutcome::Armed(_)));
    }

    #[test]
    fn firing_with_unresolvable_sound_still_rearms() {
        let store = store_with_schedule();
        let mut alarm = RecordingAlarm::permitted();
        let mut player = StubPlayer {
            resolves: false,
            played: Vec::new(),
        };
        let outcome = handle_firing(&store, &mut alarm, &mut player, "gone", noon(), &TimeZone::UTC);

        assert!(player.played.is_empty());
        assert!(matches!(outcome, ArmOutcome::Armed(_)));
    }

    #[test]
    fn store_replaces_wholesale() {
        let mut store = MemoryStore { schedule: None };
        let first = Schedule::from_strings("05:00", "00:00", 45).unwrap();
        let second = Schedule::from_strings("09:00", "17:00", 60).unwrap();

        store.save(&first);
        store.save(&second);
        assert_eq!(store.load(), Some(second));

        store.clear();
        assert_eq!(store.load(), None);
    }
}
