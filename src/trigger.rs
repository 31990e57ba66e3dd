//! Next-trigger computation for a windowed schedule.
//!
//! The calculator re-derives the tick sequence of the governing window
//! instance from its start on every call, rather than remembering the last
//! tick that fired. Calling it after arbitrary downtime (restart, reboot,
//! clock change) recovers the correct next tick from first principles.

use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use jiff::{Span, Timestamp, Zoned};

use crate::schedule::Schedule;

/// Compute the next instant at which the alarm must fire, strictly after
/// `now`, in wall-clock terms of `tz`.
///
/// Returns `None` when no schedule is present. The result is never equal
/// to or before `now`; a caller that re-arms on each firing cannot loop.
pub fn next_trigger(now: Timestamp, schedule: Option<&Schedule>, tz: &TimeZone) -> Option<Zoned> {
    let schedule = schedule?;
    next_from(schedule, &now.to_zoned(tz.clone()))
}

/// Compute the next trigger strictly after `now`, in the zone of `now`.
pub fn next_from(schedule: &Schedule, now: &Zoned) -> Option<Zoned> {
    let tz = now.time_zone();
    let today = now.date();
    let time_now = now.time();

    if is_within_window(time_now, schedule) {
        // A crossing window that opened yesterday is still the governing
        // instance while we are in its early-morning tail.
        let start_date = window_start_date(schedule, now)?;
        let window_start = at_time_on_date(start_date, schedule.start(), tz)?;
        let window_end = if schedule.crosses_midnight() {
            at_time_on_date(start_date.tomorrow().ok()?, schedule.end(), tz)?
        } else {
            at_time_on_date(start_date, schedule.end(), tz)?
        };

        let interval_secs = schedule.interval_minutes() * 60;
        let elapsed_secs =
            (now.timestamp().as_second() - window_start.timestamp().as_second()).max(0);
        // elapsed_secs >= 0 (clamped above) and interval_secs > 0, so this
        // ceil-division matches i64::div_ceil without the unstable feature.
        let steps = (elapsed_secs + interval_secs - 1) / interval_secs;
        let mut candidate = window_start
            .checked_add(Span::new().seconds(steps * interval_secs))
            .ok()?;
        // `ceil` of an exact multiple lands on `now` itself; the next tick
        // is one interval later.
        if candidate <= *now {
            candidate = candidate
                .checked_add(Span::new().seconds(interval_secs))
                .ok()?;
        }

        if candidate >= window_end {
            // No tick left in this instance; the next instance opens one
            // calendar day after this one did.
            strictly_after(window_start.checked_add(Span::new().days(1)).ok()?, now)
        } else {
            Some(candidate)
        }
    } else {
        // Outside the window the next trigger is the next window open.
        // For a crossing window, "outside" means end <= time < start, so
        // today's start is still ahead either way.
        let start_today = at_time_on_date(today, schedule.start(), tz)?;
        let next_open = if time_now < schedule.start() {
            start_today
        } else {
            start_today.checked_add(Span::new().days(1)).ok()?
        };
        strictly_after(next_open, now)
    }
}

/// Whether `at` is exactly one of the schedule's ticks: inside its window
/// instance and a whole number of intervals from that instance's start.
pub fn matches(schedule: &Schedule, at: &Zoned) -> bool {
    if !is_within_window(at.time(), schedule) {
        return false;
    }
    let Some(start_date) = window_start_date(schedule, at) else {
        return false;
    };
    let Some(window_start) = at_time_on_date(start_date, schedule.start(), at.time_zone()) else {
        return false;
    };
    let elapsed = at.timestamp().as_second() - window_start.timestamp().as_second();
    at.timestamp().subsec_nanosecond() == 0
        && elapsed >= 0
        && elapsed % (schedule.interval_minutes() * 60) == 0
}

/// Inside iff `start <= t < end`, wrapping across midnight for a crossing
/// window. `t == start` is inside; `t == end` is not.
fn is_within_window(t: Time, schedule: &Schedule) -> bool {
    if !schedule.crosses_midnight() {
        t >= schedule.start() && t < schedule.end()
    } else {
        t >= schedule.start() || t < schedule.end()
    }
}

/// The calendar date on which the window instance governing `now` opened.
fn window_start_date(schedule: &Schedule, now: &Zoned) -> Option<Date> {
    if schedule.crosses_midnight() && now.time() < schedule.end() {
        now.date().yesterday().ok()
    } else {
        Some(now.date())
    }
}

/// Resolve a civil time on a date in a zone. `None` only when the result
/// would fall outside jiff's representable range.
fn at_time_on_date(date: Date, time: Time, tz: &TimeZone) -> Option<Zoned> {
    date.to_datetime(time).to_zoned(tz.clone()).ok()
}

/// A window open resolved inside a DST fold can land behind the clock;
/// step whole days until the instant is strictly in the future.
fn strictly_after(mut result: Zoned, now: &Zoned) -> Option<Zoned> {
    while result <= *now {
        result = result.checked_add(Span::new().days(1)).ok()?;
    }
    Some(result)
}

/// Compute the next `n` triggers after `now`.
pub fn next_n_from(schedule: &Schedule, now: &Zoned, n: usize) -> Vec<Zoned> {
    Occurrences::new(schedule, now.clone()).take(n).collect()
}

/// Lazy iterator over trigger instants strictly after a given datetime.
///
/// Each step feeds the previous tick back in as `now`, the same loop the
/// re-arming caller runs one firing at a time.
pub struct Occurrences<'a> {
    schedule: &'a Schedule,
    current: Zoned,
}

impl<'a> Occurrences<'a> {
    /// Create a new iterator starting strictly after `from`.
    pub fn new(schedule: &'a Schedule, from: Zoned) -> Self {
        Self {
            schedule,
            current: from,
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = Zoned;

    fn next(&mut self) -> Option<Self::Item> {
        // next_from is strictly monotone, so the result becomes the new
        // cursor without risk of repeating.
        let next = next_from(self.schedule, &self.current)?;
        self.current = next.clone();
        Some(next)
    }
}

/// Bounded iterator for triggers where from < trigger <= to.
pub struct BoundedOccurrences<'a> {
    inner: Occurrences<'a>,
    to: Zoned,
}

impl<'a> BoundedOccurrences<'a> {
    /// Create a new bounded iterator for triggers in the range (from, to].
    pub fn new(schedule: &'a Schedule, from: Zoned, to: Zoned) -> Self {
        Self {
            inner: Occurrences::new(schedule, from),
            to,
        }
    }
}

impl Iterator for BoundedOccurrences<'_> {
    type Item = Zoned;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next() {
            Some(dt) if dt <= self.to => Some(dt),
            _ => None,
        }
    }
}

/// Create a bounded iterator of triggers in the range (from, to].
pub fn between<'a>(schedule: &'a Schedule, from: &Zoned, to: &Zoned) -> BoundedOccurrences<'a> {
    BoundedOccurrences::new(schedule, from.clone(), to.clone())
}
