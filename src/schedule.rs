use jiff::civil::Time;

use crate::error::{Span, ValidationError};

/// A recurring daily reminder window with a fixed firing interval.
///
/// The window is `[start, end)`: a tick may fire at `start` but never at
/// `end`. A window whose `end` is not strictly after `start` crosses
/// midnight and spans two calendar dates; `start == end` denotes a
/// full-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    start: Time,
    end: Time,
    interval_minutes: i64,
}

impl Schedule {
    /// Create a schedule from civil times and an interval in minutes.
    ///
    /// Sub-minute components of the times are truncated; the window has
    /// minute resolution. Fails if `interval_minutes` is not positive.
    pub fn new(start: Time, end: Time, interval_minutes: i64) -> Result<Self, ValidationError> {
        if interval_minutes <= 0 {
            return Err(ValidationError::interval(format!(
                "interval must be a positive number of minutes, got {interval_minutes}"
            )));
        }
        Ok(Self {
            start: truncate_to_minute(start),
            end: truncate_to_minute(end),
            interval_minutes,
        })
    }

    /// Parse two 24-hour `HH:mm` strings and an interval in minutes.
    pub fn from_strings(
        start: &str,
        end: &str,
        interval_minutes: i64,
    ) -> Result<Self, ValidationError> {
        let s = parse_time(start)?;
        let e = parse_time(end)?;
        Self::new(s, e, interval_minutes)
    }

    /// Window open boundary, inclusive.
    pub fn start(&self) -> Time {
        self.start
    }

    /// Window close boundary, exclusive.
    pub fn end(&self) -> Time {
        self.end
    }

    /// Spacing between consecutive ticks within the window.
    pub fn interval_minutes(&self) -> i64 {
        self.interval_minutes
    }

    /// Whether the window spans two calendar dates. `start == end` counts
    /// as crossing: it is the degenerate full-day window.
    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }
}

fn truncate_to_minute(t: Time) -> Time {
    // Hour and minute come from a valid Time, so this cannot fail.
    Time::new(t.hour(), t.minute(), 0, 0).unwrap()
}

/// Parse a strict 24-hour `HH:mm` time-of-day: one or two hour digits, a
/// colon, exactly two minute digits, nothing else.
pub(crate) fn parse_time(input: &str) -> Result<Time, ValidationError> {
    let bytes = input.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let hour_digits = &input[..pos];

    if hour_digits.is_empty() || hour_digits.len() > 2 {
        return Err(ValidationError::time(
            "expected time as HH:mm",
            Span::new(0, bytes.len().max(1)),
            input,
        ));
    }
    if pos >= bytes.len() || bytes[pos] != b':' {
        return Err(ValidationError::time(
            "expected ':' after hour",
            Span::new(pos, pos + 1),
            input,
        ));
    }
    pos += 1;

    let min_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let min_digits = &input[min_start..pos];

    if min_digits.len() != 2 || pos != bytes.len() {
        return Err(ValidationError::time(
            "expected two minute digits",
            Span::new(min_start, bytes.len().max(min_start + 1)),
            input,
        ));
    }

    let hour: u8 = hour_digits.parse().map_err(|_| {
        ValidationError::time("invalid hour", Span::new(0, hour_digits.len()), input)
    })?;
    let minute: u8 = min_digits
        .parse()
        .map_err(|_| ValidationError::time("invalid minute", Span::new(min_start, pos), input))?;
    if hour > 23 || minute > 59 {
        return Err(ValidationError::time(
            "invalid time",
            Span::new(0, pos),
            input,
        ));
    }

    // Range-checked above, so constructing the Time cannot fail.
    Ok(Time::new(hour as i8, minute as i8, 0, 0).unwrap())
}
