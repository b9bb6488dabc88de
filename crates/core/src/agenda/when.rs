//! "When" text for an event slot

use chrono::DateTime;
use chrono_tz::Tz;

use crate::time::{start_of_day_after_next, start_of_next_local_day};

/// Day an instant falls on, relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    Tomorrow,
    Later,
}

impl RelativeDay {
    /// Classify `start` against local day boundaries around `now`.
    ///
    /// Anything before the next local midnight counts as today, including
    /// instants earlier than `now`.
    pub fn of(start: &DateTime<Tz>, now: &DateTime<Tz>) -> Self {
        if *start < start_of_next_local_day(now) {
            Self::Today
        } else if *start < start_of_day_after_next(now) {
            Self::Tomorrow
        } else {
            Self::Later
        }
    }
}

/// Formats local start instants for display.
#[derive(Debug, Clone, Copy)]
pub struct WhenFormatter<'a> {
    /// `15:30` instead of `3:30 PM`
    pub use_24_hour_clock: bool,
    /// Shown for, or appended to, instants falling tomorrow
    pub tomorrow_label: &'a str,
}

impl WhenFormatter<'_> {
    /// Text for `start` as seen at `now`; all-day instants show no time.
    pub fn format(&self, start: &DateTime<Tz>, all_day: bool, now: &DateTime<Tz>) -> String {
        let day = RelativeDay::of(start, now);

        if all_day {
            return match day {
                RelativeDay::Tomorrow => self.tomorrow_label.to_string(),
                _ => start.format("%a, %b %-d").to_string(),
            };
        }

        let time = if self.use_24_hour_clock {
            start.format("%H:%M").to_string()
        } else {
            start.format("%-I:%M %p").to_string()
        };

        match day {
            RelativeDay::Today => time,
            RelativeDay::Tomorrow => format!("{time}, {}", self.tomorrow_label),
            RelativeDay::Later => format!("{}, {time}", start.format("%a")),
        }
    }
}
