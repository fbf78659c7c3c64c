/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Minute-resolution wall-clock time.
//!
//! Every time in the tracker is a local, same-day time of day.  There is no
//! date and no timezone: `07:25` is simply 445 minutes after midnight.
//!
//! The textual form is `HH:MM` (24-hour).  A one-digit hour (`7:25`) is
//! tolerated because hand-edited schedule files often contain one; minutes
//! must always have two digits.

use std::fmt;
use std::str::FromStr;

use chrono::format::ParseErrorKind;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error type ────────────────────────────────────────────────────────────────

/// Why a string could not be parsed as a [`TimeOfDay`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// The string is not shaped like `HH:MM`.
    #[error("'{input}' is not a valid HH:MM time")]
    Format { input: String },

    /// Shaped like `HH:MM`, but the hour is past 23 or the minute past 59.
    #[error("'{input}' is out of range (00:00-23:59)")]
    OutOfRange { input: String },
}

// ── TimeOfDay ─────────────────────────────────────────────────────────────────

/// A wall-clock time with minute resolution.
///
/// Ordering is by total minutes since midnight (the derived ordering on
/// `(hour, minute)` is equivalent).  Serialises as the `HH:MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Midnight, `00:00`.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hour: 0, minute: 0 };

    /// Build a time for a compile-time constant.
    ///
    /// # Panics
    /// Panics (at compile time when used in a `const`) if `hour >= 24` or
    /// `minute >= 60`.
    pub const fn from_hm(hour: u8, minute: u8) -> Self {
        assert!(hour < 24 && minute < 60, "time of day out of range");
        Self { hour, minute }
    }

    /// Build a time from its components, or `None` if either is out of range.
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Build a time from minutes since midnight, or `None` past `23:59`.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes >= 24 * 60 {
            return None;
        }
        Some(Self {
            hour: (minutes / 60) as u8,
            minute: (minutes % 60) as u8,
        })
    }

    /// Truncate a chrono time to minute resolution.  Seconds are dropped.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    /// The current local wall-clock time.
    pub fn now_local() -> Self {
        Self::from_naive_time(chrono::Local::now().time())
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Minutes elapsed since midnight (`0..1440`).
    pub fn minutes_since_midnight(self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// Signed number of minutes from `self` to `later`.
    ///
    /// Negative when `later` is actually earlier in the day.
    pub fn minutes_until(self, later: TimeOfDay) -> i32 {
        later.minutes_since_midnight() as i32 - self.minutes_since_midnight() as i32
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();

        let time = NaiveTime::parse_from_str(input, "%H:%M").map_err(|e| match e.kind() {
            ParseErrorKind::OutOfRange => TimeParseError::OutOfRange {
                input: s.to_string(),
            },
            _ => TimeParseError::Format {
                input: s.to_string(),
            },
        })?;

        // chrono also takes a one-digit minute.
        if !input.rsplit_once(':').is_some_and(|(_, m)| m.len() == 2) {
            return Err(TimeParseError::Format {
                input: s.to_string(),
            });
        }

        Ok(Self::from_naive_time(time))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
