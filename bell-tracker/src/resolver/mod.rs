/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Time-to-period resolution.
//!
//! [`PeriodResolver::resolve`] classifies a time of day against one
//! [`Schedule`].  The rules are evaluated in a fixed priority order and the
//! first match wins:
//!
//! | # | Condition | Status |
//! |---|---|---|
//! | 1 | `query < periods[0].start` | `Before School` |
//! | 2 | `query > after_school` | `After School` |
//! | 3 | `query < start` of the interval named `1`, outside every interval | `Period 1 starts at HH:MM` |
//! | 4a | `start_i <= query <= end_i` | label of interval `i` |
//! | 4b | `end_i < query < start_{i+1}` | `label_i → label_{i+1}` |
//! | 5 | nothing matched | `Not in session` |
//!
//! Rule 3 overlaps rule 1 whenever Period 1 is the first interval.  It reports
//! the gap between a leading block (e.g. "Homeroom") and Period 1, and takes
//! precedence over the transition of rule 4b there.  A running block such as
//! "Warning Bell" is still shown by name.
//!
//! The resolver holds no state between calls.  Each call recomputes the day
//! phase from scratch, so a ticking display and a one-off query behave
//! identically.

pub mod error;

pub use error::ResolveError;

use std::fmt;

use tracing::trace;

use crate::catalog::{Schedule, DEFAULT_AFTER_SCHOOL};
use crate::time::TimeOfDay;

// ── PeriodStatus ──────────────────────────────────────────────────────────────

/// What is happening at a given time on a given schedule.
///
/// `Display` produces the exact string shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodStatus {
    BeforeSchool,
    AfterSchool,
    /// Before Period 1 but after the schedule's first bell.
    PeriodOneStartsAt(TimeOfDay),
    /// Inside an interval; carries its display label.
    InInterval(String),
    /// In the gap between two consecutive intervals.
    Transition { from: String, to: String },
    NotInSession,
}

impl PeriodStatus {
    /// `true` while an interval is running.
    pub fn is_in_interval(&self) -> bool {
        matches!(self, PeriodStatus::InInterval(_))
    }
}

impl fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodStatus::BeforeSchool => f.write_str("Before School"),
            PeriodStatus::AfterSchool => f.write_str("After School"),
            PeriodStatus::PeriodOneStartsAt(start) => write!(f, "Period 1 starts at {start}"),
            PeriodStatus::InInterval(label) => f.write_str(label),
            PeriodStatus::Transition { from, to } => write!(f, "{from} → {to}"),
            PeriodStatus::NotInSession => f.write_str("Not in session"),
        }
    }
}

// ── PeriodResolver ────────────────────────────────────────────────────────────

/// Stateless classifier of `(schedule, time)` pairs.
///
/// The only configuration is the after-school cut-off, which applies to every
/// schedule alike.  `Copy`, so each display card or request can hold its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodResolver {
    after_school: TimeOfDay,
}

impl Default for PeriodResolver {
    fn default() -> Self {
        Self::new(DEFAULT_AFTER_SCHOOL)
    }
}

impl PeriodResolver {
    pub fn new(after_school: TimeOfDay) -> Self {
        Self { after_school }
    }

    pub fn after_school(&self) -> TimeOfDay {
        self.after_school
    }

    /// Classify `query` against `schedule`.
    pub fn resolve(&self, schedule: &Schedule, query: TimeOfDay) -> PeriodStatus {
        let status = self.classify(schedule, query);
        trace!(schedule = %schedule.id, query = %query, status = %status, "resolved");
        status
    }

    fn classify(&self, schedule: &Schedule, query: TimeOfDay) -> PeriodStatus {
        let periods = &schedule.periods;

        if let Some(first_start) = schedule.first_start() {
            if query < first_start {
                return PeriodStatus::BeforeSchool;
            }
        }

        if query > self.after_school {
            return PeriodStatus::AfterSchool;
        }

        if let Some(period_one) = schedule.period_one() {
            if query < period_one.start && !periods.iter().any(|p| p.contains(query)) {
                return PeriodStatus::PeriodOneStartsAt(period_one.start);
            }
        }

        for (i, period) in periods.iter().enumerate() {
            if period.contains(query) {
                return PeriodStatus::InInterval(period.label());
            }

            if let Some(next) = periods.get(i + 1) {
                if period.end < query && query < next.start {
                    return PeriodStatus::Transition {
                        from: period.label(),
                        to: next.label(),
                    };
                }
            }
        }

        PeriodStatus::NotInSession
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
