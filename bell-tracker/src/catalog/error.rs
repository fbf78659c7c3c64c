/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Construction-time validation errors for the schedule catalog.
//!
//! A [`Catalog`](super::Catalog) is checked once when it is built, so a bad
//! schedule file is rejected at startup instead of producing a wrong status
//! string in the middle of the school day.  Every variant names the schedule
//! and interval involved so the message can be acted on without opening a
//! debugger.

use thiserror::Error;

use crate::time::TimeOfDay;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two schedules share the same identifier.
    #[error("schedule id '{id}' is defined more than once")]
    DuplicateSchedule { id: String },

    /// An interval does not start strictly before it ends.
    #[error("schedule '{schedule}': interval '{interval}' starts at {start} but ends at {end}")]
    InvertedInterval {
        schedule: String,
        interval: String,
        start: TimeOfDay,
        end: TimeOfDay,
    },

    /// An interval starts earlier than the one listed before it.
    #[error(
        "schedule '{schedule}': interval '{interval}' ({start}) is listed after '{previous}' ({previous_start}); periods must be sorted by start time"
    )]
    Unsorted {
        schedule: String,
        previous: String,
        previous_start: TimeOfDay,
        interval: String,
        start: TimeOfDay,
    },

    /// An interval starts before the previous one has ended.
    ///
    /// Touching boundaries (`next.start == previous.end`) are allowed.
    #[error(
        "schedule '{schedule}': interval '{interval}' starts at {start}, before '{previous}' ends at {previous_end}"
    )]
    Overlap {
        schedule: String,
        previous: String,
        previous_end: TimeOfDay,
        interval: String,
        start: TimeOfDay,
    },
}
