/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Errors returned when resolving a textual query against the catalog.
//!
//! The resolver itself is total: every `(Schedule, TimeOfDay)` pair has a
//! status.  Failures only come from the two inputs that arrive as strings,
//! the schedule id and the time.

use thiserror::Error;

use crate::time::TimeParseError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The schedule id is not present in the catalog.
    ///
    /// Kept distinct from `PeriodStatus::NotInSession` so a typo in a
    /// schedule id can never masquerade as "school is out".
    #[error("no schedule defined for id '{id}'")]
    UnknownSchedule { id: String },

    /// The query time is not a valid `HH:MM` string.
    #[error("malformed query time: {0}")]
    MalformedTime(#[from] TimeParseError),
}
