/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Where the driver gets "now" from.
//!
//! The live display reads the local clock; test mode replays a fixed list of
//! times.  Both sit behind [`TimeSource`] so the driver loop is identical.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::time::TimeOfDay;

/// Times stepped through by test mode: one per day phase of the regular
/// schedule, from before school to after school.
pub const TEST_SEQUENCE: [&str; 14] = [
    "06:45", // before school
    "07:15", // before the warning bell
    "07:22", // warning bell
    "07:24",
    "07:30", // period 1
    "08:11", // period 1 → period 2
    "08:30",
    "09:39",
    "11:07",
    "12:35",
    "13:19",
    "14:03", // period 9 → extra help
    "14:15", // extra help
    "14:31", // after school
];

pub trait TimeSource {
    /// The next time to display, or `None` when the source is exhausted.
    fn next_time(&mut self) -> Option<TimeOfDay>;

    /// `true` for replayed times, so the display can say so.
    fn is_simulated(&self) -> bool {
        false
    }
}

// ── SystemClock ───────────────────────────────────────────────────────────────

/// The local wall clock.  Never exhausted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn next_time(&mut self) -> Option<TimeOfDay> {
        Some(TimeOfDay::now_local())
    }
}

// ── ScriptedTimes ─────────────────────────────────────────────────────────────

/// A finite, restartable list of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedTimes {
    times: Vec<TimeOfDay>,
    cursor: usize,
}

impl ScriptedTimes {
    pub fn new(times: Vec<TimeOfDay>) -> Self {
        Self { times, cursor: 0 }
    }

    /// The built-in [`TEST_SEQUENCE`].
    pub fn test_sequence() -> Self {
        Self::new(
            TEST_SEQUENCE
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect(),
        )
    }

    /// Parse one `HH:MM` per line.  Blank lines are ignored.
    ///
    /// # Errors
    /// Returns an error naming the first line that is not a valid time, or
    /// if the content holds no time at all.
    pub fn parse_lines(content: &str) -> Result<Self> {
        let mut times = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let time = line
                .parse::<TimeOfDay>()
                .with_context(|| format!("line {}", lineno + 1))?;
            times.push(time);
        }

        if times.is_empty() {
            bail!("no HH:MM times found");
        }
        debug!(count = times.len(), "scripted times parsed");
        Ok(Self::new(times))
    }

    /// Read a time file (see [`parse_lines`](Self::parse_lines)).
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open time file: {}", path.display()))?;
        Self::parse_lines(&content).with_context(|| format!("Bad time file: {}", path.display()))
    }

    /// Rewind to the first time.
    pub fn restart(&mut self) {
        self.cursor = 0;
    }

    /// Times not yet handed out.
    pub fn remaining(&self) -> usize {
        self.times.len() - self.cursor
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

impl TimeSource for ScriptedTimes {
    fn next_time(&mut self) -> Option<TimeOfDay> {
        let time = self.times.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(time)
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
