/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Bell Tracker – which period is it right now?
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── time/       – minute-resolution TimeOfDay, HH:MM parsing
//! ├── catalog/    – validated, read-only schedule registry
//! ├── resolver/   – (schedule, time) → status classification
//! ├── config/     – YAML schedule file + display color settings
//! └── driver/     – ticking display loop, time sources, surfaces
//! ```
//!
//! # Example
//! ```rust
//! use bell_tracker::catalog::{Catalog, REGULAR};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let status = catalog.resolve(REGULAR, "08:11").unwrap();
//! assert_eq!(status.to_string(), "Period 1 → Period 2");
//! ```

pub mod catalog;
pub mod config;
pub mod driver;
pub mod resolver;
pub mod time;

pub use catalog::{Catalog, Interval, IntervalKind, Schedule, ScheduleId};
pub use resolver::{PeriodResolver, PeriodStatus, ResolveError};
pub use time::{TimeOfDay, TimeParseError};
