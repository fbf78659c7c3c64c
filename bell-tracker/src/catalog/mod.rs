/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The schedule catalog: every bell schedule known to the tracker.
//!
//! ```text
//! Catalog
//! ├── after_school: TimeOfDay          (one cut-off shared by all schedules)
//! └── schedules: [Schedule]
//!       ├── id            "regular" / "two_hour_delay" / "homeroom"
//!       ├── display_name  "SHS Bell Schedule (2024-2025)"
//!       └── periods: [Interval]  sorted, non-overlapping, gaps allowed
//! ```
//!
//! # Ownership model
//! A `Catalog` is built once at startup and never mutated.  Callers share it
//! behind an `Arc`; there is no interior mutability, so the type is
//! `Send + Sync` and any number of resolver calls may read it concurrently.
//!
//! Validation happens in [`Catalog::new`], not at query time.  A catalog that
//! exists is a catalog whose schedules are sorted and non-overlapping.

pub mod error;

pub use error::CatalogError;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::resolver::{PeriodResolver, PeriodStatus, ResolveError};
use crate::time::TimeOfDay;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Identifier of the everyday bell schedule.
pub const REGULAR: &str = "regular";

/// Identifier of the two-hour-delay schedule.
pub const TWO_HOUR_DELAY: &str = "two_hour_delay";

/// Identifier of the schedule with a 15 minute homeroom before Period 1.
pub const HOMEROOM: &str = "homeroom";

/// Default end-of-day cut-off.  Any time strictly later is "After School",
/// whichever schedule is active.
pub const DEFAULT_AFTER_SCHOOL: TimeOfDay = TimeOfDay::from_hm(14, 30);

/// The shipped Southampton High School 2024-2025 schedules.
const BUILTIN_SCHEDULES_YAML: &str = include_str!("../../schedules/shs_2024_2025.yaml");

// ── ScheduleId ────────────────────────────────────────────────────────────────

/// Identifier of a schedule inside the catalog (e.g. `"regular"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(String);

impl ScheduleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScheduleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ── IntervalKind ──────────────────────────────────────────────────────────────

/// Whether an interval is a numbered class period or a named block.
///
/// Decided once from the interval name when the interval is built, so the
/// resolver never has to re-inspect name strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    /// Name is a bare integer (`"1"`, `"9"`); displayed as `"Period {name}"`.
    Numbered(u32),
    /// Anything else (`"Homeroom"`, `"Extra Help"`); displayed verbatim.
    Named,
}

impl IntervalKind {
    /// Classify an interval name.
    ///
    /// A name made only of ASCII digits is numbered.  A digit string too long
    /// for `u32` is treated as a plain name.
    pub fn classify(name: &str) -> Self {
        if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = name.parse::<u32>() {
                return IntervalKind::Numbered(n);
            }
        }
        IntervalKind::Named
    }
}

// ── Interval ──────────────────────────────────────────────────────────────────

/// One named time span with an inclusive start and an inclusive end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub name: String,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// Published length in minutes.  Informational only; the resolver never
    /// reads it and it does not always agree with `end - start`.
    pub duration_minutes: u32,
    pub kind: IntervalKind,
}

impl Interval {
    pub fn new(
        name: impl Into<String>,
        start: TimeOfDay,
        end: TimeOfDay,
        duration_minutes: u32,
    ) -> Self {
        let name = name.into();
        let kind = IntervalKind::classify(&name);
        Self {
            name,
            start,
            end,
            duration_minutes,
            kind,
        }
    }

    /// Display label: `"Period 3"` for numbered intervals, the name otherwise.
    pub fn label(&self) -> String {
        match self.kind {
            IntervalKind::Numbered(_) => format!("Period {}", self.name),
            IntervalKind::Named => self.name.clone(),
        }
    }

    /// `true` if `time` lies in `[start, end]` (both ends inclusive).
    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time <= self.end
    }

    /// Actual length of the interval on the clock, in minutes.
    pub fn span_minutes(&self) -> i32 {
        self.start.minutes_until(self.end)
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// An ordered, day-scoped list of intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id: ScheduleId,
    pub display_name: String,
    pub periods: Vec<Interval>,
}

impl Schedule {
    pub fn new(
        id: impl Into<ScheduleId>,
        display_name: impl Into<String>,
        periods: Vec<Interval>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            periods,
        }
    }

    /// Start of the first interval, or `None` for an empty schedule.
    pub fn first_start(&self) -> Option<TimeOfDay> {
        self.periods.first().map(|p| p.start)
    }

    /// The interval named exactly `"1"`, if the schedule has one.
    pub fn period_one(&self) -> Option<&Interval> {
        self.periods.iter().find(|p| p.name == "1")
    }

    /// Check ordering and overlap invariants.
    fn validate(&self) -> Result<(), CatalogError> {
        for period in &self.periods {
            if period.start >= period.end {
                return Err(CatalogError::InvertedInterval {
                    schedule: self.id.to_string(),
                    interval: period.name.clone(),
                    start: period.start,
                    end: period.end,
                });
            }
            if i64::from(period.duration_minutes) != i64::from(period.span_minutes()) {
                debug!(
                    schedule = %self.id,
                    interval = %period.name,
                    published = period.duration_minutes,
                    actual = period.span_minutes(),
                    "published duration does not match start/end"
                );
            }
        }

        for pair in self.periods.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.start < prev.start {
                return Err(CatalogError::Unsorted {
                    schedule: self.id.to_string(),
                    previous: prev.name.clone(),
                    previous_start: prev.start,
                    interval: next.name.clone(),
                    start: next.start,
                });
            }
            if next.start < prev.end {
                return Err(CatalogError::Overlap {
                    schedule: self.id.to_string(),
                    previous: prev.name.clone(),
                    previous_end: prev.end,
                    interval: next.name.clone(),
                    start: next.start,
                });
            }
        }

        Ok(())
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Read-only registry of schedules, keyed by [`ScheduleId`].
///
/// Schedules keep the order they were supplied in; with a handful of entries
/// a linear lookup is all that is needed.
#[derive(Debug, Clone)]
pub struct Catalog {
    schedules: Vec<Schedule>,
    after_school: TimeOfDay,
}

impl Catalog {
    /// Validate `schedules` and build the catalog.
    ///
    /// # Errors
    /// Returns the first [`CatalogError`] found: a duplicated id, an interval
    /// with `start >= end`, unsorted periods, or overlapping periods.
    pub fn new(schedules: Vec<Schedule>, after_school: TimeOfDay) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for schedule in &schedules {
            if !seen.insert(schedule.id.clone()) {
                return Err(CatalogError::DuplicateSchedule {
                    id: schedule.id.to_string(),
                });
            }
            schedule.validate()?;
            debug!(
                id = %schedule.id,
                name = %schedule.display_name,
                periods = schedule.periods.len(),
                "schedule accepted"
            );
        }

        Ok(Self {
            schedules,
            after_school,
        })
    }

    /// The catalog compiled into the binary (Southampton High School,
    /// 2024-2025: regular, two-hour delay and homeroom schedules).
    pub fn builtin() -> anyhow::Result<Self> {
        crate::config::parse_catalog(BUILTIN_SCHEDULES_YAML)
    }

    /// Look up a schedule by id.
    ///
    /// # Errors
    /// [`ResolveError::UnknownSchedule`] if no schedule has that id.
    pub fn lookup(&self, id: &str) -> Result<&Schedule, ResolveError> {
        self.get(id).ok_or_else(|| ResolveError::UnknownSchedule {
            id: id.to_string(),
        })
    }

    pub fn get(&self, id: &str) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.id.as_str() == id)
    }

    /// All schedules, in the order they were supplied.
    pub fn schedules(&self) -> &[Schedule] {
        &self.schedules
    }

    pub fn ids(&self) -> impl Iterator<Item = &ScheduleId> {
        self.schedules.iter().map(|s| &s.id)
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn after_school(&self) -> TimeOfDay {
        self.after_school
    }

    /// A resolver using this catalog's after-school cut-off.
    pub fn resolver(&self) -> PeriodResolver {
        PeriodResolver::new(self.after_school)
    }

    /// Resolve a textual `HH:MM` time against the schedule `id`.
    ///
    /// # Errors
    /// * [`ResolveError::UnknownSchedule`] if `id` is not in the catalog.
    /// * [`ResolveError::MalformedTime`] if `time` is not a valid `HH:MM`.
    pub fn resolve(&self, id: &str, time: &str) -> Result<PeriodStatus, ResolveError> {
        let schedule = self.lookup(id)?;
        let query: TimeOfDay = time.parse()?;
        Ok(self.resolver().resolve(schedule, query))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn iv(name: &str, start: &str, end: &str) -> Interval {
        let (s, e) = (t(start), t(end));
        Interval::new(name, s, e, s.minutes_until(e) as u32)
    }

    // ── IntervalKind / Interval ───────────────────────────────────────────────

    #[test]
    fn classify_bare_integers_as_numbered() {
        assert_eq!(IntervalKind::classify("1"), IntervalKind::Numbered(1));
        assert_eq!(IntervalKind::classify("10"), IntervalKind::Numbered(10));
    }

    #[test]
    fn classify_everything_else_as_named() {
        for name in ["Homeroom", "Extra Help", "Warning Bell", "", "1a", " 1", "-1"] {
            assert_eq!(IntervalKind::classify(name), IntervalKind::Named, "{name:?}");
        }
        assert_eq!(
            IntervalKind::classify("99999999999999999999"),
            IntervalKind::Named
        );
    }

    #[test]
    fn label_formats_numbered_and_named_intervals() {
        assert_eq!(iv("3", "08:57", "09:37").label(), "Period 3");
        assert_eq!(iv("Extra Help", "14:05", "14:30").label(), "Extra Help");
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let p = iv("1", "07:25", "08:09");
        assert!(p.contains(t("07:25")));
        assert!(p.contains(t("08:09")));
        assert!(!p.contains(t("07:24")));
        assert!(!p.contains(t("08:10")));
    }

    // ── Catalog::new validation ───────────────────────────────────────────────

    #[test]
    fn accepts_contiguous_and_gapped_periods() {
        let sched = Schedule::new(
            "s",
            "S",
            vec![
                iv("Warning", "07:20", "07:25"),
                iv("1", "07:25", "08:09"),
                iv("2", "08:13", "08:53"),
            ],
        );
        let cat = Catalog::new(vec![sched], DEFAULT_AFTER_SCHOOL).unwrap();
        assert_eq!(cat.len(), 1);
    }

    #[test]
    fn accepts_empty_schedule() {
        let cat = Catalog::new(vec![Schedule::new("empty", "E", vec![])], DEFAULT_AFTER_SCHOOL)
            .unwrap();
        assert_eq!(cat.lookup("empty").unwrap().first_start(), None);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(
            vec![Schedule::new("a", "A", vec![]), Schedule::new("a", "B", vec![])],
            DEFAULT_AFTER_SCHOOL,
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateSchedule { id: "a".into() });
    }

    #[test]
    fn rejects_inverted_interval() {
        let bad = Interval::new("1", t("09:00"), t("08:00"), 0);
        let err = Catalog::new(vec![Schedule::new("s", "S", vec![bad])], DEFAULT_AFTER_SCHOOL)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvertedInterval { .. }));
    }

    #[test]
    fn rejects_zero_length_interval() {
        let bad = Interval::new("1", t("09:00"), t("09:00"), 0);
        let err = Catalog::new(vec![Schedule::new("s", "S", vec![bad])], DEFAULT_AFTER_SCHOOL)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvertedInterval { .. }));
    }

    #[test]
    fn rejects_unsorted_periods() {
        let sched = Schedule::new(
            "s",
            "S",
            vec![iv("2", "08:13", "08:53"), iv("1", "07:25", "08:09")],
        );
        let err = Catalog::new(vec![sched], DEFAULT_AFTER_SCHOOL).unwrap_err();
        assert!(matches!(err, CatalogError::Unsorted { ref interval, .. } if interval == "1"));
    }

    #[test]
    fn rejects_overlapping_periods() {
        let sched = Schedule::new(
            "s",
            "S",
            vec![iv("1", "07:25", "08:15"), iv("2", "08:13", "08:53")],
        );
        let err = Catalog::new(vec![sched], DEFAULT_AFTER_SCHOOL).unwrap_err();
        assert!(matches!(err, CatalogError::Overlap { ref previous, .. } if previous == "1"));
    }

    #[test]
    fn duration_mismatch_is_not_an_error() {
        // 07:25-08:09 is 44 minutes on the clock; the published value says 40.
        let p = Interval::new("1", t("07:25"), t("08:09"), 40);
        assert!(Catalog::new(vec![Schedule::new("s", "S", vec![p])], DEFAULT_AFTER_SCHOOL).is_ok());
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    #[test]
    fn lookup_unknown_id_is_typed_error() {
        let cat = Catalog::new(vec![], DEFAULT_AFTER_SCHOOL).unwrap();
        assert!(cat.is_empty());
        let err = cat.lookup("nope").unwrap_err();
        assert_eq!(err, ResolveError::UnknownSchedule { id: "nope".into() });
    }

    #[test]
    fn period_one_is_found_by_kind_not_position() {
        let sched = Schedule::new(
            "s",
            "S",
            vec![iv("Homeroom", "07:25", "07:40"), iv("1", "07:44", "08:26")],
        );
        assert_eq!(sched.period_one().unwrap().start, t("07:44"));
    }

    #[test]
    fn period_one_needs_the_exact_name() {
        let sched = Schedule::new(
            "s",
            "S",
            vec![iv("01", "07:25", "08:09"), iv("2", "08:13", "08:55")],
        );
        assert_eq!(sched.periods[0].kind, IntervalKind::Numbered(1));
        assert!(sched.period_one().is_none());
    }

    // ── Built-in catalog ──────────────────────────────────────────────────────

    #[test]
    fn builtin_catalog_has_three_schedules_in_display_order() {
        let cat = Catalog::builtin().unwrap();
        let ids: Vec<&str> = cat.ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec![REGULAR, TWO_HOUR_DELAY, HOMEROOM]);
        assert_eq!(cat.after_school(), DEFAULT_AFTER_SCHOOL);
    }

    #[test]
    fn builtin_regular_schedule_matches_published_bells() {
        let cat = Catalog::builtin().unwrap();
        let regular = cat.lookup(REGULAR).unwrap();
        assert_eq!(regular.display_name, "SHS Bell Schedule (2024-2025)");
        assert_eq!(regular.periods.len(), 11);
        assert_eq!(regular.periods[0].name, "Warning Bell");
        assert_eq!(regular.first_start(), Some(t("07:20")));
        assert_eq!(regular.periods[10].label(), "Extra Help");
        assert_eq!(regular.periods[10].end, t("14:30"));
    }

    #[test]
    fn builtin_homeroom_has_homeroom_before_period_one() {
        let cat = Catalog::builtin().unwrap();
        let homeroom = cat.lookup(HOMEROOM).unwrap();
        assert_eq!(homeroom.periods[1].name, "Homeroom");
        assert_eq!(homeroom.period_one().unwrap().start, t("07:44"));
    }

    #[test]
    fn catalog_resolve_composes_lookup_parse_and_resolve() {
        let cat = Catalog::builtin().unwrap();
        assert_eq!(cat.resolve(REGULAR, "07:30").unwrap().to_string(), "Period 1");
        assert!(matches!(
            cat.resolve(REGULAR, "7h30"),
            Err(ResolveError::MalformedTime(_))
        ));
        assert!(matches!(
            cat.resolve("weekend", "07:30"),
            Err(ResolveError::UnknownSchedule { .. })
        ));
    }
}
