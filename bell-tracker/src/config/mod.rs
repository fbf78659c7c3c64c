//! Schedule file loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! after_school: "14:30"          # optional, defaults to 14:30
//! schedules:
//!   - id: regular
//!     name: "SHS Bell Schedule (2024-2025)"
//!     periods:
//!       - { name: "Warning Bell", start: "07:20", end: "07:25", minutes: 5 }
//!       - { name: "1",            start: "07:25", end: "08:09", minutes: 40 }
//! ```
//!
//! Schedules are a list rather than a map so the file order is also the
//! display order.  Display preferences live in a separate file, see
//! [`display`].

pub mod display;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Interval, Schedule, DEFAULT_AFTER_SCHOOL};
use crate::time::TimeOfDay;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// Kept private; callers only ever see the validated [`Catalog`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScheduleFile {
    #[serde(default = "default_after_school")]
    after_school: TimeOfDay,
    #[serde(default)]
    schedules: Vec<ScheduleEntry>,
}

#[derive(Debug, Deserialize)]
struct ScheduleEntry {
    id: String,
    /// Human-readable title.  Falls back to the id when absent.
    name: Option<String>,
    #[serde(default)]
    periods: Vec<PeriodEntry>,
}

/// One `{name, start, end, minutes}` record.
#[derive(Debug, Deserialize)]
struct PeriodEntry {
    name: String,
    start: TimeOfDay,
    end: TimeOfDay,
    /// Published length.  Computed from `start`/`end` when absent.
    minutes: Option<u32>,
}

fn default_after_school() -> TimeOfDay {
    DEFAULT_AFTER_SCHOOL
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a schedule YAML document into a validated [`Catalog`].
///
/// # Errors
/// Returns an error if the YAML is structurally invalid, a time is not
/// `HH:MM`, or the schedules break a catalog invariant (see
/// [`CatalogError`](crate::catalog::CatalogError)).
pub fn parse_catalog(yaml: &str) -> Result<Catalog> {
    let file: ScheduleFile =
        serde_yaml::from_str(yaml).context("Failed to parse schedule YAML")?;

    if file.schedules.is_empty() {
        warn!("Schedule file defines no schedules");
    }

    let schedules = file
        .schedules
        .into_iter()
        .map(|entry| {
            let periods: Vec<Interval> = entry
                .periods
                .into_iter()
                .map(|p| {
                    let minutes = p
                        .minutes
                        .unwrap_or_else(|| p.start.minutes_until(p.end).max(0) as u32);
                    Interval::new(p.name, p.start, p.end, minutes)
                })
                .collect();

            debug!(
                "  Schedule: {} | {} period(s) | first bell: {}",
                entry.id,
                periods.len(),
                periods
                    .first()
                    .map(|p| p.start.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            );

            let display_name = entry.name.unwrap_or_else(|| entry.id.clone());
            Schedule::new(entry.id.as_str(), display_name, periods)
        })
        .collect();

    let catalog =
        Catalog::new(schedules, file.after_school).context("Invalid schedule catalog")?;

    info!(
        schedules = catalog.len(),
        after_school = %catalog.after_school(),
        "Schedule catalog ready"
    );
    Ok(catalog)
}

/// Read and parse the schedule file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be opened, or for any reason listed on
/// [`parse_catalog`].
pub fn load_catalog_from_file(path: &Path) -> Result<Catalog> {
    info!("Loading schedules from: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot open schedule file: {}", path.display()))?;

    parse_catalog(&content).with_context(|| format!("Bad schedule file: {}", path.display()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
