/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::io;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info, warn};

use bell_tracker::catalog::Catalog;
use bell_tracker::config::display::{ColorAssignment, DisplaySettings};
use bell_tracker::config::load_catalog_from_file;
use bell_tracker::driver::{
    default_cards, Driver, ScriptedTimes, StatusSurface, SystemClock, TerminalSurface,
    TimeSource, LIVE_CADENCE, TEST_CADENCE,
};
use bell_tracker::TimeOfDay;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Bell Tracker – shows the current period on every bell schedule.
///
/// Example:
///   bell-tracker --simulate --interval-secs 1
///   bell-tracker --at 08:11 --schedules schedules/shs_2024_2025.yaml
#[derive(Debug, Parser)]
#[command(name = "bell-tracker", about = "Bell schedule tracker", long_about = None)]
struct Cli {
    /// YAML schedule file.  The built-in 2024-2025 schedules are used when absent.
    #[arg(short = 's', long = "schedules")]
    schedules: Option<PathBuf>,

    /// YAML file holding the card colors.
    #[arg(short = 'c', long = "settings")]
    settings: Option<PathBuf>,

    /// Reset the card colors to their defaults and save them to --settings.
    #[arg(long = "reset-colors", default_value_t = false, requires = "settings")]
    reset_colors: bool,

    /// Change one card color and save it to --settings
    /// (e.g. regular.background=#800000).  May be repeated.
    #[arg(long = "set-color", value_name = "ID.PART=#RRGGBB", requires = "settings")]
    set_color: Vec<ColorAssignment>,

    /// Resolve a single HH:MM time, print it and exit.
    #[arg(short = 'a', long = "at", conflicts_with_all = ["simulate", "times_file"])]
    at: Option<String>,

    /// Replay the built-in test sequence of times.
    #[arg(short = 't', long = "simulate", default_value_t = false, conflicts_with = "times_file")]
    simulate: bool,

    /// Replay the times listed in a file (one HH:MM per line).
    #[arg(short = 'f', long = "times-file")]
    times_file: Option<PathBuf>,

    /// Return to the live clock once a replay has finished.
    #[arg(long = "then-live", default_value_t = false)]
    then_live: bool,

    /// Seconds between display updates (default: 60 live, 2 when replaying).
    #[arg(short = 'i', long = "interval-secs")]
    interval_secs: Option<u64>,

    /// Disable ANSI colors.
    #[arg(long = "no-color", default_value_t = false)]
    no_color: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Initialise structured logging on stderr; stdout is the display.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    info!(
        schedules = ?cli.schedules,
        settings  = ?cli.settings,
        at        = ?cli.at,
        simulate  = cli.simulate,
        times     = ?cli.times_file,
        "Configuration"
    );

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // ── Load schedules ────────────────────────────────────────────────────────
    let catalog = match &cli.schedules {
        Some(path) => load_catalog_from_file(path)?,
        None => {
            info!("No schedule file provided, using built-in schedules");
            Catalog::builtin().context("Built-in schedules are invalid")?
        }
    };

    // ── Load display settings ─────────────────────────────────────────────────
    let mut settings = match &cli.settings {
        Some(path) => DisplaySettings::load_or_default(path)?,
        None => DisplaySettings::default(),
    };
    if cli.reset_colors {
        settings.reset();
    }
    for edit in &cli.set_color {
        settings.apply(edit);
    }
    if cli.reset_colors || !cli.set_color.is_empty() {
        if let Some(path) = &cli.settings {
            settings.save(path)?;
            info!(path = %path.display(), "Card colors saved");
        }
    }

    let driver = Driver::new(Arc::new(catalog), default_cards(), settings);
    let mut surface = TerminalSurface::new(io::stdout(), !cli.no_color);

    // ── One-shot query ────────────────────────────────────────────────────────
    if let Some(at) = &cli.at {
        let time: TimeOfDay = at
            .parse()
            .with_context(|| format!("Invalid --at time '{at}'"))?;
        return surface.render(&driver.frame(time, false));
    }

    // ── Scripted replay ───────────────────────────────────────────────────────
    let script = if let Some(path) = &cli.times_file {
        Some(ScriptedTimes::from_file(path)?)
    } else if cli.simulate {
        Some(ScriptedTimes::test_sequence())
    } else {
        None
    };

    let cadence = |default: Duration| -> Result<Duration> {
        match cli.interval_secs {
            Some(0) => bail!("--interval-secs must be at least 1"),
            Some(secs) => Ok(Duration::from_secs(secs)),
            None => Ok(default),
        }
    };

    if let Some(mut script) = script {
        info!(times = script.len(), "Test mode");
        let step = cadence(TEST_CADENCE)?;
        let done = run_until_ctrl_c(&driver, &mut script, &mut surface, step).await?;
        if !done || !cli.then_live {
            return Ok(());
        }
        info!("Test sequence finished, returning to normal operation");
    }

    // ── Live display ──────────────────────────────────────────────────────────
    let step = cadence(LIVE_CADENCE)?;
    run_until_ctrl_c(&driver, &mut SystemClock, &mut surface, step).await?;
    Ok(())
}

/// Run the display loop until the source is exhausted or Ctrl-C is pressed.
///
/// Returns `false` if interrupted.
async fn run_until_ctrl_c<S, V>(
    driver: &Driver,
    source: &mut S,
    surface: &mut V,
    cadence: Duration,
) -> Result<bool>
where
    S: TimeSource,
    V: StatusSurface,
{
    tokio::select! {
        result = driver.run(source, surface, cadence) => {
            result?;
            Ok(true)
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, shutting down");
            Ok(false)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
