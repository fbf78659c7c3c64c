/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Presentation driver: polls the resolver on a fixed cadence and renders
//! one status line per schedule card.
//!
//! ```text
//! TimeSource ──(TimeOfDay)──► Driver ──(resolve × cards)──► Frame ──► StatusSurface
//!  clock / script               │
//!                               └── Arc<Catalog>, PeriodResolver, DisplaySettings
//! ```
//!
//! Every tick is an independent set of resolver calls.  The driver keeps no
//! day-phase state of its own; the only state it owns is the configuration
//! it was built with.

pub mod source;
pub mod surface;

pub use source::{ScriptedTimes, SystemClock, TimeSource, TEST_SEQUENCE};
pub use surface::{CardStatus, Frame, StatusSurface, TerminalSurface};

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, ScheduleId, HOMEROOM, REGULAR, TWO_HOUR_DELAY};
use crate::config::display::DisplaySettings;
use crate::resolver::PeriodResolver;
use crate::time::TimeOfDay;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Refresh cadence against the real clock.
pub const LIVE_CADENCE: Duration = Duration::from_secs(60);

/// Step cadence when replaying scripted times.
pub const TEST_CADENCE: Duration = Duration::from_secs(2);

/// Shown on a card whose schedule id is missing from the catalog.
pub const NO_SCHEDULE_TEXT: &str = "No schedule defined";

// ── Card ──────────────────────────────────────────────────────────────────────

/// One line of the display: a label bound to a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub label: String,
    pub schedule_id: ScheduleId,
}

impl Card {
    pub fn new(label: impl Into<String>, schedule_id: impl Into<ScheduleId>) -> Self {
        Self {
            label: label.into(),
            schedule_id: schedule_id.into(),
        }
    }
}

/// The three cards shown side by side: regular, delay and homeroom.
pub fn default_cards() -> Vec<Card> {
    vec![
        Card::new("Regular Schedule", REGULAR),
        Card::new("2 Hour Delay", TWO_HOUR_DELAY),
        Card::new("Homeroom Schedule", HOMEROOM),
    ]
}

// ── Driver ────────────────────────────────────────────────────────────────────

pub struct Driver {
    catalog: Arc<Catalog>,
    resolver: PeriodResolver,
    cards: Vec<Card>,
    settings: DisplaySettings,
}

impl Driver {
    pub fn new(catalog: Arc<Catalog>, cards: Vec<Card>, settings: DisplaySettings) -> Self {
        let resolver = catalog.resolver();
        Self {
            catalog,
            resolver,
            cards,
            settings,
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Resolve every card at `time`.
    pub fn frame(&self, time: TimeOfDay, simulated: bool) -> Frame {
        let cards = self
            .cards
            .iter()
            .map(|card| {
                let id = card.schedule_id.as_str();
                let text = match self.catalog.lookup(id) {
                    Ok(schedule) => self.resolver.resolve(schedule, time).to_string(),
                    Err(e) => {
                        warn!(card = %card.label, "{e}");
                        NO_SCHEDULE_TEXT.to_string()
                    }
                };
                CardStatus {
                    label: card.label.clone(),
                    schedule_id: id.to_string(),
                    text,
                    colors: self.settings.colors_for(id),
                }
            })
            .collect();

        Frame {
            time,
            simulated,
            cards,
        }
    }

    /// Render one frame per tick until `source` is exhausted.
    ///
    /// The first frame is rendered immediately.  Returns the number of frames
    /// rendered.  A [`SystemClock`] never runs out, so a live run only ends
    /// when the caller drops the future (e.g. on Ctrl-C).
    ///
    /// # Errors
    /// Propagates the first error from `surface`.
    pub async fn run<S, V>(
        &self,
        source: &mut S,
        surface: &mut V,
        cadence: Duration,
    ) -> Result<usize>
    where
        S: TimeSource + ?Sized,
        V: StatusSurface + ?Sized,
    {
        info!(
            cadence_ms = cadence.as_millis() as u64,
            simulated = source.is_simulated(),
            cards = self.cards.len(),
            "Display loop started"
        );

        let mut ticker = tokio::time::interval(cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut rendered = 0usize;
        loop {
            ticker.tick().await;
            let Some(time) = source.next_time() else {
                break;
            };

            let frame = self.frame(time, source.is_simulated());
            debug!(time = %frame.time, "tick");
            surface.render(&frame)?;
            rendered += 1;
        }

        info!(frames = rendered, "Display loop finished");
        Ok(rendered)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    /// Collects frames instead of drawing them.
    #[derive(Default)]
    struct Recorder {
        frames: Vec<Frame>,
    }

    impl StatusSurface for Recorder {
        fn render(&mut self, frame: &Frame) -> Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }
    }

    struct Broken;

    impl StatusSurface for Broken {
        fn render(&mut self, _frame: &Frame) -> Result<()> {
            anyhow::bail!("display unplugged")
        }
    }

    fn driver(cards: Vec<Card>) -> Driver {
        Driver::new(
            Arc::new(Catalog::builtin().unwrap()),
            cards,
            DisplaySettings::default(),
        )
    }

    fn texts(frame: &Frame) -> Vec<&str> {
        frame.cards.iter().map(|c| c.text.as_str()).collect()
    }

    // ── frame ─────────────────────────────────────────────────────────────────

    #[test]
    fn frame_resolves_all_three_schedules() {
        let d = driver(default_cards());
        assert_eq!(d.cards().len(), 3);
        let frame = d.frame("07:30".parse().unwrap(), false);
        assert_eq!(texts(&frame), vec!["Period 1", "Before School", "Homeroom"]);
        assert_eq!(frame.cards[1].label, "2 Hour Delay");
    }

    #[test]
    fn unknown_schedule_card_shows_sentinel() {
        let d = driver(vec![Card::new("Weekend", "weekend")]);
        let frame = d.frame("10:00".parse().unwrap(), false);
        assert_eq!(texts(&frame), vec![NO_SCHEDULE_TEXT]);
    }

    // ── run ───────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn run_replays_scripted_times_then_stops() {
        let d = driver(default_cards());
        let mut source = ScriptedTimes::test_sequence();
        let mut recorder = Recorder::default();

        let rendered = d
            .run(&mut source, &mut recorder, Duration::from_millis(1))
            .await
            .unwrap();

        assert_eq!(rendered, TEST_SEQUENCE.len());
        assert!(recorder.frames.iter().all(|f| f.simulated));
        assert_eq!(recorder.frames[0].cards[0].text, "Before School");
        assert_eq!(recorder.frames[5].cards[0].text, "Period 1 → Period 2");
        assert_eq!(recorder.frames[13].cards[0].text, "After School");
    }

    #[tokio::test]
    async fn restarted_source_replays_identically() {
        let d = driver(default_cards());
        let mut source = ScriptedTimes::test_sequence();
        let mut first = Recorder::default();
        let mut second = Recorder::default();

        d.run(&mut source, &mut first, Duration::from_millis(1)).await.unwrap();
        source.restart();
        d.run(&mut source, &mut second, Duration::from_millis(1)).await.unwrap();

        assert_eq!(first.frames, second.frames);
    }

    #[tokio::test]
    async fn surface_error_stops_the_loop() {
        let d = driver(default_cards());
        let mut source = ScriptedTimes::test_sequence();
        let err = d
            .run(&mut source, &mut Broken, Duration::from_millis(1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unplugged"));
        assert_eq!(source.remaining(), TEST_SEQUENCE.len() - 1);
    }
}
