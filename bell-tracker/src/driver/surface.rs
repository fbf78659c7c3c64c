/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Display surfaces: where a rendered [`Frame`] ends up.

use std::io::Write;

use anyhow::{Context, Result};

use crate::config::display::{CardColors, Rgb};
use crate::time::TimeOfDay;

/// Status of one card at one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStatus {
    pub label: String,
    pub schedule_id: String,
    /// Resolved status string, or the "no schedule" sentinel.
    pub text: String,
    pub colors: CardColors,
}

/// Everything shown for a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub time: TimeOfDay,
    pub simulated: bool,
    pub cards: Vec<CardStatus>,
}

pub trait StatusSurface {
    fn render(&mut self, frame: &Frame) -> Result<()>;
}

// ── TerminalSurface ───────────────────────────────────────────────────────────

/// Writes one block of text per frame, optionally colored with 24-bit ANSI
/// escapes.
pub struct TerminalSurface<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, fg: Rgb, bg: Rgb) -> String {
        if !self.color {
            return text.to_string();
        }
        format!(
            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
            fg.r, fg.g, fg.b, bg.r, bg.g, bg.b, text
        )
    }
}

impl<W: Write> StatusSurface for TerminalSurface<W> {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        let heading = if frame.simulated {
            format!("Testing with time: {}", frame.time)
        } else {
            format!("Current time: {}", frame.time)
        };

        let width = frame
            .cards
            .iter()
            .map(|c| c.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut block = String::new();
        block.push_str(&heading);
        block.push('\n');
        for card in &frame.cards {
            let label = format!(" {:<width$} ", card.label, width = width);
            let message = format!(" {} ", card.text);
            block.push_str(&self.paint(&label, card.colors.label, card.colors.background));
            block.push_str(&self.paint(&message, card.colors.message, card.colors.background));
            block.push('\n');
        }

        self.out
            .write_all(block.as_bytes())
            .and_then(|_| self.out.flush())
            .context("Failed to write to terminal")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(simulated: bool) -> Frame {
        Frame {
            time: "08:11".parse().unwrap(),
            simulated,
            cards: vec![
                CardStatus {
                    label: "Regular Schedule".into(),
                    schedule_id: "regular".into(),
                    text: "Period 1 → Period 2".into(),
                    colors: CardColors::default(),
                },
                CardStatus {
                    label: "Homeroom".into(),
                    schedule_id: "homeroom".into(),
                    text: "Period 1".into(),
                    colors: CardColors::default(),
                },
            ],
        }
    }

    fn render_plain(f: &Frame) -> String {
        let mut surface = TerminalSurface::new(Vec::new(), false);
        surface.render(f).unwrap();
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn plain_output_aligns_labels() {
        let out = render_plain(&frame(false));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Current time: 08:11");
        assert_eq!(lines[1], " Regular Schedule  Period 1 → Period 2 ");
        assert_eq!(lines[2], " Homeroom          Period 1 ");
    }

    #[test]
    fn simulated_frames_are_announced() {
        let out = render_plain(&frame(true));
        assert!(out.starts_with("Testing with time: 08:11\n"));
    }

    #[test]
    fn colored_output_uses_card_colors() {
        let mut surface = TerminalSurface::new(Vec::new(), true);
        surface.render(&frame(false)).unwrap();
        let out = String::from_utf8(surface.into_inner()).unwrap();
        // yellow message on navy
        assert!(out.contains("\x1b[38;2;255;255;0m\x1b[48;2;0;0;128m Period 1 \x1b[0m"));
    }
}
