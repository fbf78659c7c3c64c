/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Per-card display colors, persisted as YAML.
//!
//! ```yaml
//! colors:
//!   regular:
//!     background: "#000080"
//!     label: "#FFFFFF"
//!     message: "#FFFF00"
//! ```
//!
//! Cards without an entry use [`CardColors::default`].  A missing settings
//! file is not an error (first run); an unreadable or malformed one is.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{HOMEROOM, REGULAR, TWO_HOUR_DELAY};

// ── Rgb ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a #RRGGBB color")]
pub struct ColorParseError(String);

/// A 24-bit color, written `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

// ── CardColors ────────────────────────────────────────────────────────────────

/// Colors of one schedule card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardColors {
    pub background: Rgb,
    pub label: Rgb,
    pub message: Rgb,
}

impl Default for CardColors {
    /// Navy background, white label, yellow message.
    fn default() -> Self {
        Self {
            background: Rgb::new(0x00, 0x00, 0x80),
            label: Rgb::new(0xFF, 0xFF, 0xFF),
            message: Rgb::new(0xFF, 0xFF, 0x00),
        }
    }
}

// ── ColorAssignment ───────────────────────────────────────────────────────────

/// Which of a card's three colors to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorPart {
    Background,
    Label,
    Message,
}

impl FromStr for ColorPart {
    type Err = AssignmentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "background" => Ok(ColorPart::Background),
            "label" => Ok(ColorPart::Label),
            "message" => Ok(ColorPart::Message),
            other => Err(AssignmentParseError::UnknownPart(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentParseError {
    #[error("'{0}' is not of the form <schedule>.<part>=#RRGGBB")]
    Format(String),

    #[error("unknown color part '{0}' (expected background, label or message)")]
    UnknownPart(String),

    #[error(transparent)]
    Color(#[from] ColorParseError),
}

/// One color edit from the command line, e.g. `regular.background=#800000`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorAssignment {
    pub schedule_id: String,
    pub part: ColorPart,
    pub color: Rgb,
}

impl FromStr for ColorAssignment {
    type Err = AssignmentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || AssignmentParseError::Format(s.to_string());
        let (target, color) = s.split_once('=').ok_or_else(format_err)?;
        let (schedule_id, part) = target.trim().split_once('.').ok_or_else(format_err)?;
        if schedule_id.is_empty() {
            return Err(format_err());
        }
        Ok(Self {
            schedule_id: schedule_id.to_string(),
            part: part.parse()?,
            color: color.parse()?,
        })
    }
}

// ── DisplaySettings ───────────────────────────────────────────────────────────

/// Color preferences for every card, keyed by schedule id.
///
/// An explicit value owned by the driver; there is no process-wide copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default)]
    colors: BTreeMap<String, CardColors>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        let colors = [REGULAR, TWO_HOUR_DELAY, HOMEROOM]
            .into_iter()
            .map(|id| (id.to_string(), CardColors::default()))
            .collect();
        Self { colors }
    }
}

impl DisplaySettings {
    /// Colors for the card showing `schedule_id`, or the defaults.
    pub fn colors_for(&self, schedule_id: &str) -> CardColors {
        self.colors.get(schedule_id).copied().unwrap_or_default()
    }

    pub fn set_colors(&mut self, schedule_id: impl Into<String>, colors: CardColors) {
        self.colors.insert(schedule_id.into(), colors);
    }

    /// Change one color of one card, starting from its current colors.
    pub fn apply(&mut self, edit: &ColorAssignment) {
        let mut colors = self.colors_for(&edit.schedule_id);
        match edit.part {
            ColorPart::Background => colors.background = edit.color,
            ColorPart::Label => colors.label = edit.color,
            ColorPart::Message => colors.message = edit.color,
        }
        debug!(card = %edit.schedule_id, part = ?edit.part, color = %edit.color, "card color changed");
        self.set_colors(edit.schedule_id.clone(), colors);
    }

    /// Restore every card to the default colors.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load settings from `path`, or return the defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read, is not valid
    /// YAML, or contains a color that is not `#RRGGBB`.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "No display settings at {}, using default colors",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open display settings: {}", path.display()))?;
        let settings: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse display settings: {}", path.display()))?;

        debug!(cards = settings.colors.len(), "Display settings loaded");
        Ok(settings)
    }

    /// Write the settings to `path`, replacing any previous file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self).context("Failed to serialise display settings")?;
        std::fs::write(path, yaml)
            .with_context(|| format!("Cannot write display settings: {}", path.display()))?;
        info!("Display settings saved to {}", path.display());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
