//! Card configuration
//!
//! Read from the `data-config` attribute of the card root element. Every field
//! is optional; missing fields fall back to the defaults below.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Why a configuration was rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} must be at least 1")]
    ZeroTotal(&'static str),
    #[error("auto_advance_interval_ms must be greater than zero")]
    ZeroInterval,
    #[error("{0} palette is empty")]
    EmptyPalette(&'static str),
    #[error("invalid color {0:?} (expected #RRGGBB)")]
    BadColor(String),
}

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum confetti pieces for this preset
    pub fn max_confetti(&self) -> u32 {
        match self {
            QualityPreset::Low => 200,
            QualityPreset::Medium => 800,
            QualityPreset::High => 1500,
        }
    }
}

/// Card configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    // === Greeting ===
    pub title: String,
    pub recipient: String,
    pub date: String,

    // === Mini-games ===
    pub total_candles: u32,
    pub total_balloons: u32,
    /// Celebration auto-advance interval
    pub auto_advance_interval_ms: u64,

    // === Palettes (#RRGGBB) ===
    pub candle_colors: Vec<String>,
    pub balloon_colors: Vec<String>,
    pub confetti_colors: Vec<String>,

    // === Confetti ===
    pub confetti_pieces: u32,
    /// Fixed RNG seed; the clock is used when absent
    pub confetti_seed: Option<u64>,
    pub quality: QualityPreset,

    // === Accessibility / audio ===
    pub sound: bool,
    /// Reduced motion (no staggered candles, fewer confetti pieces)
    pub reduced_motion: bool,
}

const PALETTE: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8"];
const CONFETTI_EXTRA: [&str; 2] = ["#F7DC6F", "#BB8FCE"];

/// Color of a popped balloon
pub const POPPED_BALLOON_COLOR: &str = "#E2E8F0";

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            title: "Happy 18th Birthday!".to_string(),
            recipient: "Abdullah Kashif".to_string(),
            date: "July 16th".to_string(),

            total_candles: TOTAL_CANDLES,
            total_balloons: TOTAL_BALLOONS,
            auto_advance_interval_ms: AUTO_ADVANCE_INTERVAL_MS,

            candle_colors: palette(&PALETTE),
            balloon_colors: palette(&PALETTE),
            confetti_colors: palette(&[PALETTE.as_slice(), CONFETTI_EXTRA.as_slice()].concat()),

            confetti_pieces: CONFETTI_PIECES,
            confetti_seed: None,
            quality: QualityPreset::Medium,

            sound: false,
            reduced_motion: false,
        }
    }
}

impl CardConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CardConfig = serde_json::from_str(json)?;
        config.validate()
    }

    /// Parse `json` if present, falling back to defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|j| !j.trim().is_empty()) else {
            log::info!("Using default card config");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded card config for {:?}", config.recipient);
                config
            }
            Err(e) => {
                log::warn!("Ignoring card config: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.total_candles == 0 {
            return Err(ConfigError::ZeroTotal("total_candles"));
        }
        if self.total_balloons == 0 {
            return Err(ConfigError::ZeroTotal("total_balloons"));
        }
        if self.auto_advance_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        for (name, colors) in [
            ("candle", &self.candle_colors),
            ("balloon", &self.balloon_colors),
            ("confetti", &self.confetti_colors),
        ] {
            if colors.is_empty() {
                return Err(ConfigError::EmptyPalette(name));
            }
            if let Some(bad) = colors.iter().find(|c| parse_hex_color(c).is_none()) {
                return Err(ConfigError::BadColor(bad.clone()));
            }
        }
        Ok(self)
    }

    pub fn auto_advance_interval(&self) -> Duration {
        Duration::from_millis(self.auto_advance_interval_ms)
    }

    /// Confetti pieces after quality and reduced-motion caps
    pub fn effective_confetti_pieces(&self) -> u32 {
        let pieces = self.confetti_pieces.min(self.quality.max_confetti());
        if self.reduced_motion { pieces / 2 } else { pieces }
    }

    /// Candle color for `index`, cycling through the palette
    pub fn candle_color(&self, index: u32) -> &str {
        cycle(&self.candle_colors, index)
    }

    pub fn balloon_color(&self, index: u32) -> &str {
        cycle(&self.balloon_colors, index)
    }

    /// Confetti palette as linear RGBA for the GPU
    pub fn confetti_rgba(&self) -> Vec<[f32; 4]> {
        self.confetti_colors
            .iter()
            .filter_map(|c| parse_hex_color(c))
            .collect()
    }
}

fn cycle(colors: &[String], index: u32) -> &str {
    if colors.is_empty() {
        return POPPED_BALLOON_COLOR;
    }
    &colors[index as usize % colors.len()]
}

/// Parse `#RRGGBB` (or `RRGGBB`) into RGBA components in 0..=1
pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    Some([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
}
