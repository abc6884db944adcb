//! Birthday Wish - an interactive birthday greeting card
//!
//! Core modules:
//! - `sim`: Card state machine, celebration sequencer, confetti simulation
//! - `view`: Pure projection of the card state for the presentation layer
//! - `config`: Data-driven card configuration (greeting text, totals, palettes)
//! - `renderer`: WebGPU confetti overlay
//! - `platform`: Browser glue (DOM card, viewport tracking)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod view;

pub use config::{CardConfig, ConfigError, QualityPreset};
pub use view::CardView;

use serde::{Deserialize, Serialize};

/// Card configuration constants
pub mod consts {
    /// Candles on the cake
    pub const TOTAL_CANDLES: u32 = 5;
    /// Balloons to pop
    pub const TOTAL_BALLOONS: u32 = 5;

    /// Celebration auto-advance interval
    pub const AUTO_ADVANCE_INTERVAL_MS: u64 = 500;
    /// Stagger between lit candles appearing during a celebration
    pub const CANDLE_APPEAR_STAGGER_SECS: f32 = 0.4;

    /// Confetti pieces emitted by one completion effect
    pub const CONFETTI_PIECES: u32 = 800;

    /// Reference frame rate the confetti constants are expressed in
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Longest frame delta fed to the simulation (tab switches, breakpoints)
    pub const MAX_FRAME_DT: f32 = 0.25;
}

/// Size of the browser viewport in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A zero-area viewport has nothing to draw into
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Seconds between two `requestAnimationFrame` timestamps (milliseconds).
///
/// The first frame (`last_ms == 0`) assumes one reference frame. Stalls are
/// clamped to `MAX_FRAME_DT` so a backgrounded tab resumes smoothly.
pub fn frame_delta(last_ms: f64, now_ms: f64) -> f32 {
    use consts::{MAX_FRAME_DT, REFERENCE_FPS};

    if last_ms <= 0.0 {
        return 1.0 / REFERENCE_FPS;
    }
    let dt = ((now_ms - last_ms) / 1000.0) as f32;
    if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consts::{MAX_FRAME_DT, REFERENCE_FPS};

    #[test]
    fn test_frame_delta() {
        assert_eq!(frame_delta(0.0, 1234.0), 1.0 / REFERENCE_FPS);
        assert!((frame_delta(1000.0, 1016.0) - 0.016).abs() < 1e-6);
        assert!((frame_delta(1000.0, 1500.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_frame_delta_clamps_stalls() {
        // Ten seconds in a background tab
        assert_eq!(frame_delta(1000.0, 11_000.0), MAX_FRAME_DT);
        // Timestamps going backwards
        assert_eq!(frame_delta(2000.0, 1000.0), 0.0);
    }
}
