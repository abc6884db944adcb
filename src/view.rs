//! Card view model
//!
//! A pure function of the card state and config. The DOM layer renders this
//! snapshot and never reads the state directly.

use serde::Serialize;

use crate::config::{CardConfig, POPPED_BALLOON_COLOR};
use crate::consts::CANDLE_APPEAR_STAGGER_SECS;
use crate::sim::CardState;

/// How a candle is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CandleLook {
    Unlit,
    /// Next candle the celebration sequence is about to light
    Igniting,
    Lit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleView {
    pub look: CandleLook,
    /// CSS color for lit or igniting candles, `None` for the grey unlit icon
    pub color: Option<String>,
    /// Delay before the lit animation plays, in seconds
    pub appear_delay: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalloonView {
    pub popped: bool,
    pub color: String,
    /// Target scale (0 once popped)
    pub scale: f32,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub title: String,
    pub recipient: String,
    pub date: String,
    pub candles: Vec<CandleView>,
    pub balloons: Vec<BalloonView>,
    pub celebrate_enabled: bool,
    pub show_confetti: bool,
    pub progress: String,
}

impl CardView {
    pub fn from_state(state: &CardState, config: &CardConfig) -> Self {
        let celebrating = state.celebrating();

        let candles = (0..state.total_candles())
            .map(|i| {
                let look = if i < state.candles_lit() {
                    CandleLook::Lit
                } else if celebrating && i == state.candles_lit() {
                    CandleLook::Igniting
                } else {
                    CandleLook::Unlit
                };
                let appear_delay = if celebrating && !config.reduced_motion {
                    i as f32 * CANDLE_APPEAR_STAGGER_SECS
                } else {
                    0.0
                };
                CandleView {
                    look,
                    color: (look != CandleLook::Unlit).then(|| config.candle_color(i).to_string()),
                    appear_delay,
                }
            })
            .collect();

        let balloons = (0..state.total_balloons())
            .map(|i| {
                let popped = i < state.balloons_popped();
                BalloonView {
                    popped,
                    color: if popped {
                        POPPED_BALLOON_COLOR.to_string()
                    } else {
                        config.balloon_color(i).to_string()
                    },
                    scale: if popped { 0.0 } else { 1.0 },
                }
            })
            .collect();

        Self {
            title: config.title.clone(),
            recipient: config.recipient.clone(),
            date: config.date.clone(),
            candles,
            balloons,
            celebrate_enabled: !celebrating,
            show_confetti: state.show_completion_effect(),
            progress: format!(
                "{}/{} candles lit, {}/{} balloons popped",
                state.candles_lit(),
                state.total_candles(),
                state.balloons_popped(),
                state.total_balloons()
            ),
        }
    }
}
