//! One card session: state, celebration sequence and confetti
//!
//! The frame loop queues user inputs and calls [`tick`] once per animation
//! frame with the elapsed time.

use std::time::Duration;

use super::confetti::ConfettiSystem;
use super::sequencer::CelebrationSequencer;
use super::state::{CardEvent, CardState};
use crate::Viewport;
use crate::config::CardConfig;

/// A discrete user action on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardInput {
    LightCandle(u32),
    PopBalloon(u32),
    Celebrate,
}

/// Everything that changes during a session
#[derive(Debug)]
pub struct CardSession {
    pub state: CardState,
    pub sequencer: CelebrationSequencer,
    pub confetti: ConfettiSystem,
    viewport: Viewport,
}

impl CardSession {
    pub fn new(config: &CardConfig, seed: u64) -> Self {
        Self {
            state: CardState::from_config(config),
            sequencer: CelebrationSequencer::new(config.auto_advance_interval()),
            confetti: ConfettiSystem::new(
                seed,
                config.effective_confetti_pieces(),
                config.confetti_colors.len() as u32,
            ),
            viewport: Viewport::default(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Track a new viewport size (sizes the confetti overlay)
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.confetti.resize(viewport);
    }

    pub fn light_candle(&mut self, index: u32) -> bool {
        self.state.light_candle(index)
    }

    pub fn pop_balloon(&mut self, index: u32) -> bool {
        self.state.pop_balloon(index)
    }

    pub fn celebrate(&mut self) -> bool {
        self.sequencer.start(&mut self.state)
    }

    pub fn apply(&mut self, input: CardInput) -> bool {
        match input {
            CardInput::LightCandle(index) => self.light_candle(index),
            CardInput::PopBalloon(index) => self.pop_balloon(index),
            CardInput::Celebrate => self.celebrate(),
        }
    }

    /// Advance timers by `dt` seconds without applying input.
    /// Negative or non-finite deltas advance nothing.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.sequencer
            .advance(&mut self.state, Duration::from_secs_f32(dt));

        if self.state.show_completion_effect() {
            self.confetti.start(self.viewport);
        }
        self.confetti.update(dt);
    }
}

/// Apply queued inputs in order, then advance the session by `dt` seconds.
/// Returns the events produced during this frame.
pub fn tick(session: &mut CardSession, inputs: &[CardInput], dt: f32) -> Vec<CardEvent> {
    for input in inputs {
        session.apply(*input);
    }
    session.advance(dt);
    session.state.drain_events()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn session() -> CardSession {
        let mut session = CardSession::new(&CardConfig::default(), 12345);
        session.set_viewport(Viewport::new(1024.0, 768.0));
        session
    }

    #[test]
    fn test_inputs_applied_in_order() {
        let mut session = session();
        let inputs = [
            CardInput::LightCandle(1),
            CardInput::LightCandle(0),
            CardInput::LightCandle(1),
            CardInput::PopBalloon(0),
        ];
        let events = tick(&mut session, &inputs, FRAME);
        assert_eq!(session.state.candles_lit(), 2);
        assert_eq!(session.state.balloons_popped(), 1);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_confetti_starts_with_completion_effect() {
        let mut session = session();
        tick(&mut session, &[], FRAME);
        assert!(!session.confetti.is_active());

        let events = tick(&mut session, &[CardInput::Celebrate], FRAME);
        assert!(events.contains(&CardEvent::CompletionEffectShown));
        assert!(session.confetti.is_active());
        assert!(session.confetti.emitted() > 0);
    }

    #[test]
    fn test_celebration_over_frames() {
        let mut session = session();
        tick(&mut session, &[CardInput::Celebrate], 0.0);

        // 2.5 seconds of 60 fps frames covers five 500 ms ticks
        let mut finished = false;
        for _ in 0..160 {
            let events = tick(&mut session, &[], FRAME);
            finished |= events.contains(&CardEvent::CelebrationFinished);
        }
        assert!(finished);
        assert_eq!(session.state.candles_lit(), 5);
        assert_eq!(session.state.balloons_popped(), 0);
        assert!(!session.sequencer.is_running());
    }

    #[test]
    fn test_one_interval_lights_one_candle() {
        let mut session = session();
        tick(&mut session, &[CardInput::Celebrate], 0.0);
        tick(&mut session, &[], 0.5);
        assert_eq!(session.state.candles_lit(), 1);
        tick(&mut session, &[], 0.499);
        assert_eq!(session.state.candles_lit(), 1);
        tick(&mut session, &[], 0.001);
        assert_eq!(session.state.candles_lit(), 2);
    }

    #[test]
    fn test_bad_frame_delta_is_ignored() {
        let mut session = session();
        tick(&mut session, &[CardInput::Celebrate], 0.0);
        tick(&mut session, &[], f32::NAN);
        tick(&mut session, &[], f32::INFINITY);
        tick(&mut session, &[], -1.0);
        assert_eq!(session.state.candles_lit(), 0);
        assert!(session.sequencer.is_running());
    }

    #[test]
    fn test_resize_moves_confetti_floor() {
        let mut session = session();
        tick(&mut session, &[CardInput::Celebrate], 0.0);
        for _ in 0..120 {
            tick(&mut session, &[], FRAME);
        }
        session.set_viewport(Viewport::new(320.0, 240.0));
        assert_eq!(session.confetti.viewport(), Viewport::new(320.0, 240.0));
        tick(&mut session, &[], FRAME);
        assert!(session.confetti.pieces().iter().all(|p| p.pos.y - p.extent() <= 240.0));
    }
}
