//! Card state and progress tracking
//!
//! Candles and balloons both follow the sequential-order guard: only the next
//! unprocessed index advances progress, every other index is ignored.

use serde::Serialize;

use crate::config::CardConfig;

/// Something observable that happened to the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardEvent {
    /// A candle was lit (`auto` when lit by the celebration sequence)
    CandleLit { index: u32, auto: bool },
    /// A balloon was popped
    BalloonPopped { index: u32 },
    /// The celebrate button was pressed
    CelebrationStarted,
    /// The confetti overlay switched on
    CompletionEffectShown,
    /// The celebration sequence lit its last candle
    CelebrationFinished,
}

/// True once every candle is lit and every balloon is popped
#[inline]
pub fn completion_reached(
    candles_lit: u32,
    total_candles: u32,
    balloons_popped: u32,
    total_balloons: u32,
) -> bool {
    candles_lit == total_candles && balloons_popped == total_balloons
}

/// Complete card state for one session
#[derive(Debug, Clone, Serialize)]
pub struct CardState {
    total_candles: u32,
    total_balloons: u32,
    candles_lit: u32,
    balloons_popped: u32,
    celebrating: bool,
    show_completion_effect: bool,
    /// Events not yet drained by the presentation layer
    #[serde(skip)]
    events: Vec<CardEvent>,
}

impl Default for CardState {
    fn default() -> Self {
        Self::new(crate::consts::TOTAL_CANDLES, crate::consts::TOTAL_BALLOONS)
    }
}

impl CardState {
    pub fn new(total_candles: u32, total_balloons: u32) -> Self {
        Self {
            total_candles,
            total_balloons,
            candles_lit: 0,
            balloons_popped: 0,
            celebrating: false,
            show_completion_effect: false,
            events: Vec::new(),
        }
    }

    pub fn from_config(config: &CardConfig) -> Self {
        Self::new(config.total_candles, config.total_balloons)
    }

    pub fn total_candles(&self) -> u32 {
        self.total_candles
    }

    pub fn total_balloons(&self) -> u32 {
        self.total_balloons
    }

    pub fn candles_lit(&self) -> u32 {
        self.candles_lit
    }

    pub fn balloons_popped(&self) -> u32 {
        self.balloons_popped
    }

    pub fn celebrating(&self) -> bool {
        self.celebrating
    }

    pub fn show_completion_effect(&self) -> bool {
        self.show_completion_effect
    }

    pub fn all_candles_lit(&self) -> bool {
        self.candles_lit >= self.total_candles
    }

    pub fn all_balloons_popped(&self) -> bool {
        self.balloons_popped >= self.total_balloons
    }

    /// Light the candle at `index`. Returns true if progress advanced.
    pub fn light_candle(&mut self, index: u32) -> bool {
        if index != self.candles_lit || self.all_candles_lit() {
            log::trace!("Ignoring candle {} (next is {})", index, self.candles_lit);
            return false;
        }
        self.advance_candle(false);
        true
    }

    /// Pop the balloon at `index`. Returns true if progress advanced.
    pub fn pop_balloon(&mut self, index: u32) -> bool {
        if index != self.balloons_popped || self.all_balloons_popped() {
            log::trace!("Ignoring balloon {} (next is {})", index, self.balloons_popped);
            return false;
        }
        let index = self.balloons_popped;
        self.balloons_popped += 1;
        self.events.push(CardEvent::BalloonPopped { index });
        log::debug!("Balloon {} popped", index);
        self.refresh_completion();
        true
    }

    /// Light the next candle on behalf of the celebration sequence
    pub(crate) fn auto_light_candle(&mut self) -> bool {
        if self.all_candles_lit() {
            return false;
        }
        self.advance_candle(true);
        true
    }

    /// Enter the celebrating state. Returns false if already celebrating.
    pub(crate) fn begin_celebration(&mut self) -> bool {
        if self.celebrating {
            log::debug!("Celebration already running");
            return false;
        }
        self.celebrating = true;
        self.events.push(CardEvent::CelebrationStarted);
        log::info!("Celebration started");
        self.latch_completion_effect();
        true
    }

    pub(crate) fn record(&mut self, event: CardEvent) {
        self.events.push(event);
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<CardEvent> {
        std::mem::take(&mut self.events)
    }

    fn advance_candle(&mut self, auto: bool) {
        let index = self.candles_lit;
        self.candles_lit += 1;
        self.events.push(CardEvent::CandleLit { index, auto });
        log::debug!("Candle {} lit{}", index, if auto { " (auto)" } else { "" });
        self.refresh_completion();
    }

    fn refresh_completion(&mut self) {
        if completion_reached(
            self.candles_lit,
            self.total_candles,
            self.balloons_popped,
            self.total_balloons,
        ) {
            self.latch_completion_effect();
        }
    }

    /// Switch the completion effect on. Never switches it off.
    fn latch_completion_effect(&mut self) {
        if !self.show_completion_effect {
            self.show_completion_effect = true;
            self.events.push(CardEvent::CompletionEffectShown);
            log::info!("Completion effect shown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sequential_candles() {
        let mut state = CardState::new(5, 5);
        for i in 0..5 {
            assert_eq!(state.candles_lit(), i);
            assert!(state.light_candle(i));
        }
        assert_eq!(state.candles_lit(), 5);

        // Further calls are no-ops
        assert!(!state.light_candle(5));
        assert!(!state.light_candle(4));
        assert_eq!(state.candles_lit(), 5);
    }

    #[test]
    fn test_out_of_order_balloon_ignored() {
        let mut state = CardState::new(5, 5);
        assert!(!state.pop_balloon(2));
        assert_eq!(state.balloons_popped(), 0);

        assert!(state.pop_balloon(0));
        // Same index twice (rapid double click)
        assert!(!state.pop_balloon(0));
        assert_eq!(state.balloons_popped(), 1);
        assert_eq!(
            state.drain_events(),
            vec![CardEvent::BalloonPopped { index: 0 }]
        );
    }

    #[test]
    fn test_completion_after_tenth_call() {
        let mut state = CardState::new(5, 5);
        let mut calls = 0;
        for i in 0..5 {
            state.light_candle(i);
            calls += 1;
            assert!(!state.show_completion_effect(), "call {calls}");
        }
        for i in 0..5 {
            state.pop_balloon(i);
            calls += 1;
            assert_eq!(state.show_completion_effect(), calls == 10, "call {calls}");
        }
        assert!(state.drain_events().contains(&CardEvent::CompletionEffectShown));
    }

    #[test]
    fn test_celebration_shows_effect_immediately() {
        let mut state = CardState::new(5, 5);
        assert!(state.begin_celebration());
        assert!(state.celebrating());
        assert!(state.show_completion_effect());
        assert_eq!(state.balloons_popped(), 0);

        // Guarded against a second activation
        assert!(!state.begin_celebration());
        assert_eq!(
            state.drain_events(),
            vec![CardEvent::CelebrationStarted, CardEvent::CompletionEffectShown]
        );
    }

    #[test]
    fn test_effect_event_emitted_once() {
        let mut state = CardState::new(1, 1);
        state.begin_celebration();
        state.light_candle(0);
        state.pop_balloon(0);
        let shown = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == CardEvent::CompletionEffectShown)
            .count();
        assert_eq!(shown, 1);
    }

    #[test]
    fn test_completion_reached() {
        assert!(completion_reached(5, 5, 5, 5));
        assert!(!completion_reached(4, 5, 5, 5));
        assert!(!completion_reached(5, 5, 0, 5));
    }

    proptest! {
        #[test]
        fn prop_wrong_index_is_noop(lit in 0u32..5, index in 0u32..20) {
            let mut state = CardState::new(5, 5);
            for i in 0..lit {
                state.light_candle(i);
            }
            prop_assume!(index != state.candles_lit());
            state.light_candle(index);
            prop_assert_eq!(state.candles_lit(), lit);
        }

        #[test]
        fn prop_progress_is_monotonic(clicks in proptest::collection::vec((any::<bool>(), 0u32..7), 0..60)) {
            let mut state = CardState::new(5, 5);
            let mut was_shown = false;
            for (candle, index) in clicks {
                let (before_c, before_b) = (state.candles_lit(), state.balloons_popped());
                if candle {
                    state.light_candle(index);
                } else {
                    state.pop_balloon(index);
                }
                prop_assert!(state.candles_lit() >= before_c);
                prop_assert!(state.balloons_popped() >= before_b);
                prop_assert!(state.candles_lit() - before_c + state.balloons_popped() - before_b <= 1);
                prop_assert!(state.candles_lit() <= 5 && state.balloons_popped() <= 5);

                let complete = state.candles_lit() == 5 && state.balloons_popped() == 5;
                prop_assert_eq!(state.show_completion_effect(), complete);
                prop_assert!(!was_shown || state.show_completion_effect());
                was_shown = state.show_completion_effect();
            }
        }
    }
}
