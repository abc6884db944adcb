//! Celebration sequencer
//!
//! Pressing "Celebrate!" lights the remaining candles one at a time on a fixed
//! interval. Balloons are left for the player.

use std::time::Duration;

use super::schedule::ScheduledTask;
use super::state::{CardEvent, CardState};

/// Owns the auto-advance task for one celebration
#[derive(Debug)]
pub struct CelebrationSequencer {
    interval: Duration,
    /// Running auto-advance task; cleared once the last candle is lit
    task: Option<ScheduledTask>,
}

impl Default for CelebrationSequencer {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::consts::AUTO_ADVANCE_INTERVAL_MS))
    }
}

impl CelebrationSequencer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            task: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True while candles are still being lit automatically
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Start the celebration. Returns false if one was already started.
    pub fn start(&mut self, state: &mut CardState) -> bool {
        if !state.begin_celebration() {
            return false;
        }

        if state.all_candles_lit() {
            state.record(CardEvent::CelebrationFinished);
            log::info!("All candles already lit, nothing to auto-advance");
        } else {
            log::debug!(
                "Auto-lighting {} candles every {:?}",
                state.total_candles() - state.candles_lit(),
                self.interval
            );
            self.task = Some(ScheduledTask::new(self.interval));
        }
        true
    }

    /// Advance the sequence by `dt`. Returns how many candles it lit.
    pub fn advance(&mut self, state: &mut CardState, dt: Duration) -> u32 {
        let due = match self.task.as_mut() {
            Some(task) => task.poll(dt),
            None => return 0,
        };

        let mut lit = 0;
        for _ in 0..due {
            if state.auto_light_candle() {
                lit += 1;
            }
            if state.all_candles_lit() {
                self.finish(state);
                break;
            }
        }
        lit
    }

    /// Cancel and drop the task once the terminal count is reached
    fn finish(&mut self, state: &mut CardState) {
        if let Some(task) = self.task.take() {
            task.cancel();
            state.record(CardEvent::CelebrationFinished);
            log::info!("Celebration finished after {} ticks", task.fired());
        }
    }
}
