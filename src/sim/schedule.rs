//! Repeating scheduled tasks driven by elapsed time
//!
//! A task does not own a timer. The frame loop feeds it elapsed time and it
//! reports how many intervals came due, so the same code runs in the browser
//! and under test.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Shortest interval a task accepts (a zero interval would fire forever)
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Shared cancellation flag for a scheduled task
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// A fixed-interval repeating task
#[derive(Debug)]
pub struct ScheduledTask {
    interval: Duration,
    /// Time accumulated toward the next firing
    elapsed: Duration,
    /// Total number of times the task has fired
    fired: u32,
    token: CancellationToken,
}

impl ScheduledTask {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
            elapsed: Duration::ZERO,
            fired: 0,
            token: CancellationToken::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fired(&self) -> u32 {
        self.fired
    }

    /// Handle that can cancel this task from elsewhere
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Advance by `dt` and return how many intervals came due
    pub fn poll(&mut self, dt: Duration) -> u32 {
        if self.is_cancelled() {
            return 0;
        }

        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }
        self.fired += due;
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF_SECOND: Duration = Duration::from_millis(500);

    #[test]
    fn test_fires_once_per_interval() {
        let mut task = ScheduledTask::new(HALF_SECOND);
        assert_eq!(task.poll(Duration::from_millis(499)), 0);
        assert_eq!(task.poll(Duration::from_millis(1)), 1);
        assert_eq!(task.poll(Duration::from_millis(250)), 0);
        assert_eq!(task.poll(Duration::from_millis(250)), 1);
        assert_eq!(task.fired(), 2);
    }

    #[test]
    fn test_long_frame_fires_multiple() {
        let mut task = ScheduledTask::new(HALF_SECOND);
        assert_eq!(task.poll(Duration::from_millis(1600)), 3);
        // Remainder carries over
        assert_eq!(task.poll(Duration::from_millis(400)), 1);
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let mut task = ScheduledTask::new(HALF_SECOND);
        let token = task.token();
        token.cancel();
        assert!(task.is_cancelled());
        assert_eq!(task.poll(Duration::from_secs(10)), 0);
        assert_eq!(task.fired(), 0);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut task = ScheduledTask::new(Duration::ZERO);
        assert_eq!(task.interval(), MIN_INTERVAL);
        assert_eq!(task.poll(Duration::from_millis(3)), 3);
    }
}
