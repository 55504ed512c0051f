use std::time::{Duration, Instant};

/// The default interval between timer firings.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// A periodic timer owned by one scenario.
///
/// Missed firings are not made up: after a firing the next one is due a
/// full period later, however late the firing was.
#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    deadline: Instant,
}

impl Ticker {
    /// Creates a ticker whose first firing is one period after `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            deadline: start + period,
        }
    }

    /// The time of the next firing.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Fires if the deadline has passed, scheduling the next firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }
        self.deadline = now + self.period;
        true
    }
}
