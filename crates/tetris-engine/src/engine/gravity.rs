use std::time::Duration;

/// Accumulates elapsed play time and reports when a gravity drop is due.
///
/// When a drop fires the accumulator restarts from zero; any overshoot is discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GravityClock {
    elapsed: Duration,
}

impl GravityClock {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
        }
    }

    /// Returns the time accumulated since the last drop.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Adds `delta` and returns `true` if at least `interval` has accumulated.
    pub fn advance(&mut self, delta: Duration, interval: Duration) -> bool {
        self.elapsed += delta;
        if self.elapsed < interval {
            return false;
        }
        self.elapsed = Duration::ZERO;
        true
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
