// src/engine/backoff.rs

//! Exponential backoff for the status poll.

use std::time::Duration;

/// Delay between status polls: starts at `initial`, doubles after every
/// non-terminal poll, never exceeds `max`.
///
/// Pure state; sleeping is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    current: Duration,
    max: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            current: initial.min(max),
            max,
        }
    }

    /// The delay to wait before the next poll.
    pub fn current(&self) -> Duration {
        self.current
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    /// Double the delay (capped) and return the new value.
    pub fn advance(&mut self) -> Duration {
        self.current = self.current.saturating_mul(2).min(self.max);
        self.current
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(30))
    }
}
