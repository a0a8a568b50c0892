use std::time::Duration;

/// Backoff step used when no profile overrides it.
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_millis(1000);

/// Bounded retry budget with linear backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff_unit: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(retries: u32, backoff_unit: Duration) -> Self {
        Self {
            retries,
            backoff_unit,
        }
    }

    #[must_use]
    pub const fn with_retries(self, retries: u32) -> Self {
        Self {
            retries,
            backoff_unit: self.backoff_unit,
        }
    }

    /// Total attempts, the first try included.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        backoff_delay(attempt, self.backoff_unit)
    }

    /// Delays slept before each attempt, in attempt order.
    #[must_use]
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.max_attempts())
            .map(|attempt| self.delay_before(attempt))
            .collect()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, DEFAULT_BACKOFF_UNIT)
    }
}

/// Delay before attempt index `attempt`: `attempt * unit`, zero for the first try.
#[must_use]
pub fn backoff_delay(attempt: u32, unit: Duration) -> Duration {
    unit.saturating_mul(attempt)
}
