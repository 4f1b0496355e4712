//! Linear retry policy for live fetches.

use std::time::Duration;

/// Default number of attempts per live fetch.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default backoff unit; attempt `n` is followed by `n` units of sleep.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(2);

/// How often and how patiently a live fetch is retried.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use urban3d::acquisition::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.delay_after(2), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Sleep that follows failed attempt number `attempt` (1-based).
    ///
    /// Saturates at [`Duration::MAX`] for very large backoffs.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt)
    }

    /// Sum of every delay when all attempts fail.
    pub fn total_backoff(&self) -> Duration {
        (1..=self.max_attempts)
            .map(|a| self.delay_after(a))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delays_are_linear() {
        let policy = RetryPolicy::default();
        let delays: Vec<_> = (1..=3).map(|a| policy.delay_after(a)).collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(6)
            ]
        );
        assert_eq!(policy.total_backoff(), Duration::from_secs(12));
    }

    #[test]
    fn test_at_least_one_attempt() {
        assert_eq!(RetryPolicy::new(0, DEFAULT_BACKOFF).max_attempts(), 1);
        assert_eq!(RetryPolicy::default().with_max_attempts(0).max_attempts(), 1);
    }

    #[test]
    fn test_builder() {
        let policy = RetryPolicy::default()
            .with_max_attempts(5)
            .with_backoff(Duration::from_millis(100));
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.delay_after(3), Duration::from_millis(300));
    }

    #[test]
    fn test_huge_backoff_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::new(3, Duration::from_secs_f64(1e19));
        assert_eq!(policy.delay_after(1), Duration::from_secs_f64(1e19));
        assert_eq!(policy.delay_after(2), Duration::MAX);
        assert_eq!(policy.total_backoff(), Duration::MAX);
    }
}
