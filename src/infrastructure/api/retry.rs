//! Retry policy for idempotent product reads

use std::time::Duration;

use crate::application::errors::ApiError;

/// Backoff strategy between retry attempts
#[derive(Debug, Clone)]
pub enum BackoffStrategy {
    None,
    /// Doubles per attempt, capped at `max`
    Exponential { base: Duration, max: Duration },
}

impl BackoffStrategy {
    /// Delay before retry number `attempt` (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Exponential { base, max } => {
                let multiplier = 2u32.saturating_pow(attempt);
                std::cmp::min(base.saturating_mul(multiplier), *max)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_attempts: u32,
    pub backoff: BackoffStrategy,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: BackoffStrategy::Exponential {
                base: Duration::from_millis(200),
                max: Duration::from_secs(2),
            },
        }
    }

    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            backoff: BackoffStrategy::None,
        }
    }

    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    /// Whether `error`, seen on retry number `attempt`, is worth another try.
    /// Connection failures, timeouts, 429 and 5xx are retried; other
    /// statuses and decode failures are not.
    pub fn should_retry(&self, error: &ApiError, attempt: u32) -> bool {
        if attempt >= self.max_attempts {
            return false;
        }
        match error {
            ApiError::Network(_) | ApiError::Timeout(_) => true,
            ApiError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            ApiError::Decode(_) => false,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff_caps() {
        let backoff = BackoffStrategy::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(350),
        };
        assert_eq!(backoff.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(backoff.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(backoff.delay_for_attempt(2), Duration::from_millis(350));
        assert_eq!(backoff.delay_for_attempt(40), Duration::from_millis(350));
    }

    #[test]
    fn test_should_retry_stops_after_max_attempts() {
        let policy = RetryPolicy::new(2);
        let err = ApiError::Network("connection reset".to_string());
        assert!(policy.should_retry(&err, 0));
        assert!(policy.should_retry(&err, 1));
        assert!(!policy.should_retry(&err, 2));
        assert!(!RetryPolicy::none().should_retry(&err, 0));
    }

    #[test]
    fn test_should_retry_by_error_kind() {
        let policy = RetryPolicy::new(3);
        let status = |s| ApiError::Status { status: s, body: String::new() };
        assert!(policy.should_retry(&status(503), 0));
        assert!(policy.should_retry(&status(429), 0));
        assert!(!policy.should_retry(&status(404), 0));
        assert!(!policy.should_retry(&ApiError::Decode("bad json".to_string()), 0));
    }
}
