//! Retry policy: server-hinted waits for rate limits, backoff with jitter otherwise.

use rand::Rng;
use std::time::Duration;

/// How a logical call reacts to 429 and transient 5xx responses.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of physical attempts per logical call, the first one included.
    pub max_attempts: u32,
    /// Initial fallback delay when the server sends no hint.
    pub initial_delay: Duration,
    /// Maximum fallback delay between retries.
    pub max_delay: Duration,
    /// Fallback backoff strategy.
    pub backoff: BackoffStrategy,
    /// Maximum time to wait on a server hint (`Retry-After` and reset headers).
    pub max_retry_after: Duration,
    /// 5xx statuses treated as transient. 429 is always retried.
    pub transient_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff: BackoffStrategy::Exponential {
                factor: 2.0,
                jitter: true,
            },
            max_retry_after: Duration::from_secs(60),
            transient_statuses: vec![502, 503, 504],
        }
    }
}

impl RetryConfig {
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Clamp applied to server-provided wait hints.
    pub fn with_max_retry_after(mut self, max: Duration) -> Self {
        self.max_retry_after = max;
        self
    }

    pub fn with_transient_statuses(mut self, statuses: impl Into<Vec<u16>>) -> Self {
        self.transient_statuses = statuses.into();
        self
    }

    /// A single attempt, never retried.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Whether a response status should be retried.
    pub fn is_retryable_status(&self, status: u16) -> bool {
        status == 429 || self.transient_statuses.contains(&status)
    }
}

/// Fallback wait schedule used when a retryable response carries no hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackoffStrategy {
    /// Always `initial_delay`.
    Fixed,
    /// `initial_delay * factor^retry`. With `jitter`, a random point in the
    /// upper half of that window so concurrent callers spread out.
    Exponential { factor: f64, jitter: bool },
}

impl BackoffStrategy {
    /// Wait before retry number `retry` (0 for the first retry), capped at `cap`.
    pub fn delay(&self, retry: u32, initial_delay: Duration, cap: Duration) -> Duration {
        let secs = match *self {
            BackoffStrategy::Fixed => initial_delay.as_secs_f64(),
            BackoffStrategy::Exponential { factor, jitter } => {
                let window = initial_delay.as_secs_f64() * factor.powi(retry.min(32) as i32);
                if jitter {
                    window / 2.0 + rand::rng().random::<f64>() * window / 2.0
                } else {
                    window
                }
            }
        };

        if !secs.is_finite() || secs >= cap.as_secs_f64() {
            return cap;
        }
        Duration::from_secs_f64(secs.max(0.0))
    }
}

/// Per-call retry state: attempts made so far and the delay before the next one.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    attempts: u32,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            attempts: 0,
        }
    }

    /// Physical attempts made so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Record one physical attempt.
    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    /// Returns true while the attempt budget allows another request.
    pub fn should_retry(&self) -> bool {
        self.attempts < self.config.max_attempts.max(1)
    }

    /// The wait before the next attempt, or `None` once the budget is spent.
    ///
    /// A server hint wins over the fallback strategy and is clamped to `max_retry_after`.
    pub fn next_delay(&self, hint: Option<Duration>) -> Option<Duration> {
        if !self.should_retry() {
            return None;
        }

        let delay = match hint {
            Some(hint) => std::cmp::min(hint, self.config.max_retry_after),
            None => self.config.backoff.delay(
                self.attempts.saturating_sub(1),
                self.config.initial_delay,
                self.config.max_delay,
            ),
        };

        Some(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_retry_rate_limits_and_gateway_errors() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert!(config.is_retryable_status(429));
        assert!(config.is_retryable_status(503));
        assert!(!config.is_retryable_status(500));
    }

    #[test]
    fn test_client_errors_and_500_are_final() {
        let config = RetryConfig::default();
        for status in [400, 401, 403, 404, 409, 422, 500, 501] {
            assert!(!config.is_retryable_status(status), "{status} retried");
        }

        let config = config.with_transient_statuses([500]);
        assert!(config.is_retryable_status(500));
        assert!(!config.is_retryable_status(503));
        assert!(config.is_retryable_status(429));
    }

    #[test]
    fn test_single_attempt_never_waits() {
        let mut policy = RetryPolicy::new(RetryConfig::no_retry());
        policy.record_attempt();
        assert!(!policy.should_retry());
        assert!(policy.next_delay(Some(Duration::from_secs(1))).is_none());
    }

    #[test]
    fn test_fixed_schedule_ignores_retry_number() {
        let wait = BackoffStrategy::Fixed.delay(7, Duration::from_millis(250), Duration::from_secs(5));
        assert_eq!(wait, Duration::from_millis(250));
    }

    #[test]
    fn test_exponential_schedule_doubles_until_cap() {
        let schedule = BackoffStrategy::Exponential {
            factor: 2.0,
            jitter: false,
        };
        let waits: Vec<_> = (0..5)
            .map(|retry| schedule.delay(retry, Duration::from_millis(500), Duration::from_secs(4)))
            .collect();
        assert_eq!(
            waits,
            vec![
                Duration::from_millis(500),
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
                Duration::from_secs(4),
            ]
        );
        assert_eq!(
            schedule.delay(u32::MAX, Duration::from_millis(500), Duration::from_secs(4)),
            Duration::from_secs(4)
        );
    }

    #[test]
    fn test_jitter_stays_in_upper_half() {
        let schedule = BackoffStrategy::Exponential {
            factor: 3.0,
            jitter: true,
        };
        for _ in 0..50 {
            let wait = schedule.delay(2, Duration::from_millis(100), Duration::from_secs(10));
            assert!(wait >= Duration::from_millis(450), "{wait:?}");
            assert!(wait <= Duration::from_millis(900), "{wait:?}");
        }
    }

    #[test]
    fn test_attempt_budget_counts_first_attempt() {
        let mut policy = RetryPolicy::new(RetryConfig::default().with_max_attempts(3));

        policy.record_attempt();
        assert!(policy.next_delay(None).is_some());
        policy.record_attempt();
        assert!(policy.next_delay(None).is_some());
        policy.record_attempt();
        assert_eq!(policy.attempts(), 3);
        assert!(policy.next_delay(None).is_none());
    }

    #[test]
    fn test_server_hint_is_clamped() {
        let config = RetryConfig::default().with_max_retry_after(Duration::from_secs(60));
        let mut policy = RetryPolicy::new(config);
        policy.record_attempt();

        assert_eq!(
            policy.next_delay(Some(Duration::from_secs(30))),
            Some(Duration::from_secs(30))
        );
        assert_eq!(
            policy.next_delay(Some(Duration::from_secs(120))),
            Some(Duration::from_secs(60))
        );
    }
}
