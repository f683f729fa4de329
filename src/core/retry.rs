use std::time::Duration;

/// Status codes treated as transient upstream failures.
pub const DEFAULT_RETRY_STATUSES: [u16; 4] = [500, 502, 503, 504];

/// Delay before retry number `retry_count` (0-indexed): `base * 2^retry_count`.
///
/// ```
/// use number_classifier::core::retry::retry_delay;
/// use std::time::Duration;
///
/// assert_eq!(retry_delay(0, Duration::from_secs(1)), Duration::from_secs(1));
/// assert_eq!(retry_delay(2, Duration::from_secs(1)), Duration::from_secs(4));
/// ```
pub fn retry_delay(retry_count: u32, base: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(retry_count);
    base.saturating_mul(multiplier)
}

/// Retry, backoff and timeout settings for the outbound fact request.
///
/// # Examples
///
/// ```
/// use number_classifier::core::retry::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default()
///     .max_retries(5)
///     .backoff_factor(Duration::from_millis(200))
///     .timeout(Duration::from_secs(2));
/// assert_eq!(policy.max_attempts(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts made after the first one.
    pub max_retries: u32,
    pub retry_statuses: Vec<u16>,
    pub backoff_factor: Duration,
    /// Upper bound for any single sleep, including one requested by `Retry-After`.
    pub backoff_max: Duration,
    /// Per-attempt timeout, covering connect and body.
    pub timeout: Duration,
    pub retry_on_transport_error: bool,
    pub respect_retry_after: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_statuses: DEFAULT_RETRY_STATUSES.to_vec(),
            backoff_factor: Duration::from_secs(1),
            backoff_max: Duration::from_secs(120),
            timeout: Duration::from_secs(3),
            retry_on_transport_error: true,
            respect_retry_after: true,
        }
    }
}

impl RetryPolicy {
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn backoff_factor(mut self, backoff_factor: Duration) -> Self {
        self.backoff_factor = backoff_factor;
        self
    }

    pub fn backoff_max(mut self, backoff_max: Duration) -> Self {
        self.backoff_max = backoff_max;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry_statuses(mut self, statuses: impl Into<Vec<u16>>) -> Self {
        self.retry_statuses = statuses.into();
        self
    }

    pub fn retry_on_transport_error(mut self, enabled: bool) -> Self {
        self.retry_on_transport_error = enabled;
        self
    }

    pub fn respect_retry_after(mut self, enabled: bool) -> Self {
        self.respect_retry_after = enabled;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Sleep before retry `retry_count` (0-indexed).
    ///
    /// A `Retry-After` value only applies to 503 responses.
    pub fn delay_for(
        &self,
        retry_count: u32,
        status: Option<u16>,
        retry_after: Option<Duration>,
    ) -> Duration {
        let delay = match retry_after {
            Some(requested) if self.respect_retry_after && status == Some(503) => requested,
            _ => retry_delay(retry_count, self.backoff_factor),
        };
        delay.min(self.backoff_max)
    }
}
