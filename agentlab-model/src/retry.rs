use agentlab_core::{Error, Result};
use std::future::Future;
use std::time::Duration;

/// Retry policy for model API calls.
///
/// `max_attempts` counts the total number of attempts, including the first
/// one, so `max_attempts = 1` disables retrying.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
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

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }
}

/// HTTP status codes worth retrying: timeouts, rate limits, and transient
/// server failures.
pub fn is_retryable_status_code(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Heuristic check on an error message when no structured status code is
/// available.
pub fn is_retryable_error_message(message: &str) -> bool {
    let upper = message.to_uppercase();
    const MARKERS: &[&str] = &[
        "408",
        "429",
        "500",
        "502",
        "503",
        "504",
        "RATE LIMIT",
        "TOO MANY REQUESTS",
        "RESOURCE_EXHAUSTED",
        "UNAVAILABLE",
        "TIMEOUT",
        "TIMED OUT",
        "CONNECTION RESET",
    ];
    MARKERS.iter().any(|marker| upper.contains(marker))
}

/// Default classifier for model calls: retry model errors whose message
/// looks transient, never retry anything else.
pub fn is_retryable_model_error(error: &Error) -> bool {
    match error {
        Error::Model(message) => is_retryable_error_message(message),
        _ => false,
    }
}

/// Runs `op`, retrying on errors that `is_retryable` accepts, with
/// exponential backoff capped at `config.max_delay`. The last error is
/// returned once attempts run out.
pub async fn execute_with_retry<T, Op, Fut, C>(
    config: &RetryConfig,
    is_retryable: C,
    mut op: Op,
) -> Result<T>
where
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    C: Fn(&Error) -> bool,
{
    let max_attempts = config.max_attempts.max(1);
    let mut delay = config.initial_delay;

    for attempt in 1..=max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if attempt == max_attempts || !is_retryable(&error) {
                    return Err(error);
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "retrying after transient error"
                );
                tokio::time::sleep(delay).await;
                delay = Duration::from_secs_f64(
                    (delay.as_secs_f64() * config.backoff_multiplier)
                        .min(config.max_delay.as_secs_f64()),
                );
            }
        }
    }

    unreachable!("retry loop always returns")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_config(max_attempts: u32) -> RetryConfig {
        RetryConfig::new()
            .with_max_attempts(max_attempts)
            .with_initial_delay(Duration::from_millis(1))
            .with_max_delay(Duration::from_millis(4))
    }

    #[test]
    fn test_retryable_status_codes() {
        assert!(is_retryable_status_code(429));
        assert!(is_retryable_status_code(503));
        assert!(!is_retryable_status_code(400));
        assert!(!is_retryable_status_code(401));
    }

    #[test]
    fn test_retryable_messages() {
        assert!(is_retryable_error_message("HTTP 429 Too Many Requests"));
        assert!(is_retryable_error_message("service unavailable"));
        assert!(is_retryable_error_message("request timed out"));
        assert!(!is_retryable_error_message("invalid API key"));
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let calls = AtomicU32::new(0);
        let result = execute_with_retry(&fast_config(3), is_retryable_model_error, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(42) }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = AtomicU32::new(0);
        let result = execute_with_retry(&fast_config(5), is_retryable_model_error, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(Error::Model("HTTP 503 unavailable".into()))
                } else {
                    Ok("ok")
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_exhausts_attempts_and_surfaces_last_error() {
        let calls = AtomicU32::new(0);
        let result: Result<()> =
            execute_with_retry(&fast_config(4), is_retryable_model_error, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(Error::Model("HTTP 429 rate limit".into())) }
            })
            .await;
        assert!(result.unwrap_err().to_string().contains("429"));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_fast() {
        let calls = AtomicU32::new(0);
        let result: Result<()> =
            execute_with_retry(&fast_config(5), is_retryable_model_error, || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(Error::Model("invalid API key".into())) }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
