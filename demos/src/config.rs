use agentlab_core::Result;
use agentlab_model::{GeminiModel, RetryConfig};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Retry policy used by every demo: up to five attempts total, starting
/// with a one second delay, on rate limits and transient server errors.
pub fn demo_retry_config() -> RetryConfig {
    RetryConfig::new()
        .with_max_attempts(5)
        .with_initial_delay(Duration::from_secs(1))
}

pub fn build_model(api_key: &str) -> Result<GeminiModel> {
    Ok(GeminiModel::new(api_key, DEFAULT_MODEL)?.with_retry_config(demo_retry_config()))
}
