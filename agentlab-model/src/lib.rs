//! Model providers for agentlab.
//!
//! [`GeminiModel`] talks to the Gemini `generateContent` API over HTTPS,
//! wrapping each call in the retry policy from [`RetryConfig`]. [`MockLlm`]
//! is a scriptable in-memory model for tests.

mod gemini;
mod mock;
mod retry;

pub use gemini::{GeminiModel, DEFAULT_BASE_URL};
pub use mock::MockLlm;
pub use retry::{
    execute_with_retry, is_retryable_error_message, is_retryable_model_error,
    is_retryable_status_code, RetryConfig,
};
