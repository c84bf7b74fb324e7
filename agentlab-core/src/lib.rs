//! # agentlab-core
//!
//! Core types and traits shared by every agentlab crate:
//!
//! - [`Content`] / [`Part`] - conversation payloads exchanged with a model
//! - [`Event`] - a single step of an agent invocation
//! - [`Llm`] - the model provider trait ([`LlmRequest`] in, [`LlmResponse`] out)
//! - [`Agent`] - the agent trait, yielding an [`EventStream`]
//! - [`Tool`] - callables an agent may invoke during a turn
//! - [`Session`] - per-conversation state and transcript
//! - [`inject_state`] - `{placeholder}` substitution from session state

mod agent;
mod context;
mod error;
mod event;
mod model;
mod session;
mod template;
mod tool;
mod types;

pub use agent::{Agent, EventStream};
pub use context::{InvocationContext, ToolContext};
pub use error::{Error, Result};
pub use event::{Event, EventActions};
pub use model::{FinishReason, GenerateContentConfig, Llm, LlmRequest, LlmResponse, UsageMetadata};
pub use session::Session;
pub use template::inject_state;
pub use tool::Tool;
pub use types::{Content, Part};
