//! Agent implementations.
//!
//! [`LlmAgent`] drives a model through an instruction, optional tools, and
//! an optional `output_key` state write. The [`workflow`] module provides
//! deterministic orchestrators ([`SequentialAgent`], [`ParallelAgent`],
//! [`LoopAgent`]) that compose agents without an extra model call.

mod llm_agent;
pub mod workflow;

pub use llm_agent::{LlmAgent, LlmAgentBuilder};
pub use workflow::{LoopAgent, ParallelAgent, SequentialAgent};
