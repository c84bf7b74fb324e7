//! Tools callable by agents.
//!
//! [`FunctionTool`] wraps an async closure, [`AgentTool`] exposes a whole
//! agent as a callable tool, and [`builtin`] holds tools with special
//! handling in the agent loop (provider-side search, loop escalation).

mod agent_tool;
pub mod builtin;
mod function_tool;

pub use agent_tool::AgentTool;
pub use builtin::{ExitLoopTool, GoogleSearchTool};
pub use function_tool::FunctionTool;
