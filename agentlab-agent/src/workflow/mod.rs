//! Deterministic orchestrators. These agents compose sub-agents without
//! making model calls of their own.

mod loop_agent;
mod parallel;
mod sequential;

pub use loop_agent::{LoopAgent, DEFAULT_LOOP_MAX_ITERATIONS};
pub use parallel::ParallelAgent;
pub use sequential::SequentialAgent;
