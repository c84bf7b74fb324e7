//! Tools with special handling in the agent loop.

mod exit_loop;
mod google_search;

pub use exit_loop::ExitLoopTool;
pub use google_search::GoogleSearchTool;
