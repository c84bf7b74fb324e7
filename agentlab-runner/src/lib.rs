//! Running agents against sessions.
//!
//! [`InMemorySessionService`] stores sessions keyed by app, user, and
//! session id. [`Runner`] looks up the session, builds the invocation
//! context, and streams the agent's events while recording them.

mod runner;
mod session;

pub use runner::{Runner, RunnerConfig};
pub use session::InMemorySessionService;
