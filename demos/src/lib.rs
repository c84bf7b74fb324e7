//! Shared glue for the demo binaries: credential resolution, model
//! construction, agent wiring for the four architecture patterns, menu
//! parsing, and response-text extraction.

pub mod config;
pub mod credentials;
pub mod extract;
pub mod menu;
pub mod patterns;
