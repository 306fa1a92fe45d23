//! Core types shared across the agent.

pub mod error;

pub use error::AgentError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AgentError>;
