//! Error types for the NL-to-SQL agent.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From` implementations.

use thiserror::Error;

/// Error type for all agent operations.
///
/// Validation rejections (denylisted keywords) are intentionally NOT an error
/// variant: the generator surfaces them as `ERROR:`-prefixed sentinel strings
/// so that a rejected query becomes data, not a fault.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Missing or empty required configuration value
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Database connect or liveness probe failed
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Completion service call failed
    #[error("Completion request failed: {0}")]
    CompletionError(String),

    /// Statement execution failed
    #[error("Query execution failed: {0}")]
    ExecutionError(String),

    /// Database driver error
    #[error("Database error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// HTTP client error (completion API)
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AgentError {
    /// Create a configuration error with context.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a connection error with context.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a completion error with context.
    pub fn completion(msg: impl Into<String>) -> Self {
        Self::CompletionError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AgentError::config("SQL_SERVER not set");
        assert_eq!(err.to_string(), "Configuration error: SQL_SERVER not set");

        let err = AgentError::connection("refused");
        assert_eq!(err.to_string(), "Connection error: refused");
    }
}
