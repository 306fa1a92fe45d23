//! Process configuration for the agent.
//!
//! All values are read once at startup from the environment. Missing or empty
//! required values are fatal: the agent refuses to start with a partial
//! configuration rather than failing later mid-pipeline.

use crate::types::{AgentError, Result};

/// Default model when `ANTHROPIC_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";

/// Fixed output-token budget for completion requests.
pub const MAX_TOKENS: u32 = 1000;

/// Default query/login timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Database connection parameters. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Server address, `host` or `host:port`
    pub server: String,

    /// Database name
    pub database: String,

    /// Login user
    pub user: String,

    /// Login password
    pub password: String,

    /// Statement timeout applied to every query (seconds)
    pub query_timeout_secs: u64,

    /// Timeout for connect/login (seconds)
    pub login_timeout_secs: u64,
}

impl ConnectionConfig {
    /// Read connection parameters from the environment.
    ///
    /// Required: `SQL_SERVER`, `SQL_DATABASE`, `SQL_USER`, `SQL_PASSWORD`.
    /// Optional: `SQL_TIMEOUT`, `SQL_LOGIN_TIMEOUT` (seconds, default 10).
    ///
    /// # Errors
    ///
    /// Returns `AgentError::ConfigError` if any required variable is missing
    /// or empty, or a timeout value is not a number.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: require_env("SQL_SERVER")?,
            database: require_env("SQL_DATABASE")?,
            user: require_env("SQL_USER")?,
            password: require_env("SQL_PASSWORD")?,
            query_timeout_secs: timeout_env("SQL_TIMEOUT")?,
            login_timeout_secs: timeout_env("SQL_LOGIN_TIMEOUT")?,
        })
    }

    /// Split `server` into host and port (default 5432).
    pub fn host_port(&self) -> (&str, u16) {
        match self.server.rsplit_once(':') {
            Some((host, port)) => match port.parse() {
                Ok(port) => (host, port),
                Err(_) => (self.server.as_str(), 5432),
            },
            None => (self.server.as_str(), 5432),
        }
    }
}

/// Full agent configuration: database plus completion service.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Database connection parameters
    pub connection: ConnectionConfig,

    /// Completion service API key (`ANTHROPIC_API_KEY`)
    pub api_key: String,

    /// Model identifier (`ANTHROPIC_MODEL`, fixed default)
    pub model: String,

    /// Output token budget per request
    pub max_tokens: u32,
}

impl AgentConfig {
    /// Read the full configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::ConfigError` if any required value is missing or
    /// empty.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            connection: ConnectionConfig::from_env()?,
            api_key: require_env("ANTHROPIC_API_KEY")?,
            model: std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            max_tokens: MAX_TOKENS,
        })
    }
}

/// Read a required environment variable; empty counts as missing.
fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AgentError::config(format!(
            "{} environment variable is not set",
            name
        ))),
    }
}

fn timeout_env(name: &str) -> Result<u64> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| {
            AgentError::config(format!("{} must be a number of seconds, got '{}'", name, value))
        }),
        Err(_) => Ok(DEFAULT_TIMEOUT_SECS),
    }
}
