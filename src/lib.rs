//! askdb - natural-language-to-SQL agent.
//!
//! Translates a natural-language question into a SQL query with an LLM,
//! executes it against PostgreSQL, and returns tabular results:
//! introspect schema -> build prompt -> generate candidate query ->
//! denylist check -> execute -> shape results.
//!
//! The pipeline is strictly one-directional: a rejected or failing query is
//! not retried or repaired. The database and the completion service are
//! opaque external capabilities.

pub mod agent;
pub mod config;
pub mod db;
pub mod llm;
pub mod schema;
pub mod types;

pub use agent::SqlAgent;
pub use config::{AgentConfig, ConnectionConfig};
pub use db::{DbHandle, QueryExecutor, QueryResult, QueryStatus, ResultData};
pub use llm::{AnthropicClient, CompletionProvider, QueryGenerator};
pub use schema::{ColumnSchema, SchemaIntrospector, TableSchema};
pub use types::{AgentError, Result};
