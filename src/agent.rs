//! Pipeline orchestration: question in, tabular result out.

use crate::config::{AgentConfig, ConnectionConfig};
use crate::db::{DbHandle, QueryExecutor, QueryResult};
use crate::llm::{format_schema, AnthropicClient, CompletionProvider, QueryGenerator};
use crate::schema::SchemaIntrospector;
use crate::types::Result;

/// The full NL-to-SQL pipeline.
///
/// Owns the one cached connection handle and the completion provider. A
/// single instance is not designed for concurrent callers: they would race
/// on the liveness probe and reconnect sequence, so serialize access
/// externally or use one instance per caller.
pub struct SqlAgent {
    generator: QueryGenerator,
    handle: DbHandle,
}

impl SqlAgent {
    /// Build an agent from resolved configuration.
    pub fn new(config: AgentConfig) -> Self {
        let provider = AnthropicClient::from_config(&config);
        Self::with_provider(config.connection, Box::new(provider))
    }

    /// Build an agent over an arbitrary completion provider.
    pub fn with_provider(
        connection: ConnectionConfig,
        provider: Box<dyn CompletionProvider>,
    ) -> Self {
        Self {
            generator: QueryGenerator::new(provider),
            handle: DbHandle::new(connection),
        }
    }

    /// Build an agent from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::ConfigError` if any required value is missing or
    /// empty. Configuration errors are fatal by design; nothing else in the
    /// pipeline propagates as an error.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(AgentConfig::from_env()?))
    }

    /// Answer a natural-language question.
    ///
    /// Generates a candidate query; if generation yields a sentinel error
    /// the result is an immediate error and the executor is never invoked.
    /// Otherwise the generated text is executed verbatim.
    pub async fn answer(&mut self, question: &str) -> QueryResult {
        tracing::info!(question, "answering question");
        let generated = self.generator.generate(&mut self.handle, question).await;

        if QueryGenerator::is_error(&generated) {
            return QueryResult::error(String::new(), generated);
        }

        QueryExecutor::execute(&mut self.handle, &generated).await
    }

    /// Generate the SQL for a question without executing it.
    pub async fn generate_sql(&mut self, question: &str) -> String {
        self.generator.generate(&mut self.handle, question).await
    }

    /// Execute a statement directly, bypassing generation.
    pub async fn execute(&mut self, sql: &str) -> QueryResult {
        QueryExecutor::execute(&mut self.handle, sql).await
    }

    /// Introspect and render the schema as prompt text.
    ///
    /// Empty output means introspection failed (or the database has no base
    /// tables).
    pub async fn schema_text(&mut self) -> String {
        let schema = SchemaIntrospector::introspect(&mut self.handle).await;
        format_schema(&schema)
    }
}
