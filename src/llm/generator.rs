//! Natural language to SQL generation with a denylist guard.

use crate::db::DbHandle;
use crate::llm::client::CompletionProvider;
use crate::llm::prompt::{build_prompt, format_schema};
use crate::schema::{SchemaIntrospector, TableSchema};

/// Prefix carried by every sentinel error string.
pub const ERROR_PREFIX: &str = "ERROR";

/// Keywords that reject a generated query.
///
/// This is a coarse case-insensitive substring match: it false-positives on
/// queries whose data or identifiers contain these words and can be bypassed
/// by obfuscation. It is a crude guard against obviously mutating statements,
/// not a security boundary.
const DENYLIST: [&str; 6] = ["drop", "truncate", "delete", "update", "insert", "create"];

/// Turns a natural-language question into a candidate SQL statement.
///
/// Every failure mode is surfaced as an `ERROR:`-prefixed sentinel string
/// rather than an error value, so the pipeline can route on the text alone.
pub struct QueryGenerator {
    provider: Box<dyn CompletionProvider>,
}

impl QueryGenerator {
    /// Create a generator over the given completion provider.
    pub fn new(provider: Box<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Whether a generated text is a sentinel error.
    pub fn is_error(text: &str) -> bool {
        text.starts_with(ERROR_PREFIX)
    }

    /// Generate a SQL statement for the question.
    ///
    /// Introspects the schema, builds the prompt, issues one completion
    /// request, strips code fences, and applies the denylist. No retry and no
    /// repair: a rejected or failed generation is terminal for this call. The
    /// returned text is never guaranteed to be syntactically valid SQL.
    pub async fn generate(&self, handle: &mut DbHandle, question: &str) -> String {
        let schema = SchemaIntrospector::introspect(handle).await;
        self.generate_with_schema(&schema, question).await
    }

    /// Generation core over an already-introspected schema.
    pub async fn generate_with_schema(&self, schema: &TableSchema, question: &str) -> String {
        if schema.is_empty() {
            return format!("{}: Could not retrieve database schema", ERROR_PREFIX);
        }

        let prompt = build_prompt(&format_schema(schema), question);

        let raw = match self.provider.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => return format!("{}: Failed to generate query: {}", ERROR_PREFIX, e),
        };

        let query = strip_fences(&raw);

        if let Some(keyword) = denylist_hit(&query) {
            tracing::warn!(keyword, "generated query rejected by denylist");
            return format!(
                "{}: Potentially harmful query detected. Only SELECT queries are allowed.",
                ERROR_PREFIX
            );
        }

        tracing::debug!(query = %query, "query generated");
        query
    }
}

/// Strip leading/trailing code-fence markers and surrounding whitespace.
///
/// Handles ```` ```sql ````, bare ```` ``` ````, and unfenced text.
pub fn strip_fences(text: &str) -> String {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix("```sql")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim().to_string()
}

/// First denylisted keyword found anywhere in the text, if any.
fn denylist_hit(query: &str) -> Option<&'static str> {
    let lowered = query.to_lowercase();
    DENYLIST.iter().copied().find(|k| lowered.contains(k))
}
