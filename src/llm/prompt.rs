//! Prompt construction for SQL generation.
//!
//! Pure functions; no state is retained between calls.

use crate::schema::TableSchema;

/// Render the schema as one line per table:
/// `schema.table: col1 (type1), col2 (type2)`.
pub fn format_schema(schema: &TableSchema) -> String {
    schema
        .iter()
        .map(|(table, columns)| {
            let cols = columns
                .iter()
                .map(|c| format!("{} ({})", c.name, c.data_type))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", table, cols)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Embed the rendered schema and the question into the fixed instruction
/// template. The template states the target dialect and instructs the model
/// to return a raw statement with no prose or fencing.
pub fn build_prompt(schema_text: &str, question: &str) -> String {
    format!(
        "You are a SQL query generator. Given the following database schema and a \
         natural language question, generate the appropriate SQL query to answer \
         the question.\n\
         \n\
         DATABASE SCHEMA:\n\
         {}\n\
         \n\
         QUESTION:\n\
         {}\n\
         \n\
         Generate only the SQL query without any explanations or markdown \
         formatting. The query should be valid for PostgreSQL. Do not include \
         ```sql or ``` markers. Return only the raw SQL query.",
        schema_text, question
    )
}
