//! Statement execution and row materialization.

use crate::db::connection::DbHandle;
use crate::db::result::{QueryResult, ResultData};
use crate::types::{AgentError, Result};
use sqlx::postgres::PgRow;
use sqlx::{Column, Executor, Row, TypeInfo};

/// Executes SQL statements against the cached connection and packages the
/// full result set with every cell rendered as text.
pub struct QueryExecutor;

impl QueryExecutor {
    /// Execute a statement and shape the outcome.
    ///
    /// Never fails: any connect or execution error is folded into an
    /// error-status `QueryResult` with the failure description. The query
    /// text is echoed back regardless of outcome. Rows are fully
    /// materialized; there is no streaming and no row-count limit beyond
    /// what the statement itself specifies.
    pub async fn execute(handle: &mut DbHandle, query: &str) -> QueryResult {
        match Self::run(handle, query).await {
            Ok(data) => {
                tracing::info!(rows = data.rows.len(), "query executed");
                QueryResult::success(query, data)
            }
            Err(e) => {
                tracing::warn!(error = %e, "query failed");
                QueryResult::error(query, e.to_string())
            }
        }
    }

    async fn run(handle: &mut DbHandle, query: &str) -> Result<ResultData> {
        let conn = handle.acquire().await?;

        let rows = sqlx::query(query)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| AgentError::ExecutionError(e.to_string()))?;

        let columns: Vec<String> = match rows.first() {
            Some(first) => first
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            // Zero-row results still carry the descriptor list.
            None => conn
                .describe(query)
                .await
                .map_err(|e| AgentError::ExecutionError(e.to_string()))?
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
        };

        let mut data_rows = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut cells = Vec::with_capacity(row.len());
            for idx in 0..row.len() {
                cells.push(render_cell(row, idx));
            }
            data_rows.push(cells);
        }

        Ok(ResultData {
            columns,
            rows: data_rows,
        })
    }
}

/// Render one cell as text, dispatching on the Postgres type name.
///
/// NULLs render as `NULL`. A value whose type has no decoder here renders as
/// a `<TYPENAME>` placeholder rather than failing the whole result.
fn render_cell(row: &PgRow, idx: usize) -> String {
    let type_name = row.columns()[idx].type_info().name().to_string();
    match type_name.as_str() {
        "BOOL" => render(row.try_get::<Option<bool>, _>(idx), &type_name),
        "INT2" => render(row.try_get::<Option<i16>, _>(idx), &type_name),
        "INT4" => render(row.try_get::<Option<i32>, _>(idx), &type_name),
        "INT8" => render(row.try_get::<Option<i64>, _>(idx), &type_name),
        "FLOAT4" => render(row.try_get::<Option<f32>, _>(idx), &type_name),
        "FLOAT8" => render(row.try_get::<Option<f64>, _>(idx), &type_name),
        "UUID" => render(row.try_get::<Option<uuid::Uuid>, _>(idx), &type_name),
        "DATE" => render(row.try_get::<Option<chrono::NaiveDate>, _>(idx), &type_name),
        "TIME" => render(row.try_get::<Option<chrono::NaiveTime>, _>(idx), &type_name),
        "TIMESTAMP" => render(
            row.try_get::<Option<chrono::NaiveDateTime>, _>(idx),
            &type_name,
        ),
        "TIMESTAMPTZ" => render(
            row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx),
            &type_name,
        ),
        "JSON" | "JSONB" => match row.try_get::<Option<serde_json::Value>, _>(idx) {
            Ok(Some(value)) => value.to_string(),
            Ok(None) => "NULL".to_string(),
            Err(_) => format!("<{}>", type_name),
        },
        "BYTEA" => match row.try_get::<Option<Vec<u8>>, _>(idx) {
            Ok(Some(bytes)) => {
                let mut out = String::with_capacity(2 + bytes.len() * 2);
                out.push_str("\\x");
                for b in bytes {
                    out.push_str(&format!("{:02x}", b));
                }
                out
            }
            Ok(None) => "NULL".to_string(),
            Err(_) => format!("<{}>", type_name),
        },
        _ => render(row.try_get::<Option<String>, _>(idx), &type_name),
    }
}

fn render<T: std::fmt::Display>(value: sqlx::Result<Option<T>>, type_name: &str) -> String {
    match value {
        Ok(Some(v)) => v.to_string(),
        Ok(None) => "NULL".to_string(),
        Err(_) => format!("<{}>", type_name),
    }
}
