//! Catalog introspection over `information_schema`.

use crate::db::DbHandle;
use crate::schema::{ColumnSchema, TableSchema};
use crate::types::Result;

/// Enumerates base tables and their columns from the metadata catalog.
pub struct SchemaIntrospector;

impl SchemaIntrospector {
    /// Introspect all base tables.
    ///
    /// On any failure (connectivity, permission, malformed catalog) this
    /// returns an empty schema rather than propagating; callers must treat
    /// an empty result as "introspection failed", not "database has no
    /// tables". No retry, no partial results.
    pub async fn introspect(handle: &mut DbHandle) -> TableSchema {
        match Self::try_introspect(handle).await {
            Ok(schema) => {
                tracing::debug!(tables = schema.len(), "schema introspected");
                schema
            }
            Err(e) => {
                tracing::warn!(error = %e, "schema introspection failed");
                TableSchema::new()
            }
        }
    }

    async fn try_introspect(handle: &mut DbHandle) -> Result<TableSchema> {
        let conn = handle.acquire().await?;

        let tables: Vec<(String, String)> = sqlx::query_as(
            "SELECT table_schema::text, table_name::text \
             FROM information_schema.tables \
             WHERE table_type = 'BASE TABLE' \
               AND table_schema NOT IN ('pg_catalog', 'information_schema') \
             ORDER BY table_schema, table_name",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut schema = TableSchema::new();
        for (table_schema, table_name) in tables {
            let columns: Vec<(String, String)> = sqlx::query_as(
                "SELECT column_name::text, data_type::text \
                 FROM information_schema.columns \
                 WHERE table_schema = $1 AND table_name = $2 \
                 ORDER BY ordinal_position",
            )
            .bind(&table_schema)
            .bind(&table_name)
            .fetch_all(&mut *conn)
            .await?;

            schema.insert(
                format!("{}.{}", table_schema, table_name),
                columns
                    .into_iter()
                    .map(|(name, data_type)| ColumnSchema { name, data_type })
                    .collect(),
            );
        }

        Ok(schema)
    }
}
