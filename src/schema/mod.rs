//! Database schema model and introspection.

pub mod introspector;

pub use introspector::SchemaIntrospector;

use std::collections::BTreeMap;

/// One column of a base table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    /// Column name
    pub name: String,

    /// Catalog data type name (e.g. `integer`, `timestamp without time zone`)
    pub data_type: String,
}

/// Mapping from fully-qualified table name (`schema.table`) to its columns,
/// in ordinal order.
///
/// Built fresh on each introspection call and discarded after prompt
/// construction; nothing is cached across calls. Table names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSchema {
    tables: BTreeMap<String, Vec<ColumnSchema>>,
}

impl TableSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a table with its ordered columns. Replaces any existing entry
    /// with the same name.
    pub fn insert(&mut self, table: impl Into<String>, columns: Vec<ColumnSchema>) {
        self.tables.insert(table.into(), columns);
    }

    /// Whether no tables were found (introspection failed or yielded nothing).
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Columns of a table, if present.
    pub fn get(&self, table: &str) -> Option<&[ColumnSchema]> {
        self.tables.get(table).map(|c| c.as_slice())
    }

    /// Iterate tables in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<ColumnSchema>)> {
        self.tables.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_duplicate() {
        let mut schema = TableSchema::new();
        schema.insert(
            "public.orders",
            vec![ColumnSchema {
                name: "id".to_string(),
                data_type: "integer".to_string(),
            }],
        );
        schema.insert(
            "public.orders",
            vec![ColumnSchema {
                name: "order_id".to_string(),
                data_type: "bigint".to_string(),
            }],
        );
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.get("public.orders").unwrap()[0].name, "order_id");
    }

    #[test]
    fn test_empty_schema() {
        let schema = TableSchema::new();
        assert!(schema.is_empty());
        assert_eq!(schema.len(), 0);
        assert!(schema.get("public.orders").is_none());
    }
}
