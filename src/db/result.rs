//! Result shape returned to any presentation layer.

use serde::{Deserialize, Serialize};

/// Outcome of a query execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Success,
    Error,
}

/// Materialized tabular data. All cell values are rendered as text so the
/// result is uniform regardless of column types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultData {
    /// Column names, in descriptor order
    pub columns: Vec<String>,

    /// Row values, one text cell per column
    pub rows: Vec<Vec<String>>,
}

/// Stable result contract: `{status, query, error, data}`.
///
/// `data` is present iff `status == Success`; the executed (or rejected)
/// query text is always echoed back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// Success or error
    pub status: QueryStatus,

    /// The SQL text this result refers to
    pub query: String,

    /// Failure description, present iff status is error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Tabular data, present iff status is success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResultData>,
}

impl QueryResult {
    /// Build a success result.
    pub fn success(query: impl Into<String>, data: ResultData) -> Self {
        Self {
            status: QueryStatus::Success,
            query: query.into(),
            error: None,
            data: Some(data),
        }
    }

    /// Build an error result.
    pub fn error(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: QueryStatus::Error,
            query: query.into(),
            error: Some(message.into()),
            data: None,
        }
    }

    /// Whether the query succeeded.
    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_carries_data_and_no_error() {
        let result = QueryResult::success(
            "SELECT 1",
            ResultData {
                columns: vec!["?column?".to_string()],
                rows: vec![vec!["1".to_string()]],
            },
        );
        assert!(result.is_success());
        assert!(result.error.is_none());
        assert!(result.data.is_some());
        assert_eq!(result.query, "SELECT 1");
    }

    #[test]
    fn test_error_omits_data() {
        let result = QueryResult::error("SELECT nope", "relation does not exist");
        assert!(!result.is_success());
        assert!(result.data.is_none());
        assert_eq!(result.error.as_deref(), Some("relation does not exist"));
    }

    #[test]
    fn test_serialized_shape() {
        let result = QueryResult::error("q", "boom");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["query"], "q");
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }
}
