//! Tests against a live PostgreSQL instance.
//!
//! Ignored by default; run with `cargo test -- --ignored` after setting
//! SQL_SERVER / SQL_DATABASE / SQL_USER / SQL_PASSWORD.

use askdb::db::{DbHandle, QueryExecutor, QueryStatus};
use askdb::ConnectionConfig;

fn live_config() -> ConnectionConfig {
    ConnectionConfig::from_env().expect("live DB env vars must be set for ignored tests")
}

#[tokio::test]
#[ignore]
async fn test_acquire_reuses_connection_with_one_probe_each() {
    let mut handle = DbHandle::new(live_config());

    // First acquisition connects; no live handle existed, so no probe.
    handle.acquire().await.expect("connect");
    assert!(handle.is_live());
    assert_eq!(handle.probe_count(), 0);

    // Two further acquisitions probe once each and keep the same handle.
    handle.acquire().await.expect("reuse");
    assert_eq!(handle.probe_count(), 1);
    handle.acquire().await.expect("reuse");
    assert_eq!(handle.probe_count(), 2);
    assert!(handle.is_live());
}

#[tokio::test]
#[ignore]
async fn test_execute_stringifies_rows() {
    let mut handle = DbHandle::new(live_config());

    let result = QueryExecutor::execute(
        &mut handle,
        "SELECT 1 AS n, 'x' AS s, NULL::int AS missing, true AS b",
    )
    .await;

    assert_eq!(result.status, QueryStatus::Success);
    let data = result.data.expect("data present on success");
    assert_eq!(data.columns, ["n", "s", "missing", "b"]);
    assert_eq!(data.rows.len(), 1);
    assert_eq!(data.rows[0], ["1", "x", "NULL", "true"]);
}

#[tokio::test]
#[ignore]
async fn test_zero_row_result_still_has_columns() {
    let mut handle = DbHandle::new(live_config());

    let result = QueryExecutor::execute(&mut handle, "SELECT 1 AS n WHERE false").await;

    assert_eq!(result.status, QueryStatus::Success);
    let data = result.data.expect("data present on success");
    assert_eq!(data.columns, vec!["n"]);
    assert!(data.rows.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_bad_statement_is_error_with_echoed_query() {
    let mut handle = DbHandle::new(live_config());

    let result = QueryExecutor::execute(&mut handle, "SELECT FROM no_such_table!!").await;

    assert_eq!(result.status, QueryStatus::Error);
    assert_eq!(result.query, "SELECT FROM no_such_table!!");
    assert!(result.error.is_some());
    assert!(result.data.is_none());

    // The connection survives a failed statement and is reused afterwards.
    let ok = QueryExecutor::execute(&mut handle, "SELECT 1").await;
    assert_eq!(ok.status, QueryStatus::Success);
}
