//! Pipeline behavior that needs no live database.

use askdb::db::QueryStatus;
use askdb::{CompletionProvider, ConnectionConfig, Result, SqlAgent};
use async_trait::async_trait;

/// Provider that records whether it was called.
struct CountingProvider {
    response: String,
    calls: std::sync::atomic::AtomicUsize,
}

impl CountingProvider {
    fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CompletionProvider for CountingProvider {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Connection parameters pointing at an unroutable TEST-NET-1 address, so
/// every database touch fails fast.
fn unreachable_db() -> ConnectionConfig {
    ConnectionConfig {
        server: "192.0.2.1".to_string(),
        database: "nowhere".to_string(),
        user: "u".to_string(),
        password: "p".to_string(),
        query_timeout_secs: 10,
        login_timeout_secs: 1,
    }
}

#[tokio::test]
async fn test_unreachable_db_yields_schema_sentinel_not_execution() {
    // Introspection fails -> empty schema -> sentinel error. The completion
    // provider is never consulted and the executor is never invoked: the
    // result carries no echoed query text.
    let mut agent = SqlAgent::with_provider(
        unreachable_db(),
        Box::new(CountingProvider::new("SELECT 1")),
    );

    let result = agent.answer("top 5 recent orders").await;
    assert_eq!(result.status, QueryStatus::Error);
    assert!(result.data.is_none());
    assert!(result.query.is_empty());
    assert_eq!(
        result.error.as_deref(),
        Some("ERROR: Could not retrieve database schema")
    );
}

#[tokio::test]
async fn test_generation_failure_never_reaches_provider() {
    #[derive(Clone)]
    struct Shared(std::sync::Arc<CountingProvider>);

    #[async_trait]
    impl CompletionProvider for Shared {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.0.complete(prompt).await
        }
    }

    let provider = std::sync::Arc::new(CountingProvider::new("SELECT 1"));
    let mut agent = SqlAgent::with_provider(unreachable_db(), Box::new(Shared(provider.clone())));

    let _ = agent.answer("anything").await;

    let calls = provider.calls.load(std::sync::atomic::Ordering::SeqCst);
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn test_direct_execute_echoes_query_on_connect_failure() {
    let mut agent = SqlAgent::with_provider(
        unreachable_db(),
        Box::new(CountingProvider::new("unused")),
    );

    let result = agent.execute("SELECT 1").await;
    assert_eq!(result.status, QueryStatus::Error);
    assert_eq!(result.query, "SELECT 1");
    assert!(result.data.is_none());
    assert!(result.error.is_some());
}

#[tokio::test]
async fn test_schema_text_is_empty_when_introspection_fails() {
    let mut agent = SqlAgent::with_provider(
        unreachable_db(),
        Box::new(CountingProvider::new("unused")),
    );
    assert!(agent.schema_text().await.is_empty());
}
