//! Diagnostic events emitted while clamping, truncating and rejecting input.

use opentargets_client::{extract_search, OpenTargetsClient, OpenTargetsError, MAX_PAGE_SIZE};
use serde_json::json;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Formatted log lines collected by a thread-local subscriber.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Installs a capturing subscriber for the current thread. `#[tokio::test]`
/// runs on a current-thread runtime, so async events land here too.
fn capture() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

fn empty_search_body(total: u64) -> serde_json::Value {
    json!({
        "data": {
            "search": {
                "aggregations": { "entities": [] },
                "hits": [],
                "total": total
            }
        }
    })
}

#[tokio::test]
async fn test_oversized_search_logs_clamp() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(
            json!({ "variables": { "size": MAX_PAGE_SIZE } }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_search_body(0)))
        .expect(1)
        .mount(&server)
        .await;

    let (logs, _guard) = capture();
    OpenTargetsClient::new()
        .with_endpoint(server.uri())
        .search("braf", 10_001)
        .await
        .unwrap();

    let lines = logs.lines();
    assert!(
        lines
            .iter()
            .any(|l| l.contains("INFO") && l.contains("exceeds the API limit") && l.contains("10000")),
        "no clamp notice in {lines:#?}"
    );
}

#[tokio::test]
async fn test_search_within_limit_logs_no_clamp() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_search_body(0)))
        .mount(&server)
        .await;

    let (logs, _guard) = capture();
    OpenTargetsClient::new()
        .with_endpoint(server.uri())
        .search("braf", MAX_PAGE_SIZE)
        .await
        .unwrap();

    assert!(!logs
        .lines()
        .iter()
        .any(|l| l.contains("exceeds the API limit")));
}

#[test]
fn test_large_total_logs_truncation() {
    let (logs, _guard) = capture();
    let result = extract_search(&empty_search_body(250_000)).unwrap();
    assert_eq!(result.total(), 250_000);

    let lines = logs.lines();
    assert!(
        lines.iter().any(|l| l.contains("INFO")
            && l.contains("250000")
            && l.contains("only the first 10000")),
        "no truncation notice in {lines:#?}"
    );
}

#[tokio::test]
async fn test_invalid_id_type_logs_warning() {
    let (logs, _guard) = capture();
    let err = OpenTargetsClient::new()
        .with_endpoint("http://127.0.0.1:9/graphql")
        .get_interactions("ENSG00000157764", "gene")
        .await
        .unwrap_err();
    assert!(matches!(err, OpenTargetsError::InvalidIdType(_)));

    let lines = logs.lines();
    assert!(
        lines
            .iter()
            .any(|l| l.contains("WARN") && l.contains("Invalid id_type") && l.contains("gene")),
        "no id_type warning in {lines:#?}"
    );
}
