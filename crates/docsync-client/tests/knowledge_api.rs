#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test — panics are the assertion mechanism")]

use docsync_client::{ClientConfig, ClientError, KnowledgeClient, RetryConfig};
use docsync_types::DocumentError;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use std::time::Duration;
use wiremock::{Mock, MockServer, ResponseTemplate};

const DATASET: &str = "c65ddc66";

fn client_for(server: &MockServer) -> KnowledgeClient {
    KnowledgeClient::new(ClientConfig {
        base_url: format!("{}/v1", server.uri()),
        api_key: "dataset-test".to_string(),
        timeout_secs: 5,
        page_size: 2,
        retry: RetryConfig { max_retries: 2, base_delay_ms: 1, max_delay_ms: 5 },
        ..Default::default()
    })
    .expect("client builds")
}

fn doc(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({"id": id, "name": name, "indexing_status": "completed"})
}

#[tokio::test]
async fn test_list_documents_follows_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/datasets/{DATASET}/documents")))
        .and(query_param("page", "1"))
        .and(query_param("limit", "2"))
        .and(header("authorization", "Bearer dataset-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [doc("d1", "infra/a.md"), doc("d2", "infra/b.md")],
            "has_more": true,
            "limit": 2,
            "total": 3,
            "page": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/datasets/{DATASET}/documents")))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [doc("d3", "infra/c.md")],
            "has_more": false,
            "limit": 2,
            "total": 3,
            "page": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let docs = client_for(&server).list_documents(DATASET).await.expect("listing succeeds");

    let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["infra/a.md", "infra/b.md", "infra/c.md"]);
    assert_eq!(docs[2].id, "d3");
}

#[tokio::test]
async fn test_create_by_text_sends_indexing_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/datasets/{DATASET}/document/create-by-text")))
        .and(header("authorization", "Bearer dataset-test"))
        .and(body_partial_json(serde_json::json!({
            "name": "infra/setup.md",
            "text": "# Setup",
            "indexing_technique": "high_quality",
            "process_rule": {"mode": "automatic"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "document": doc("new-1", "infra/setup.md"),
            "batch": "20250101000000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .create_by_text(DATASET, "infra/setup.md", "# Setup")
        .await
        .expect("create succeeds");

    assert_eq!(resp.document.id, "new-1");
    assert_eq!(resp.batch.as_deref(), Some("20250101000000"));
}

#[tokio::test]
async fn test_update_by_text_targets_document_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/datasets/{DATASET}/documents/d9/update-by-text")))
        .and(body_partial_json(serde_json::json!({
            "name": "legal/nda.md",
            "text": "v2",
            "process_rule": {"mode": "automatic"}
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"document": doc("d9", "legal/nda.md")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .update_by_text(DATASET, "d9", "legal/nda.md", "v2")
        .await
        .expect("update succeeds");

    assert_eq!(resp.document.id, "d9");
    assert!(resp.batch.is_none());
}

#[tokio::test]
async fn test_server_errors_are_retried_then_given_up() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(3)
        .mount(&server)
        .await;

    let err = client_for(&server).list_documents(DATASET).await.expect_err("502 must fail");

    match &err {
        ClientError::RetriesExhausted { attempts, last } => {
            assert_eq!(*attempts, 3);
            assert!(matches!(**last, ClientError::ServerError { status: 502, .. }));
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert_eq!(
        DocumentError::from(err),
        DocumentError::Status { status: 502, message: "bad gateway".to_string() }
    );
}

#[tokio::test]
async fn test_client_errors_fail_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_by_text(DATASET, "a.md", "x")
        .await
        .expect_err("403 must fail");

    assert!(matches!(err, ClientError::ServerError { status: 403, .. }));
}

#[tokio::test]
async fn test_rate_limit_recovers_on_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"document": doc("d1", "a.md")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .create_by_text(DATASET, "a.md", "x")
        .await
        .expect("second attempt succeeds");

    assert_eq!(resp.document.id, "d1");
}

#[tokio::test]
async fn test_unparseable_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).list_documents(DATASET).await.expect_err("html is not json");

    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_create_is_not_resent_after_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/datasets/{DATASET}/document/create-by-text")))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_by_text(DATASET, "infra/setup.md", "# Setup")
        .await
        .expect_err("502 must fail");

    assert!(matches!(err, ClientError::ServerError { status: 502, .. }));
}

#[tokio::test]
async fn test_create_is_not_resent_after_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/datasets/{DATASET}/document/create-by-text")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"document": doc("d1", "infra/setup.md")}))
                .set_delay(Duration::from_millis(1500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = KnowledgeClient::new(ClientConfig {
        base_url: format!("{}/v1", server.uri()),
        api_key: "dataset-test".to_string(),
        timeout_secs: 1,
        retry: RetryConfig { max_retries: 2, base_delay_ms: 1, max_delay_ms: 5 },
        ..Default::default()
    })
    .expect("client builds");

    let err = client
        .create_by_text(DATASET, "infra/setup.md", "# Setup")
        .await
        .expect_err("timeout must fail");

    assert!(matches!(err, ClientError::Request(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn test_update_is_retried_after_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/datasets/{DATASET}/documents/d9/update-by-text")))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/v1/datasets/{DATASET}/documents/d9/update-by-text")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"document": doc("d9", "legal/nda.md")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let resp = client_for(&server)
        .update_by_text(DATASET, "d9", "legal/nda.md", "v2")
        .await
        .expect("second attempt succeeds");

    assert_eq!(resp.document.id, "d9");
}

#[tokio::test]
async fn test_retry_after_is_capped_by_max_delay() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "86400"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [], "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let listing = client.list_documents(DATASET);
    let docs = tokio::time::timeout(Duration::from_secs(5), listing)
        .await
        .expect("wait is capped at max_delay_ms")
        .expect("listing succeeds");

    assert!(docs.is_empty());
}
