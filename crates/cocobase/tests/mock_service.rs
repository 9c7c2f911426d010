//! Mock service tests for the cocobase client.
//!
//! These tests use wiremock to simulate the Cocobase API and check the
//! requests the client sends and how it classifies responses, without
//! network access or real credentials.

use cocobase::error::{InvalidArgumentError, TransportError};
use cocobase::{ApiError, BaseUrl, Client, Error, Operator, QueryFilter};
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const API_KEY: &str = "ck_test_key";

/// Helper to create a client pointed at a mock server.
fn mock_client(server: &MockServer) -> Client {
    // For tests, we need to allow HTTP localhost
    let base = BaseUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    Client::builder(API_KEY).base_url(base).build().unwrap()
}

/// Fails the test on drop if any request reaches the server.
async fn forbid_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

fn document(id: &str, data: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "collection_id": "col_1",
        "created_at": 1_700_000_000,
        "data": data
    })
}

// ============================================================================
// Collection Tests
// ============================================================================

#[tokio::test]
async fn test_create_collection_without_webhook() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections"))
        .and(header("x-api-key", API_KEY))
        .and(body_json(json!({"name": "users"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "col_1",
            "name": "users",
            "webhook_url": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let collection = client.create_collection("users", None).await.unwrap();

    assert_eq!(collection.id, "col_1");
    assert_eq!(collection.name, "users");
    assert!(collection.webhook_url.is_none());

    // No webhook_url key at all when none is given
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("webhook_url").is_none());
}

#[tokio::test]
async fn test_create_collection_with_webhook() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections"))
        .and(body_json(json!({
            "name": "orders",
            "webhook_url": "https://hooks.example.com/orders"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "col_2",
            "name": "orders",
            "webhook_url": "https://hooks.example.com/orders"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let collection = client
        .create_collection("orders", Some("https://hooks.example.com/orders"))
        .await
        .unwrap();

    assert_eq!(
        collection.webhook_url.as_deref(),
        Some("https://hooks.example.com/orders")
    );
}

#[tokio::test]
async fn test_create_collection_wrong_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "x"})))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.create_collection("users", None).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Api(ApiError::UnexpectedStatus { status: 200, .. })
    ));
}

#[tokio::test]
async fn test_update_collection_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/col_1"))
        .and(header("x-api-key", API_KEY))
        .and(body_json(json!({"name": "people"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "col_1",
            "name": "people"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let collection = client
        .update_collection("col_1", Some("people"), None)
        .await
        .unwrap();

    assert_eq!(collection.name, "people");
}

#[tokio::test]
async fn test_update_collection_requires_a_change() {
    let server = MockServer::start().await;
    forbid_requests(&server).await;

    let client = mock_client(&server);
    let err = client
        .update_collection("col_1", None, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidArgument(InvalidArgumentError::EmptyCollectionUpdate)
    ));
}

#[tokio::test]
async fn test_delete_collection_posts_without_body() {
    let server = MockServer::start().await;

    // The service contract routes collection deletion through POST
    Mock::given(method("POST"))
        .and(path("/collections/col_1"))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    assert!(client.delete_collection("col_1").await.unwrap());

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_delete_collection_not_found_raises() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such collection"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.delete_collection("missing").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

// ============================================================================
// Document Tests
// ============================================================================

#[tokio::test]
async fn test_create_document_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/documents"))
        .and(query_param("collection", "col_1"))
        .and(header("x-api-key", API_KEY))
        .and(body_json(json!({"data": {"name": "Ada", "age": 36}})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(document("doc_1", json!({"name": "Ada", "age": 36}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let record = client
        .create_document("col_1", &json!({"name": "Ada", "age": 36}))
        .await
        .unwrap();

    assert_eq!(record.id(), "doc_1");
    assert_eq!(record.collection_id(), "col_1");
    assert_eq!(record.get_int("age"), Some(36));
}

#[tokio::test]
async fn test_create_document_rejects_non_object() {
    let server = MockServer::start().await;
    forbid_requests(&server).await;

    let client = mock_client(&server);
    let err = client
        .create_document("col_1", &json!(["not", "a", "map"]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::InvalidArgument(InvalidArgumentError::FieldsNotObject { .. })
    ));
}

#[tokio::test]
async fn test_missing_ids_fail_before_dispatch() {
    let server = MockServer::start().await;
    forbid_requests(&server).await;

    let client = mock_client(&server);

    assert!(client.get_document("", "doc_1").await.is_err());
    assert!(client.get_document("col_1", "").await.is_err());
    assert!(client.delete_document("col_1", " ").await.is_err());
    assert!(client.list_documents("", None).await.is_err());
    assert!(client.delete_collection("").await.is_err());
    assert!(client.create_collection("", None).await.is_err());
    assert!(
        client
            .update_document("col_1", "a/b", &json!({}))
            .await
            .is_err()
    );

    // Dot segments would be resolved away and hit a different endpoint
    for id in [".", "..", "%2E%2e"] {
        assert!(matches!(
            client.get_document(id, "doc_1").await,
            Err(Error::InvalidArgument(InvalidArgumentError::Identifier { .. }))
        ));
        assert!(client.list_documents(id, None).await.is_err());
        assert!(client.delete_document("col_1", id).await.is_err());
    }
}

#[tokio::test]
async fn test_list_documents_preserves_server_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents"))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            document("doc_b", json!({"n": 2})),
            document("doc_a", json!({"n": 1})),
            document("doc_c", json!({"n": 3}))
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let records = client.list_documents("col_1", None).await.unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["doc_b", "doc_a", "doc_c"]);

    // No query string without a filter
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_list_documents_with_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents"))
        .and(query_param("filter[age][greaterThan]", "18"))
        .and(query_param("filter[name][contains]", "Ada Lovelace"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([document("doc_1", json!({"age": 36}))])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let filter = QueryFilter::new()
        .add_filter("age", Operator::GreaterThan, 18)
        .unwrap()
        .contains("name", "Ada Lovelace")
        .unwrap();
    let records = client.list_documents("col_1", Some(&filter)).await.unwrap();

    assert_eq!(records.len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("filter[age][greaterThan]=18&filter[name][contains]=Ada+Lovelace")
    );
}

#[tokio::test]
async fn test_list_documents_empty_filter_sends_no_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let records = client
        .list_documents("col_1", Some(&QueryFilter::new()))
        .await
        .unwrap();

    assert!(records.is_empty());
    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_get_document_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents/doc_1"))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "doc_1",
            "collection_id": "col_1",
            "created_at": 0,
            "data": {"active": "YES", "joined": "2024-01-15T10:30:00Z"},
            "collection": {"id": "col_1", "name": "users"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let record = client.get_document("col_1", "doc_1").await.unwrap();

    assert_eq!(record.get_bool("active"), Some(true));
    assert_eq!(record.created_at().timestamp(), 0);
    assert!(record.get_datetime("joined").is_some());
    assert_eq!(record.collection().unwrap()["name"], "users");
}

#[tokio::test]
async fn test_get_document_not_found_raises() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.get_document("col_1", "missing").await.unwrap_err();

    match err {
        Error::Api(ApiError::UnexpectedStatus { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_update_document_uses_patch() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/collections/col_1/documents/doc_1"))
        .and(header("x-api-key", API_KEY))
        .and(body_json(json!({"data": {"name": "Grace"}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(document("doc_1", json!({"name": "Grace"}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let record = client
        .update_document("col_1", "doc_1", &json!({"name": "Grace"}))
        .await
        .unwrap();

    assert_eq!(record.get_string("name").as_deref(), Some("Grace"));
}

#[tokio::test]
async fn test_local_changes_persist_only_through_update() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents/doc_1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(document("doc_1", json!({"count": 1}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/collections/col_1/documents/doc_1"))
        .and(body_json(json!({"data": {"count": 2}})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(document("doc_1", json!({"count": 2}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let mut record = client.get_document("col_1", "doc_1").await.unwrap();
    record.set("count", 2);

    let updated = client
        .update_document("col_1", record.id(), record.fields())
        .await
        .unwrap();
    assert_eq!(updated.get_int("count"), Some(2));
}

#[tokio::test]
async fn test_delete_document_success_statuses() {
    for status in [200u16, 204] {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/collections/col_1/documents/doc_1"))
            .and(header("x-api-key", API_KEY))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server);
        assert!(client.delete_document("col_1", "doc_1").await.unwrap());
    }
}

#[tokio::test]
async fn test_delete_document_not_found_returns_false() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/collections/col_1/documents/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    // Other operations raise on 404; document deletion reports false
    assert!(!client.delete_document("col_1", "gone").await.unwrap());
}

#[tokio::test]
async fn test_delete_document_known_errors_still_raise() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/collections/col_1/documents/doc_1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.delete_document("col_1", "doc_1").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Api(ApiError::InternalServiceError { .. })
    ));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_known_status_table() {
    let cases = [
        (400, "bad filter"),
        (422, "name is required"),
        (500, "Internal Server Error"),
    ];

    for (status, text) in cases {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/collections"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_string(text)
                    .insert_header("content-type", "text/plain"),
            )
            .mount(&server)
            .await;

        let client = mock_client(&server);
        let err = client.create_collection("users", None).await.unwrap_err();

        let Error::Api(api) = err else {
            panic!("expected a service error for {status}");
        };
        assert_eq!(api.status(), status);
        assert_eq!(api.body(), text);
        match status {
            400 => assert!(matches!(api, ApiError::InvalidRequest { .. })),
            422 => assert!(matches!(api, ApiError::MissingField { .. })),
            _ => assert!(matches!(api, ApiError::InternalServiceError { .. })),
        }
    }
}

#[tokio::test]
async fn test_empty_error_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.list_documents("col_1", None).await.unwrap_err();

    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_malformed_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents/doc_1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.get_document("col_1", "doc_1").await.unwrap_err();

    match err {
        Error::InvalidResponse { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_array_body_is_not_a_document() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents/doc_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.get_document("col_1", "doc_1").await.unwrap_err();

    match err {
        Error::InvalidResponse { body, .. } => assert_eq!(body, "[]"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Reserve a port, then free it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base = BaseUrl::new(format!("http://127.0.0.1:{port}")).unwrap();
    let client = Client::builder(API_KEY).base_url(base).build().unwrap();

    let err = client.get_document("col_1", "doc_1").await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::Connection { .. })
    ));
    assert_eq!(err.status(), None);
}

// ============================================================================
// Client Behavior Tests
// ============================================================================

#[tokio::test]
async fn test_token_is_never_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let base = BaseUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    let client = Client::builder(API_KEY)
        .token("user-session-token")
        .base_url(base)
        .build()
        .unwrap();
    client.list_documents("col_1", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let request: &Request = &requests[0];
    assert!(request.headers.get("authorization").is_none());
    assert_eq!(request.headers.get("x-api-key").unwrap(), API_KEY);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents/doc_1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(document("doc_1", json!({"n": 1}))),
        )
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/collections/col_1/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let other = client.clone();
    let spawned = tokio::spawn(async move { other.get_document("col_1", "doc_1").await });

    let (first, listed) = tokio::join!(
        client.get_document("col_1", "doc_1"),
        client.list_documents("col_1", None)
    );

    assert_eq!(first.unwrap().id(), "doc_1");
    assert!(listed.unwrap().is_empty());
    assert_eq!(spawned.await.unwrap().unwrap().id(), "doc_1");
}
