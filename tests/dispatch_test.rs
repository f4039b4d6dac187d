//! Integration tests for the HTTP job dispatcher
//!
//! - `connect` probes the backend and fails fast when it is unreachable
//! - `invoke` maps the backend's answer to accepted/rejected

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use farmgate::core::trigger::JobDispatcher;
use farmgate::infra::dispatch::HttpDispatcher;

async fn mock_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_connect_probes_the_backend() {
    let backend = mock_backend().await;
    let dispatcher = HttpDispatcher::connect(&backend.uri())
        .await
        .expect("connect");
    assert_eq!(dispatcher.base_url(), backend.uri().trim_end_matches('/'));
}

#[tokio::test]
async fn test_connect_fails_on_error_status() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&backend)
        .await;

    assert!(HttpDispatcher::connect(&backend.uri()).await.is_err());
}

#[tokio::test]
async fn test_connect_fails_on_unreachable_backend() {
    // Port 9 (discard) is not listening.
    assert!(HttpDispatcher::connect("http://127.0.0.1:9").await.is_err());
}

#[tokio::test]
async fn test_invoke_reports_accepted_job() {
    let backend = mock_backend().await;
    Mock::given(method("POST"))
        .and(path("/job/dusk_default__foo__ubuntu_noble__source/build"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&backend)
        .await;

    let mut dispatcher = HttpDispatcher::connect(&backend.uri())
        .await
        .expect("connect");
    let accepted = dispatcher
        .invoke("dusk_default__foo__ubuntu_noble__source")
        .await
        .expect("invoke");
    assert!(accepted);
}

#[tokio::test]
async fn test_invoke_reports_rejected_job() {
    let backend = mock_backend().await;
    Mock::given(method("POST"))
        .and(path("/job/unknown-job/build"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&backend)
        .await;

    let mut dispatcher = HttpDispatcher::connect(&backend.uri())
        .await
        .expect("connect");
    let accepted = dispatcher.invoke("unknown-job").await.expect("invoke");
    assert!(!accepted);
}
