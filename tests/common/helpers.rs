#![allow(dead_code)]

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing_subscriber::EnvFilter;
use volley::{HttpClientConfig, RetryExtension};
use wiremock::{MockServer, Request};

// Common test constants
pub const TEST_USER_AGENT: &str = "volley-test-agent";
pub const SUCCESS_BODY: &str = "SUCCESS";

/// Installs a test subscriber once; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Starts a mock server with tracing enabled.
pub async fn start_server() -> MockServer {
    init_tracing();
    MockServer::start().await
}

/// Joins a path onto the mock server's base URL.
pub fn url(server: &MockServer, path: &str) -> String {
    format!("{}{}", server.uri(), path)
}

/// Returns every request the server recorded.
pub async fn received(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
}

/// Returns the single request the server recorded.
pub async fn received_one(server: &MockServer) -> Request {
    let mut requests = received(server).await;
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}

/// Collects every value of `name` in a recorded request.
pub fn header_values(request: &Request, name: &str) -> Vec<String> {
    request
        .headers
        .get_all(name)
        .iter()
        .map(|v| v.to_str().expect("ascii header").to_string())
        .collect()
}

/// Parses the recorded `Cookie` header into name/value pairs.
pub fn cookie_pairs(request: &Request) -> Vec<(String, String)> {
    header_values(request, "cookie")
        .iter()
        .flat_map(|line| line.split("; ").map(str::to_string).collect::<Vec<_>>())
        .filter_map(|pair| {
            pair.split_once('=')
                .map(|(name, value)| (name.to_string(), value.to_string()))
        })
        .collect()
}

/// Creates headers carrying the test user agent.
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates a client configuration with the test user agent.
pub fn create_test_http_config() -> HttpClientConfig {
    HttpClientConfig {
        headers: Some(create_test_headers()),
        ..HttpClientConfig::default()
    }
}

/// Creates a retry extension with millisecond waits.
pub fn fast_retry(retry_max: u32) -> RetryExtension {
    RetryExtension {
        retry_max,
        retry_wait_min: Duration::from_millis(1),
        retry_wait_max: Duration::from_millis(5),
    }
}
