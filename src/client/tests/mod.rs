//! Tests for the client runtime against a mock authorization/data server


use crate::client::DataLakeClient;
use crate::config::ClientConfig;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::MockServer;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

/// Build a client pointed at a mock server, with token persistence scoped to
/// a temporary directory.
async fn test_client() -> (DataLakeClient, MockServer, TempDir) {
    let mock_server = MockServer::start().await;
    let token_dir = TempDir::new().unwrap();

    let config = ClientConfig {
        base_url: mock_server.uri().parse().unwrap(),
        token_folder: token_dir.path().to_path_buf(),
        job_poll_interval: Duration::from_millis(10),
        ..ClientConfig::default()
    };

    (
        DataLakeClient::new(config).unwrap(),
        mock_server,
        token_dir,
    )
}

fn token_pair_body(access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({ "accessToken": access, "refreshToken": refresh })
}

/// Mount the token exchange rotating `presented` into (`access`, `rotated`).
async fn mount_refresh(
    server: &MockServer,
    presented: &str,
    access: &str,
    rotated: &str,
    expect: u64,
) {
    Mock::given(method("POST"))
        .and(path("/api/v1/users/refresh-token"))
        .and(body_json(serde_json::json!({ "refreshToken": presented })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_pair_body(access, rotated)))
        .expect(expect)
        .mount(server)
        .await;
}
