//! Common test utilities for datalake-client integration tests

#![allow(dead_code)]

use datalake_client::{ClientConfig, DataLakeClient};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Build a client against a fresh mock server with fast job polling and all
/// file state scoped to a temporary directory.
pub async fn setup() -> (DataLakeClient, MockServer, TempDir) {
    let server = MockServer::start().await;
    let work_dir = TempDir::new().unwrap();

    let config = ClientConfig {
        base_url: server.uri().parse().unwrap(),
        token_folder: work_dir.path().join("tokens"),
        job_poll_interval: Duration::from_millis(10),
        download_progress_interval: Duration::from_secs(60),
        ..ClientConfig::default()
    };

    (DataLakeClient::new(config).unwrap(), server, work_dir)
}

/// Mount the token exchange and sign the client in.
pub async fn sign_in(client: &DataLakeClient, server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/users/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "accessToken": "access",
            "refreshToken": "rotated"
        })))
        .mount(server)
        .await;

    client.sign_in("initial").await.unwrap();
}

/// JSON body of a catalog item resolving to `resource_id`.
pub fn catalog_item_json(
    resource_id: &str,
    unit: Option<&str>,
    description: Option<&str>,
) -> serde_json::Value {
    let mut properties = serde_json::Map::new();

    if let Some(unit) = unit {
        properties.insert("unit".to_string(), unit.into());
    }

    if let Some(description) = description {
        properties.insert("description".to_string(), description.into());
    }

    serde_json::json!({
        "resource": { "id": resource_id, "properties": properties },
        "representation": { "samplePeriod": { "secs": 1, "nanos": 0 } }
    })
}

/// Little-endian bytes of a sequence of f64 values.
pub fn f64_bytes(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|value| value.to_le_bytes()).collect()
}

/// Mount one job status response, consumed exactly once.
///
/// Mount calls in sequence order to script a polling sequence.
pub async fn mount_job_status_once(server: &MockServer, job_id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/jobs/{job_id}/status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

/// Mount the export job submission, returning job id `j1`.
pub async fn mount_job_submission(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/jobs/export"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "j1" })))
        .mount(server)
        .await;
}

/// In-memory ZIP archive containing the given files.
pub fn zip_archive_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut cursor = std::io::Cursor::new(Vec::new());

    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        let options =
            zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);

        for (name, content) in files {
            writer.start_file(*name, options).unwrap();
            std::io::Write::write_all(&mut writer, content).unwrap();
        }

        writer.finish().unwrap();
    }

    cursor.into_inner()
}
