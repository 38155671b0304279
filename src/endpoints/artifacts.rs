//! Artifacts endpoints: export artifact download

use super::APPLICATION_OCTET_STREAM;
use crate::client::DataLakeClient;
use crate::error::Result;
use reqwest::{Method, Response};

/// Typed client for the artifacts endpoints.
pub struct ArtifactsClient {
    client: DataLakeClient,
}

impl ArtifactsClient {
    pub(crate) fn new(client: DataLakeClient) -> Self {
        Self { client }
    }

    /// Download a completed job's artifact as a byte stream.
    ///
    /// The caller owns the returned response and its body stream.
    pub async fn download(&self, artifact_id: &str) -> Result<Response> {
        let relative_url = format!("/api/v1/artifacts/{}", urlencoding::encode(artifact_id));

        self.client
            .invoke_raw(
                Method::GET,
                &relative_url,
                Some(APPLICATION_OCTET_STREAM),
                None,
                None,
            )
            .await
    }
}
