//! Data endpoints: raw sample streaming

use super::APPLICATION_OCTET_STREAM;
use crate::client::DataLakeClient;
use crate::error::Result;
use chrono::{DateTime, Utc};
use reqwest::{Method, Response};

/// Typed client for the data endpoints.
pub struct DataClient {
    client: DataLakeClient,
}

impl DataClient {
    pub(crate) fn new(client: DataLakeClient) -> Self {
        Self { client }
    }

    /// Stream the raw bytes of a resource for `[begin, end)`.
    ///
    /// The caller owns the returned response and its body stream.
    pub async fn get_stream(
        &self,
        resource_path: &str,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Response> {
        let relative_url = format!(
            "/api/v1/data?resourcePath={}&begin={}&end={}",
            urlencoding::encode(resource_path),
            urlencoding::encode(&begin.to_rfc3339()),
            urlencoding::encode(&end.to_rfc3339()),
        );

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
