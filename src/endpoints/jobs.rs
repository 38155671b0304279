//! Jobs endpoints: export submission and status polling

use super::APPLICATION_JSON;
use crate::client::DataLakeClient;
use crate::error::Result;
use crate::models::{ExportParameters, Job, JobStatus};
use reqwest::Method;

/// Typed client for the jobs endpoints.
pub struct JobsClient {
    client: DataLakeClient,
}

impl JobsClient {
    pub(crate) fn new(client: DataLakeClient) -> Self {
        Self { client }
    }

    /// Submit an export job.
    pub async fn export(&self, parameters: &ExportParameters) -> Result<Job> {
        let body = serde_json::to_string(parameters)?;

        self.client
            .invoke(
                Method::POST,
                "/api/v1/jobs/export",
                Some(APPLICATION_JSON),
                Some(APPLICATION_JSON),
                Some(body),
            )
            .await
    }

    /// Fetch the current status of a job.
    pub async fn get_job_status(&self, job_id: &str) -> Result<JobStatus> {
        let relative_url = format!("/api/v1/jobs/{}/status", urlencoding::encode(job_id));

        self.client
            .invoke(
                Method::GET,
                &relative_url,
                Some(APPLICATION_JSON),
                None,
                None,
            )
            .await
    }
}
