//! Export-job orchestration and artifact retrieval

use super::DataLakeClient;
use crate::error::{Error, Result};
use crate::extraction;
use crate::models::{ExportParameters, JobState};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

impl DataLakeClient {
    /// Export data for a set of resource paths as a server-side job, then
    /// download and extract the resulting artifact into `target_folder`.
    ///
    /// With `file_format = None` the job still runs, which is useful for
    /// server-side pre-aggregation, but nothing is downloaded or extracted.
    ///
    /// `on_progress` receives the fractional progress together with one of
    /// the stage labels "export", "download" or "extract".
    #[allow(clippy::too_many_arguments)]
    pub async fn export(
        &self,
        begin: DateTime<Utc>,
        end: DateTime<Utc>,
        file_period: Duration,
        file_format: Option<&str>,
        resource_paths: &[String],
        configuration: Option<&HashMap<String, Value>>,
        target_folder: &Path,
        on_progress: Option<&(dyn Fn(f64, &str) + Sync)>,
    ) -> Result<()> {
        let parameters = ExportParameters {
            begin,
            end,
            file_period,
            file_format: file_format.map(ToOwned::to_owned),
            resource_paths: resource_paths.to_vec(),
            configuration: configuration.cloned(),
        };

        let job = self.jobs().export(&parameters).await?;
        info!(job_id = %job.id, "export job submitted");

        let artifact_id = self.wait_for_job(&job.id, on_progress).await?;

        if file_format.is_none() {
            debug!(job_id = %job.id, "no file format requested, leaving data server-side");
            return Ok(());
        }

        self.download_artifact(&artifact_id, target_folder, on_progress)
            .await
    }

    /// Poll the job at a fixed cadence until a terminal status is observed.
    ///
    /// The final progress report of 1.0 is emitted exactly once on
    /// completion, regardless of what the last poll reported.
    async fn wait_for_job(
        &self,
        job_id: &str,
        on_progress: Option<&(dyn Fn(f64, &str) + Sync)>,
    ) -> Result<String> {
        let artifact_id = loop {
            tokio::time::sleep(self.inner.config.job_poll_interval).await;

            let job_status = self.jobs().get_job_status(job_id).await?;

            match job_status.status {
                JobState::Canceled => return Err(Error::JobCanceled),
                JobState::Faulted => {
                    return Err(Error::JobFailed {
                        reason: job_status.exception_message.unwrap_or_default(),
                    });
                }
                JobState::Completed => match job_status.result {
                    Some(Value::String(artifact_id)) => break artifact_id,
                    _ => return Err(Error::JobResultInvalid),
                },
                JobState::Created | JobState::Running => {
                    if job_status.progress < 1.0 {
                        if let Some(on_progress) = on_progress {
                            on_progress(job_status.progress, "export");
                        }
                    }
                }
            }
        };

        if let Some(on_progress) = on_progress {
            on_progress(1.0, "export");
        }

        Ok(artifact_id)
    }

    /// Stream the artifact into a scoped temporary file, then extract it.
    ///
    /// The temporary file is deleted on every exit path.
    async fn download_artifact(
        &self,
        artifact_id: &str,
        target_folder: &Path,
        on_progress: Option<&(dyn Fn(f64, &str) + Sync)>,
    ) -> Result<()> {
        let response = self.artifacts().download(artifact_id).await?;
        let total_length = response.content_length();

        let mut temp_file = tempfile::NamedTempFile::new()?;

        let mut stream = response.bytes_stream();
        let mut consumed: u64 = 0;
        let mut last_report = Instant::now();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            temp_file.as_file_mut().write_all(&chunk)?;
            consumed += chunk.len() as u64;

            if last_report.elapsed() >= self.inner.config.download_progress_interval {
                last_report = Instant::now();

                if let (Some(total), Some(on_progress)) = (total_length, on_progress) {
                    // 1.0 is reserved for the explicit completion report below
                    if consumed < total {
                        on_progress(consumed as f64 / total as f64, "download");
                    }
                }
            }
        }

        temp_file.as_file_mut().flush()?;

        if let Some(on_progress) = on_progress {
            on_progress(1.0, "download");
        }

        extraction::extract_zip(temp_file.path(), target_folder)?;
        info!(artifact_id, ?target_folder, "artifact extracted");

        if let Some(on_progress) = on_progress {
            on_progress(1.0, "extract");
        }

        Ok(())
    }
}
