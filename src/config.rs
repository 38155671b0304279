//! Configuration types for datalake-client

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Client behavior configuration
///
/// Every field has a sensible default; a config built with
/// [`ClientConfig::new`] only needs the base URL of the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the data lake server (default: "http://localhost:5000")
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Directory where rotated refresh tokens are persisted (default: "./tokens")
    ///
    /// Tokens are stored one file per original refresh token, keyed by its
    /// SHA-256 hash, so a later session can resume after the presented token
    /// was already redeemed.
    #[serde(default = "default_token_folder")]
    pub token_folder: PathBuf,

    /// Name of the request header carrying attached configuration data
    /// (default: "Datalake-Configuration")
    #[serde(default = "default_configuration_header")]
    pub configuration_header: String,

    /// Interval between export job status polls (default: 1s)
    #[serde(default = "default_job_poll_interval")]
    pub job_poll_interval: Duration,

    /// Minimum interval between artifact download progress reports (default: 1s)
    #[serde(default = "default_download_progress_interval")]
    pub download_progress_interval: Duration,

    /// Request timeout applied to the HTTP transport (default: 60s)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Create a config for the given server with all other fields defaulted.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_folder: default_token_folder(),
            configuration_header: default_configuration_header(),
            job_poll_interval: default_job_poll_interval(),
            download_progress_interval: default_download_progress_interval(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn default_base_url() -> Url {
    match Url::parse("http://localhost:5000") {
        Ok(url) => url,
        Err(_) => unreachable!("static base URL literal is valid"),
    }
}

fn default_token_folder() -> PathBuf {
    PathBuf::from("./tokens")
}

fn default_configuration_header() -> String {
    "Datalake-Configuration".to_string()
}

fn default_job_poll_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_download_progress_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}
