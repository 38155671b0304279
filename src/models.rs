//! Wire and result models for the data lake API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Access/refresh token pair issued by the token exchange
///
/// A pair is immutable once issued and replaced atomically on refresh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived access token carried as the bearer header
    pub access_token: String,
    /// Single-use refresh token for the next exchange
    pub refresh_token: String,
}

/// Request body for the token exchange endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    /// The refresh token to redeem
    pub refresh_token: String,
}

/// A server-side export job
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Opaque job identifier assigned by the server
    pub id: String,

    /// The parameters the job was submitted with, as reported by the server
    #[serde(default)]
    pub parameters: Option<serde_json::Value>,
}

/// Scheduling state of an export job
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    /// The job has been accepted but not yet scheduled
    Created,
    /// The job is running
    Running,
    /// The job was canceled server-side (terminal)
    Canceled,
    /// The job failed server-side (terminal)
    Faulted,
    /// The job ran to completion (terminal)
    Completed,
}

impl JobState {
    /// Whether this state ends the polling loop.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Canceled | Self::Faulted | Self::Completed)
    }
}

/// Point-in-time status snapshot of an export job
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    /// Current scheduling state
    pub status: JobState,

    /// Fractional progress in `[0, 1]`
    pub progress: f64,

    /// Artifact id of a completed job; a completed job without a string
    /// result is treated as failed
    #[serde(default)]
    pub result: Option<serde_json::Value>,

    /// Server-reported exception message of a faulted job
    #[serde(default)]
    pub exception_message: Option<String>,
}

/// Parameters of an export job, constructed once per export call
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportParameters {
    /// Inclusive start of the exported time range
    pub begin: DateTime<Utc>,

    /// Exclusive end of the exported time range
    pub end: DateTime<Utc>,

    /// Period covered by each produced file; zero yields a single file
    pub file_period: Duration,

    /// Target file format; `None` runs the job without producing a
    /// downloadable artifact
    pub file_format: Option<String>,

    /// The resource paths to export
    pub resource_paths: Vec<String>,

    /// Arbitrary writer configuration forwarded to the server
    pub configuration: Option<HashMap<String, serde_json::Value>>,
}

/// Metadata record describing a resource path
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// The resource the path points to
    pub resource: Resource,
    /// The representation the path selects
    pub representation: Representation,
}

/// A resource within a catalog
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Resource identifier, unique within its catalog
    pub id: String,

    /// Free-form resource properties ("unit", "description", ...)
    #[serde(default)]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

/// A representation of a resource
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Representation {
    /// The sampling period of the represented data
    pub sample_period: Duration,
}

/// Result of a data request for one resource path
///
/// Assembled once per resource path per load call, never mutated afterwards.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResponse {
    /// The catalog item the path resolved to
    pub catalog_item: CatalogItem,

    /// The resource name
    pub name: String,

    /// The optional resource unit
    pub unit: Option<String>,

    /// The optional resource description
    pub description: Option<String>,

    /// The sample period of the decoded data
    pub sample_period: Duration,

    /// The decoded data
    pub values: Vec<f64>,
}
