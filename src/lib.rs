//! # datalake-client
//!
//! Async client runtime for time-series data lake APIs.
//!
//! ## Design Philosophy
//!
//! datalake-client is designed to be:
//! - **Transparent** - Token refresh and re-authentication happen behind the scenes
//! - **Sensible defaults** - Works out of the box with just a base URL
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Streaming** - Bulk loads and artifact downloads never buffer more than needed
//!
//! ## Quick Start
//!
//! ```no_run
//! use datalake_client::{ClientConfig, DataLakeClient};
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig {
//!         base_url: "https://data.example.com".parse()?,
//!         ..Default::default()
//!     };
//!
//!     let client = DataLakeClient::new(config)?;
//!     client.sign_in("my-refresh-token").await?;
//!
//!     let end = Utc::now();
//!     let begin = end - Duration::hours(1);
//!     let paths = vec!["/campus/building1/T1/1_s".to_string()];
//!
//!     let data = client.load(begin, end, &paths, None).await?;
//!     println!("loaded {} resources", data.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// High-level client
pub mod client;
/// Configuration types
pub mod config;
/// Typed endpoint sub-clients
pub mod endpoints;
/// Error types
pub mod error;
/// Archive extraction
pub mod extraction;
/// Wire and result models
pub mod models;

mod token;

// Re-export commonly used types
pub use client::{ConfigurationGuard, DataLakeClient};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::{
    CatalogItem, DataResponse, ExportParameters, Job, JobState, JobStatus, RefreshTokenRequest,
    Representation, Resource, TokenPair,
};
