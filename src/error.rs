//! Error types for datalake-client
//!
//! This module provides the error handling for the library, including:
//! - Status-tagged request failures (`<prefix>00.<http status>`)
//! - A fixed-code deserialization failure (`<prefix>01`)
//! - Job failures (canceled, faulted, invalid result)
//! - Data shape failures for streamed numeric data

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for datalake-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix for machine-readable error codes attached to request failures.
pub const ERROR_CODE_PREFIX: &str = "D";

/// Main error type for datalake-client
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-success status code
    #[error("{message}")]
    Request {
        /// The HTTP status code of the failed response
        status: u16,
        /// Human-readable error message, including the server's message body if present
        message: String,
    },

    /// Response body could not be decoded into the expected type
    #[error("response data could not be deserialized")]
    Deserialize(#[source] serde_json::Error),

    /// Network/transport error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error (token files, download staging)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error while encoding a request body or configuration
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL (bad base URL or relative path)
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The export job was canceled server-side
    #[error("the job has been cancelled")]
    JobCanceled,

    /// The export job faulted server-side
    #[error("the job has failed. Reason: {reason}")]
    JobFailed {
        /// The server-reported exception message
        reason: String,
    },

    /// The export job completed but its result is missing or not an artifact id
    #[error("the job result is invalid")]
    JobResultInvalid,

    /// The server advertised no content length for a data stream
    #[error("the data length is unknown")]
    DataLengthUnknown,

    /// Streamed data length is not a multiple of the element size
    #[error("the data length is invalid")]
    InvalidDataLength,

    /// The byte stream ended before the advertised content length was reached
    #[error("the stream ended early")]
    StreamEndedEarly,

    /// Archive extraction failed
    #[error("extraction failed for {archive}: {reason}")]
    Extraction {
        /// The archive file that failed to extract
        archive: PathBuf,
        /// The reason extraction failed
        reason: String,
    },
}

impl Error {
    /// Build a request failure from an HTTP status and the server's message body.
    pub(crate) fn request(status: reqwest::StatusCode, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            format!(
                "the HTTP request failed with status code {}",
                status.as_u16()
            )
        } else {
            format!(
                "the HTTP request failed with status code {}. The response message is: {}",
                status.as_u16(),
                body
            )
        };

        Error::Request {
            status: status.as_u16(),
            message,
        }
    }

    /// Machine-readable code for failures that carry one.
    ///
    /// Request failures are tagged `<prefix>00.<http status>`, deserialization
    /// failures `<prefix>01`. Other variants carry no code.
    pub fn code(&self) -> Option<String> {
        match self {
            Error::Request { status, .. } => Some(format!("{ERROR_CODE_PREFIX}00.{status}")),
            Error::Deserialize(_) => Some(format!("{ERROR_CODE_PREFIX}01")),
            _ => None,
        }
    }
}
