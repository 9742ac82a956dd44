//! Typed errors for backend calls
//!
//! Every client operation returns one of these instead of swallowing the
//! failure, so the workflow can tell "nothing matched" apart from "the
//! network broke" when deciding what to report.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias using [`BackendError`]
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors that can occur talking to the document backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success status
    #[error("backend returned {status} for {url}")]
    Status { status: StatusCode, url: String },

    /// Response body did not match the expected shape
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No record matched the given filter
    #[error("no record in {collection} matched {filter}")]
    NotFound { collection: String, filter: String },

    /// Record exists but is missing the expected file field
    #[error("record {record_id} has no file in field {field}")]
    MissingFile { record_id: String, field: String },
}
