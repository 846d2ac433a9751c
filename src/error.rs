//! Error taxonomy for the tracker.
//!
//! Each pipeline stage owns one error enum: fetch (RPC), storage (datasets),
//! render (report artifacts). Configuration failures use the config crate's
//! own error type, re-exported here so callers import the whole taxonomy
//! from one place. The pipeline wraps these in `anyhow` context when
//! propagating to the binary.

use chrono::{DateTime, Utc};
use thiserror::Error;

pub use config::ConfigError;

/// Failure while fetching token metrics from the RPC endpoint.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request itself failed (connect, timeout, TLS, bad status).
    #[error("RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a JSON-RPC error object.
    #[error("RPC endpoint returned error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response body did not match the expected shape or carried
    /// values that fail validation (e.g. an unparseable amount string).
    #[error("malformed RPC response: {0}")]
    MalformedResponse(String),
}

/// Failure while reading or writing the on-disk datasets.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("dataset I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV-level parse or serialize failure; carries row position.
    #[error("dataset parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The file parsed but violates a dataset invariant.
    #[error("dataset is corrupt: {0}")]
    Corrupt(String),

    /// Appends must move time strictly forward.
    #[error("snapshot timestamp {next} does not advance past last row {last}")]
    NonMonotonicTimestamp { last: DateTime<Utc>, next: DateTime<Utc> },
}

/// Failure while rendering report artifacts.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Nothing to draw; refusing to emit an empty artifact.
    #[error("cannot render a report from an empty dataset")]
    EmptyDataset,

    /// The chart backend rejected the drawing operations.
    #[error("chart backend error: {0}")]
    Backend(String),

    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Wrap a backend error, keeping only its message. Plotters errors are
    /// generic over the backend type, so they are stringified at this seam.
    pub fn backend(err: impl std::fmt::Display) -> Self {
        RenderError::Backend(err.to_string())
    }
}
