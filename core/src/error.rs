//! Error types for the upload trigger.
//!
//! Application-level failures (`{"error": "..."}` bodies) are not errors
//! here: they are a regular [`crate::UploadOutcome`] variant. This module
//! only covers the transport side, i.e. everything that prevents the
//! trigger from getting a usable reply out of the server.

use thiserror::Error;

/// Failure to obtain or decode a reply from `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("request failed: {0}")]
    Request(String),

    /// A response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// The body is not JSON.
    #[error("invalid JSON response: {0}")]
    InvalidJson(String),

    /// The body is JSON but not an object.
    #[error("unexpected JSON response: expected an object, got {0}")]
    UnexpectedShape(&'static str),

    /// A success reply without one of its string fields.
    #[error("response is missing string field `{0}`")]
    MissingField(&'static str),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
