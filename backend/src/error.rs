//! Error types for the plate server.
//!
//! - [`ConfigError`] - Environment configuration errors
//! - [`StorageError`] - Upload folder errors
//! - [`OcrError`] - OCR.Space client errors
//! - [`DriveError`] - Apps Script forwarding errors
//! - [`ServerError`] - Request-level errors, rendered as `{"error": ...}`
//! - [`UploadError`] - Terminal client outcomes that carry no plate
//!
//! Conversion into [`ServerError`] is automatic via `From`, so handlers
//! can use `?` across all of them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use platescan_core::{TransportError, UploadReply};
use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is unset.
    #[error("Missing {0} environment variable")]
    Missing(&'static str),

    /// A variable is set but unparsable.
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

// =============================================================================
// Storage Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write upload: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing usable left after sanitizing the client's file name.
    #[error("Invalid file name: {0:?}")]
    InvalidName(String),
}

// =============================================================================
// OCR Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    /// OCR.Space reported `IsErroredOnProcessing`.
    #[error("OCR.Space error: {0}")]
    Processing(String),
}

// =============================================================================
// Drive Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum DriveError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to upload to Google Drive (HTTP {0})")]
    Status(u16),
}

// =============================================================================
// Server Errors
// =============================================================================

/// Errors returned by the `/upload` handler.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("File exceeds the {limit_mb} MB limit")]
    TooLarge { limit_mb: u64 },

    #[error("OCR failed: {0}")]
    Ocr(#[from] OcrError),

    #[error("Error processing image: {0}")]
    Storage(#[from] StorageError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Ocr(_) => StatusCode::BAD_GATEWAY,
            ServerError::Storage(StorageError::InvalidName(_)) => StatusCode::BAD_REQUEST,
            ServerError::Storage(StorageError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status(), "upload rejected: {}", self);
        (self.status(), Json(UploadReply::error(self.to_string()))).into_response()
    }
}

// =============================================================================
// Client Errors
// =============================================================================

/// Why `platescan upload` got no plate back.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Server rejected the upload: {0}")]
    Rejected(String),

    #[error("Upload failed: {0}")]
    Transport(#[from] TransportError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type ConfigResult<T> = Result<T, ConfigError>;

pub type StorageResult<T> = Result<T, StorageError>;

pub type OcrResult<T> = Result<T, OcrError>;

pub type DriveResult<T> = Result<T, DriveError>;

pub type ServerResult<T> = Result<T, ServerError>;

pub type UploadResult<T> = Result<T, UploadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let ocr_err = OcrError::Processing("Unable to recognize the file type".into());
        let server_err: ServerError = ocr_err.into();
        assert_eq!(server_err.status(), StatusCode::BAD_GATEWAY);
        assert!(server_err.to_string().starts_with("OCR failed: OCR.Space error"));

        let storage_err = StorageError::InvalidName("..".into());
        let server_err: ServerError = storage_err.into();
        assert_eq!(server_err.status(), StatusCode::BAD_REQUEST);

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let server_err: ServerError = StorageError::from(io_err).into();
        assert_eq!(server_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_too_large_message() {
        let err = ServerError::TooLarge { limit_mb: 10 };
        assert_eq!(err.to_string(), "File exceeds the 10 MB limit");
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
