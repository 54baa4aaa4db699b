//! # Platescan - license plate upload server and client
//!
//! Answers the upload trigger's `POST /upload`: stores the image, reads
//! the plate through OCR.Space and optionally archives the image to
//! Google Drive through an Apps Script web app.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ POST /upload│────▶│ UploadStore │────▶│  OcrClient  │────▶│ DriveClient │
//! │ (multipart) │     │ (disk)      │     │ (OCR.Space) │     │ (optional)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Environment configuration
//! - [`storage`] - Upload folder
//! - [`ocr`] - OCR.Space client
//! - [`drive`] - Apps Script client
//! - [`api`] - HTTP API server
//! - [`client`] - Terminal upload client

pub mod error;
pub mod config;

pub mod storage;
pub mod ocr;
pub mod drive;

pub mod api;
pub mod client;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    ConfigError,
    StorageError,
    OcrError,
    DriveError,
    ServerError,
    UploadError,
};

pub use config::ServerConfig;
pub use storage::{UploadStore, StoredUpload, sanitize_file_name};
pub use ocr::OcrClient;
pub use drive::DriveClient;
pub use client::{HttpTransport, TerminalView, load_file, recognized};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server, AppState};
}
