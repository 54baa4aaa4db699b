//! HTTP API module.
//!
//! The axum server answering the upload trigger's `POST /upload`.

pub mod server;

pub use server::{router, start_server, AppState};
