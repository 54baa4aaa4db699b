//! Backend communication.
//!
//! - [`upload`] - `POST /upload` through the browser's fetch

pub mod upload;

pub use upload::*;
