//! UI Components for the Platescan page.
//!
//! # Layout Components
//! - [`Hero`] - Title and short description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - File input, upload button, plate and image output

mod hero;
mod upload;
mod footer;

pub use hero::*;
pub use upload::*;
pub use footer::*;
