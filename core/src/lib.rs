//! # Platescan core - the upload trigger
//!
//! Shared by the terminal client and the Leptos frontend:
//!
//! ```text
//! ┌────────────┐  selected file  ┌───────────────┐  POST /upload  ┌──────────┐
//! │    View    │────────────────▶│ UploadTrigger │───────────────▶│ Transport│
//! │ (DOM/term) │◀────────────────│               │◀───────────────│          │
//! └────────────┘  plate / image  └───────────────┘   JSON body    └──────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Transport errors
//! - [`types`] - Wire and outcome types
//! - [`reply`] - Response decoding
//! - [`trigger`] - The trigger and its `View`/`Transport` seams

pub mod error;
pub mod reply;
pub mod trigger;
pub mod types;

pub use error::{TransportError, TransportResult};
pub use reply::decode_reply;
pub use trigger::{ResponseOrdering, Transport, UploadTrigger, View};
pub use types::{UploadFile, UploadOutcome, UploadReply, FILE_FIELD, NOT_DETECTED, UPLOAD_PATH};
