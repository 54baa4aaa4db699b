//! Types shared by the upload client and the plate server.
//!
//! # Categories
//!
//! - **Payload Types** - what the client sends
//! - **Reply Types** - what `POST /upload` answers
//! - **Outcome Types** - what the trigger makes of a reply

use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Name of the multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Route the trigger posts to.
pub const UPLOAD_PATH: &str = "/upload";

/// Plate text reported when OCR finds nothing.
pub const NOT_DETECTED: &str = "Not Detected";

// =============================================================================
// Payload Types
// =============================================================================

/// An image picked for upload, held in memory.
///
/// Browser builds pass a `web_sys::File` instead; see [`crate::View::File`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    /// File name sent in the multipart `Content-Disposition`
    pub name: String,
    /// MIME type, if known
    pub content_type: Option<String>,
    /// Raw file content
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

// =============================================================================
// Reply Types
// =============================================================================

/// Body returned by `POST /upload`.
///
/// Serialized untagged, so the two shapes on the wire are
/// `{"error": "..."}` and `{"plate_number": "...", "image_path": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadReply {
    Error {
        error: String,
    },
    Recognized {
        plate_number: String,
        image_path: String,
        /// Link to the archived copy, when Drive forwarding succeeded
        #[serde(default, skip_serializing_if = "Option::is_none")]
        google_drive_url: Option<String>,
    },
}

impl UploadReply {
    pub fn error(message: impl Into<String>) -> Self {
        UploadReply::Error {
            error: message.into(),
        }
    }
}

// =============================================================================
// Outcome Types
// =============================================================================

/// What one invocation of the trigger ended with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The server read a plate.
    Recognized {
        plate_number: String,
        image_path: String,
    },
    /// The server answered with a truthy `error` field.
    ApplicationError(String),
    /// No usable reply.
    TransportError(TransportError),
}

impl UploadOutcome {
    pub fn is_recognized(&self) -> bool {
        matches!(self, UploadOutcome::Recognized { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_wire_shapes() {
        let json = serde_json::to_value(UploadReply::error("bad image")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "bad image" }));

        let json = serde_json::to_value(UploadReply::Recognized {
            plate_number: "ABC123".into(),
            image_path: "/uploads/abc.png".into(),
            google_drive_url: None,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "plate_number": "ABC123", "image_path": "/uploads/abc.png" })
        );
    }

    #[test]
    fn test_reply_keeps_drive_url() {
        let reply: UploadReply = serde_json::from_str(
            r#"{"plate_number":"X1","image_path":"/p.png","google_drive_url":"https://drive/x"}"#,
        )
        .unwrap();
        match reply {
            UploadReply::Recognized { google_drive_url, .. } => {
                assert_eq!(google_drive_url.as_deref(), Some("https://drive/x"));
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }
}
