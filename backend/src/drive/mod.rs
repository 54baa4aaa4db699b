//! Google Drive archival through an Apps Script web app.
//!
//! The script receives a url-encoded form with the image as base64 plus
//! its file name and plate, stores it in Drive (and usually appends a row
//! to a sheet), and answers with the Drive URL as plain text.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{DriveError, DriveResult};

#[derive(Clone)]
pub struct DriveClient {
    http: reqwest::Client,
    script_url: String,
    timeout: Duration,
}

impl DriveClient {
    pub fn new(script_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            script_url: script_url.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send one image; returns the Drive URL reported by the script
    pub async fn upload(&self, file_name: &str, bytes: &[u8], plate_number: &str) -> DriveResult<String> {
        let image = STANDARD.encode(bytes);
        let payload = [
            ("image", image.as_str()),
            ("filename", file_name),
            ("plate_number", plate_number),
        ];

        let response = self
            .http
            .post(&self.script_url)
            .timeout(self.timeout)
            .form(&payload)
            .send()
            .await
            .map_err(|e| DriveError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(DriveError::Status(status.as_u16()));
        }

        let url = response
            .text()
            .await
            .map_err(|e| DriveError::RequestFailed(e.to_string()))?;
        Ok(url.trim().to_string())
    }
}
