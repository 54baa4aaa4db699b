//! OCR module - reads plate text through the OCR.Space web API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use platescan::ocr::OcrClient;
//!
//! let client = OcrClient::new("my-api-key".to_string());
//! let plate = client.read_plate("car.jpg", &bytes).await?;
//! ```

use std::time::Duration;

use platescan_core::NOT_DETECTED;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;

use crate::config::{ServerConfig, DEFAULT_OCR_API_URL};
use crate::error::{OcrError, OcrResult};

/// OCR.Space API client
#[derive(Clone)]
pub struct OcrClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    language: String,
    timeout: Duration,
}

/// OCR.Space response structure
#[derive(Debug, Deserialize)]
struct OcrSpaceResponse {
    #[serde(rename = "ParsedResults", default)]
    parsed_results: Vec<ParsedResult>,
    #[serde(rename = "IsErroredOnProcessing", default)]
    is_errored_on_processing: bool,
    /// A string or an array of strings, depending on the failure
    #[serde(rename = "ErrorMessage", default)]
    error_message: Option<Value>,
    #[serde(rename = "ErrorDetails", default)]
    error_details: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ParsedResult {
    #[serde(rename = "ParsedText", default)]
    parsed_text: Option<String>,
}

impl OcrClient {
    /// Create a new client with explicit API key
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint: DEFAULT_OCR_API_URL.to_string(),
            language: "eng".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.ocr_api_key.clone())
            .with_endpoint(&config.ocr_api_url)
            .with_language(&config.ocr_language)
            .with_timeout(config.http_timeout)
    }

    /// Point the client at another endpoint
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Set the OCR language code (`eng`, `ger`, ...)
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the plate on an image, falling back to [`NOT_DETECTED`]
    pub async fn read_plate(&self, file_name: &str, bytes: &[u8]) -> OcrResult<String> {
        let text = self.parse_image(file_name, bytes).await?;
        if text.is_empty() {
            tracing::info!(file = file_name, "no text detected");
            Ok(NOT_DETECTED.to_string())
        } else {
            Ok(text)
        }
    }

    /// Raw OCR text of the image, trimmed
    pub async fn parse_image(&self, file_name: &str, bytes: &[u8]) -> OcrResult<String> {
        tracing::debug!(endpoint = %self.endpoint, file = file_name, bytes = bytes.len(), "calling OCR.Space");

        let mut part = Part::bytes(bytes.to_vec()).file_name(file_name.to_string());
        if let Some(kind) = infer::get(bytes) {
            part = part
                .mime_str(kind.mime_type())
                .map_err(|e| OcrError::RequestFailed(e.to_string()))?;
        }
        let form = Form::new()
            .part("file", part)
            .text("apikey", self.api_key.clone())
            .text("language", self.language.clone());

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| OcrError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OcrError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(OcrError::Status {
                status: status.as_u16(),
                body: truncate(&body, 300),
            });
        }

        parse_response(&body)
    }
}

/// Extract the text from an OCR.Space response body
fn parse_response(body: &str) -> OcrResult<String> {
    let response: OcrSpaceResponse =
        serde_json::from_str(body).map_err(|e| OcrError::InvalidJson(e.to_string()))?;

    if response.is_errored_on_processing {
        let message = response
            .error_message
            .as_ref()
            .and_then(flatten_message)
            .or_else(|| response.error_details.as_ref().and_then(flatten_message))
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(OcrError::Processing(message));
    }

    let text = response
        .parsed_results
        .into_iter()
        .next()
        .and_then(|r| r.parsed_text)
        .unwrap_or_default();

    Ok(text.trim().to_string())
}

fn flatten_message(value: &Value) -> Option<String> {
    let message = match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        Value::Null => return None,
        other => other.to_string(),
    };
    if message.trim().is_empty() {
        None
    } else {
        Some(message)
    }
}

fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
