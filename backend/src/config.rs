//! Server configuration.
//!
//! Read from the process environment at startup; `main` loads `.env`
//! first. Only `OCR_API_KEY` is required.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};

/// Default OCR.Space endpoint.
pub const DEFAULT_OCR_API_URL: &str = "https://api.ocr.space/parse/image";

/// Default port, also used by the `upload` command's default server URL.
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub ocr_api_key: String,
    pub ocr_api_url: String,
    pub ocr_language: String,
    /// Apps Script web app receiving a copy of every upload
    pub google_apps_script_url: Option<String>,
    pub enable_google_integration: bool,
    pub upload_folder: PathBuf,
    /// Served at `/`, typically the built frontend
    pub static_dir: PathBuf,
    pub max_image_size_mb: u64,
    pub http_timeout: Duration,
}

impl ServerConfig {
    /// Load from process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let ocr_api_key = get("OCR_API_KEY").ok_or(ConfigError::Missing("OCR_API_KEY"))?;

        Ok(Self {
            ocr_api_key,
            ocr_api_url: get("OCR_API_URL").unwrap_or_else(|| DEFAULT_OCR_API_URL.to_string()),
            ocr_language: get("OCR_LANGUAGE").unwrap_or_else(|| "eng".to_string()),
            google_apps_script_url: get("GOOGLE_APPS_SCRIPT_URL"),
            enable_google_integration: parse_bool(
                "ENABLE_GOOGLE_INTEGRATION",
                get("ENABLE_GOOGLE_INTEGRATION"),
                true,
            )?,
            upload_folder: get("UPLOAD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static/uploads")),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
            max_image_size_mb: parse_u64("MAX_IMAGE_SIZE_MB", get("MAX_IMAGE_SIZE_MB"), 10)?,
            http_timeout: Duration::from_secs(parse_u64(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                60,
            )?),
        })
    }

    /// Drive URL, if forwarding is switched on and configured.
    pub fn drive_url(&self) -> Option<&str> {
        if self.enable_google_integration {
            self.google_apps_script_url.as_deref()
        } else {
            None
        }
    }
}

fn parse_u64(name: &'static str, value: Option<String>, default: u64) -> ConfigResult<u64> {
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: v }),
    }
}

fn parse_bool(name: &'static str, value: Option<String>, default: bool) -> ConfigResult<bool> {
    match value {
        None => Ok(default),
        Some(v) => match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { name, value: v }),
        },
    }
}
