//! In-process stand-ins for OCR.Space and the Apps Script, plus a helper
//! that runs the real router on an ephemeral port.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde_json::json;
use tempfile::TempDir;

use crate::api::server::{router, AppState};
use crate::drive::DriveClient;
use crate::ocr::OcrClient;
use crate::storage::UploadStore;

pub enum OcrStub {
    /// Successful parse with this text
    Text(&'static str),
    /// `IsErroredOnProcessing` with this message
    Errored(&'static str),
}

pub struct TestApp {
    pub base_url: String,
    _uploads: TempDir,
}

/// Run `app` on an ephemeral local port, returning its base URL
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Returns the stub's parse endpoint
pub async fn spawn_ocr(stub: OcrStub) -> String {
    let body = match stub {
        OcrStub::Text(text) => json!({
            "ParsedResults": [{ "ParsedText": text, "FileParseExitCode": 1 }],
            "OCRExitCode": 1,
            "IsErroredOnProcessing": false
        }),
        OcrStub::Errored(message) => json!({
            "OCRExitCode": 99,
            "IsErroredOnProcessing": true,
            "ErrorMessage": [message]
        }),
    };
    let app = Router::new().route(
        "/parse/image",
        post(move |_form: Bytes| {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    format!("{}/parse/image", serve(app).await)
}

/// Returns the stub's script URL; `ok = false` makes it answer 500
pub async fn spawn_drive(ok: bool) -> String {
    let app = Router::new().route(
        "/exec",
        post(move |Form(fields): Form<HashMap<String, String>>| async move {
            if !ok {
                return (StatusCode::INTERNAL_SERVER_ERROR, String::new());
            }
            let name = fields.get("filename").cloned().unwrap_or_default();
            (StatusCode::OK, format!("https://drive.example/{}", name))
        }),
    );
    format!("{}/exec", serve(app).await)
}

pub async fn spawn_app(ocr_url: &str, drive_url: Option<&str>, max_image_size_mb: u64) -> TestApp {
    let uploads = TempDir::new().unwrap();
    let state = AppState {
        store: UploadStore::open(uploads.path()).await.unwrap(),
        ocr: OcrClient::new("test-key".into()).with_endpoint(ocr_url),
        drive: drive_url.map(DriveClient::new),
        max_image_size_mb,
    };
    let base_url = serve(router(state, uploads.path())).await;
    TestApp {
        base_url,
        _uploads: uploads,
    }
}
