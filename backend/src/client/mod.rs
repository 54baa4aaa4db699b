//! Terminal rendition of the upload trigger.
//!
//! [`HttpTransport`] sends the multipart request with `reqwest`;
//! [`TerminalView`] takes the file from the command line and prints what
//! the browser page would display.

use std::path::Path;

use platescan_core::{
    Transport, TransportError, UploadFile, UploadOutcome, View, FILE_FIELD, UPLOAD_PATH,
};
use reqwest::multipart::{Form, Part};

use crate::error::{UploadError, UploadResult};

/// Posts uploads to `<server>/upload`
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(server: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: format!("{}{}", server.trim_end_matches('/'), UPLOAD_PATH),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport<UploadFile> for HttpTransport {
    async fn post_upload(&self, file: Option<UploadFile>) -> Result<String, TransportError> {
        let mut form = Form::new();
        if let Some(file) = file {
            let mut part = Part::bytes(file.bytes).file_name(file.name);
            if let Some(content_type) = file.content_type {
                part = part
                    .mime_str(&content_type)
                    .map_err(|e| TransportError::Request(e.to_string()))?;
            }
            form = form.part(FILE_FIELD, part);
        }

        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        tracing::debug!(status = %response.status(), url = %self.url, "upload answered");

        response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))
    }
}

/// Prints results to the terminal
#[derive(Debug, Default)]
pub struct TerminalView {
    file: Option<UploadFile>,
}

impl TerminalView {
    pub fn new(file: Option<UploadFile>) -> Self {
        Self { file }
    }
}

impl View for TerminalView {
    type File = UploadFile;

    fn selected_file(&self) -> Option<UploadFile> {
        self.file.clone()
    }

    fn set_result_text(&self, text: &str) {
        println!("🚗 Plate number: {}", text);
    }

    fn set_image_source(&self, url: &str) {
        println!("🖼️  Image: {}", url);
    }

    fn show_error(&self, message: &str) {
        eprintln!("❌ {}", message);
    }
}

/// Read an image from disk into an [`UploadFile`]
pub async fn load_file(path: &Path) -> std::io::Result<UploadFile> {
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();

    // Typed from the content; the extension may be missing or wrong
    let file = match infer::get(&bytes) {
        Some(kind) => UploadFile::new(name, bytes).with_content_type(kind.mime_type()),
        None => UploadFile::new(name, bytes),
    };
    Ok(file)
}

/// Turn a trigger outcome into the plate and image path, or an error
pub fn recognized(outcome: UploadOutcome) -> UploadResult<(String, String)> {
    match outcome {
        UploadOutcome::Recognized {
            plate_number,
            image_path,
        } => Ok((plate_number, image_path)),
        UploadOutcome::ApplicationError(message) => Err(UploadError::Rejected(message)),
        UploadOutcome::TransportError(error) => Err(UploadError::Transport(error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{serve, spawn_app, spawn_ocr, OcrStub};
    use axum::extract::{Multipart, State};
    use axum::routing::post;
    use axum::{Json, Router};
    use platescan_core::{ResponseOrdering, UploadTrigger};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// (field name, file name, content type, bytes) per field, per request
    type Recorded = Arc<Mutex<Vec<Vec<(String, Option<String>, Option<String>, Vec<u8>)>>>>;

    #[derive(Default)]
    struct RecordingView {
        file: Option<UploadFile>,
        result_text: Mutex<String>,
        image_source: Mutex<String>,
        alerts: Mutex<Vec<String>>,
    }

    impl View for RecordingView {
        type File = UploadFile;

        fn selected_file(&self) -> Option<UploadFile> {
            self.file.clone()
        }

        fn set_result_text(&self, text: &str) {
            *self.result_text.lock().unwrap() = text.to_string();
        }

        fn set_image_source(&self, url: &str) {
            *self.image_source.lock().unwrap() = url.to_string();
        }

        fn show_error(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }
    }

    async fn record(State(recorded): State<Recorded>, mut multipart: Multipart) -> Json<Value> {
        let mut fields = Vec::new();
        // An empty form arrives as a zero-byte body, which multer refuses
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or("").to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.unwrap().to_vec();
            fields.push((name, file_name, content_type, bytes));
        }
        recorded.lock().unwrap().push(fields);
        Json(json!({ "plate_number": "ABC123", "image_path": "/images/abc123.png" }))
    }

    async fn spawn_recorder() -> (String, Recorded) {
        let recorded = Recorded::default();
        let app = Router::new()
            .route("/upload", post(record))
            .with_state(recorded.clone());
        (serve(app).await, recorded)
    }

    fn car() -> UploadFile {
        UploadFile::new("car.jpg", b"jpeg-bytes".to_vec()).with_content_type("image/jpeg")
    }

    #[test]
    fn test_upload_url() {
        assert_eq!(HttpTransport::new("http://localhost:5000/").url(), "http://localhost:5000/upload");
        assert_eq!(HttpTransport::new("http://h").url(), "http://h/upload");
    }

    #[tokio::test]
    async fn test_one_post_with_file_field() {
        let (server, recorded) = spawn_recorder().await;
        let view = RecordingView { file: Some(car()), ..Default::default() };
        let trigger = UploadTrigger::new(view, HttpTransport::new(&server));

        let outcome = trigger.trigger().await;

        assert!(outcome.is_recognized());
        let requests = recorded.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].len(), 1);
        let (name, file_name, content_type, bytes) = &requests[0][0];
        assert_eq!(name, "file");
        assert_eq!(file_name.as_deref(), Some("car.jpg"));
        assert_eq!(content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(bytes, b"jpeg-bytes");

        assert_eq!(*trigger.view().result_text.lock().unwrap(), "ABC123");
        assert_eq!(*trigger.view().image_source.lock().unwrap(), "/images/abc123.png");
    }

    #[tokio::test]
    async fn test_no_file_sends_empty_form() {
        let (server, recorded) = spawn_recorder().await;
        let trigger = UploadTrigger::new(RecordingView::default(), HttpTransport::new(&server));

        trigger.trigger().await;

        let requests = recorded.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_changes_nothing() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let view = RecordingView { file: Some(car()), ..Default::default() };
        let trigger = UploadTrigger::new(view, HttpTransport::new(&format!("http://{}", addr)));

        let outcome = trigger.trigger().await;

        assert!(matches!(
            outcome,
            UploadOutcome::TransportError(TransportError::Request(_))
        ));
        assert!(trigger.view().alerts.lock().unwrap().is_empty());
        assert!(trigger.view().result_text.lock().unwrap().is_empty());
        assert!(trigger.view().image_source.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_against_real_server() {
        let ocr = spawn_ocr(OcrStub::Text("KL 07 CU 7475")).await;
        let app = spawn_app(&ocr, None, 10).await;

        let view = RecordingView { file: Some(car()), ..Default::default() };
        let trigger = UploadTrigger::new(view, HttpTransport::new(&app.base_url))
            .with_ordering(ResponseOrdering::Arrival);

        let outcome = trigger.trigger().await;

        assert!(outcome.is_recognized());
        assert_eq!(*trigger.view().result_text.lock().unwrap(), "KL 07 CU 7475");
        assert!(trigger.view().image_source.lock().unwrap().starts_with("/uploads/"));
    }

    #[tokio::test]
    async fn test_server_error_reply_alerts() {
        let ocr = spawn_ocr(OcrStub::Text("ABC123")).await;
        let app = spawn_app(&ocr, None, 10).await;

        let trigger = UploadTrigger::new(RecordingView::default(), HttpTransport::new(&app.base_url));
        let outcome = trigger.trigger().await;

        assert_eq!(outcome, UploadOutcome::ApplicationError("No file provided".into()));
        assert_eq!(*trigger.view().alerts.lock().unwrap(), vec!["No file provided".to_string()]);
        assert!(trigger.view().result_text.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_file_sniffs_type_from_content() {
        const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        let dir = tempfile::TempDir::new().unwrap();

        let no_ext = dir.path().join("plate");
        std::fs::write(&no_ext, PNG).unwrap();
        let file = load_file(&no_ext).await.unwrap();
        assert_eq!(file.name, "plate");
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
        assert_eq!(file.bytes, PNG);

        let misnamed = dir.path().join("plate.jpg");
        std::fs::write(&misnamed, PNG).unwrap();
        let file = load_file(&misnamed).await.unwrap();
        assert_eq!(file.content_type.as_deref(), Some("image/png"));

        let text = dir.path().join("notes.png");
        std::fs::write(&text, b"not an image").unwrap();
        let file = load_file(&text).await.unwrap();
        assert_eq!(file.content_type, None);
    }

    #[test]
    fn test_recognized_maps_outcomes() {
        let (plate, path) = recognized(UploadOutcome::Recognized {
            plate_number: "ABC123".into(),
            image_path: "/uploads/a.png".into(),
        })
        .unwrap();
        assert_eq!((plate.as_str(), path.as_str()), ("ABC123", "/uploads/a.png"));

        let err = recognized(UploadOutcome::ApplicationError("No file provided".into())).unwrap_err();
        assert_eq!(err.to_string(), "Server rejected the upload: No file provided");

        let err = recognized(UploadOutcome::TransportError(TransportError::Request(
            "connection refused".into(),
        )))
        .unwrap_err();
        assert!(matches!(err, UploadError::Transport(TransportError::Request(_))));
    }
}
