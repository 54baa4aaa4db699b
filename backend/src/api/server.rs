//! HTTP server for the plate upload API.
//!
//! # API Endpoints
//!
//! | Method | Path          | Description                              |
//! |--------|---------------|------------------------------------------|
//! | GET    | `/health`     | Health check                             |
//! | POST   | `/upload`     | Upload an image, answer with its plate   |
//! | GET    | `/uploads/*`  | Stored images                            |
//! | GET    | anything else | Static files (the built frontend)        |

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use platescan_core::{UploadReply, FILE_FIELD, UPLOAD_PATH};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::drive::DriveClient;
use crate::error::{ServerError, ServerResult, StorageResult};
use crate::ocr::OcrClient;
use crate::storage::{UploadStore, PUBLIC_PREFIX};

/// Room for multipart boundaries and headers on top of the image limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Everything a request handler needs
pub struct AppState {
    pub store: UploadStore,
    pub ocr: OcrClient,
    /// `None` when Drive forwarding is off
    pub drive: Option<DriveClient>,
    pub max_image_size_mb: u64,
}

impl AppState {
    pub async fn from_config(config: &ServerConfig) -> StorageResult<Self> {
        let drive = config
            .drive_url()
            .map(|url| DriveClient::new(url).with_timeout(config.http_timeout));

        Ok(Self {
            store: UploadStore::open(&config.upload_folder).await?,
            ocr: OcrClient::from_config(config),
            drive,
            max_image_size_mb: config.max_image_size_mb,
        })
    }

    fn max_upload_bytes(&self) -> usize {
        (self.max_image_size_mb as usize).saturating_mul(1024 * 1024)
    }
}

/// Build the application router
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    // Permissive CORS so a frontend served elsewhere (trunk serve) can post
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let body_limit = state.max_upload_bytes().saturating_add(MULTIPART_OVERHEAD);
    let uploads = ServeDir::new(state.store.dir());

    Router::new()
        .route("/health", get(health))
        .route(UPLOAD_PATH, post(upload_image))
        .nest_service(PUBLIC_PREFIX, uploads)
        .fallback_service(ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::from_config(&config).await?;

    tracing::info!(upload_folder = %config.upload_folder.display(), "storing uploads");
    match config.drive_url() {
        Some(url) => tracing::info!(%url, "Google Drive forwarding enabled"),
        None => tracing::info!("Google Drive forwarding disabled"),
    }

    let app = router(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Platescan server running on http://localhost:{}", port);
    tracing::info!("   POST {}  - Upload an image", UPLOAD_PATH);
    tracing::info!("   GET  /health  - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "platescan",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /upload"
        }
    }))
}

/// Upload endpoint: store, OCR, optionally archive to Drive
async fn upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ServerResult<Json<UploadReply>> {
    let mut upload = None;
    let mut seen_field = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                return Err(ServerError::TooLarge { limit_mb: state.max_image_size_mb });
            }
            // A form with no parts at all can arrive as a zero-byte body
            Err(e) if !seen_field => {
                tracing::debug!("unreadable multipart body treated as empty: {}", e);
                break;
            }
            Err(e) => return Err(ServerError::BadRequest(format!("Multipart error: {}", e))),
        };
        seen_field = true;

        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ServerError::TooLarge { limit_mb: state.max_image_size_mb }
            } else {
                ServerError::BadRequest(format!("Read error: {}", e))
            }
        })?;
        upload = Some((file_name, bytes));
    }

    let (file_name, bytes) = upload
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| ServerError::BadRequest("No file provided".to_string()))?;

    if bytes.is_empty() {
        return Err(ServerError::BadRequest("Uploaded file is empty".to_string()));
    }
    if bytes.len() > state.max_upload_bytes() {
        return Err(ServerError::TooLarge { limit_mb: state.max_image_size_mb });
    }

    let kind = infer::get(&bytes).map(|k| k.mime_type()).unwrap_or("unknown");
    tracing::info!(file = %file_name, bytes = bytes.len(), kind, "📄 new upload");
    if !infer::is_image(&bytes) {
        tracing::warn!(file = %file_name, "upload does not look like an image");
    }

    let stored = state.store.save(&file_name, &bytes).await?;
    let plate_number = state.ocr.read_plate(&stored.original_name, &bytes).await?;
    tracing::info!(plate = %plate_number, file = %stored.stored_name, "plate read");

    let google_drive_url = match &state.drive {
        Some(drive) => match drive.upload(&stored.original_name, &bytes, &plate_number).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Drive upload failed: {}", e);
                None
            }
        },
        None => None,
    };

    Ok(Json(UploadReply::Recognized {
        plate_number,
        image_path: stored.public_path(),
        google_drive_url,
    }))
}
