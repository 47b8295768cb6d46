//! HTTP routes for the web server
//!
//! Provides the upload endpoint, a health check and the landing page.

use axum::{
    body::Bytes,
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::diagnostics;
use super::page::render_index;
use super::storage::{PhotoStore, StoreError};
use super::{DEFAULT_PORT, PHOTO_FIELD};

/// `received_at` format, local time with microseconds
const RECEIVED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: PhotoStore,
    /// Port shown in the landing page instructions
    pub port: u16,
    pub version: String,
}

impl AppState {
    pub fn new(store: PhotoStore) -> Self {
        Self {
            store,
            port: DEFAULT_PORT,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Build the router with all endpoints
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload_photo))
        .route("/health", get(health_check))
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub upload_count: usize,
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Dummy backend is running".to_string(),
        upload_count: state.store.count_photos().await,
    })
}

/// Landing page with status and usage instructions
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let count = state.store.count_photos().await;
    Html(render_index(count, state.store.root(), state.port))
}

/// Successful upload response
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    pub size: u64,
    pub received_at: String,
}

/// The `photo` file part of an upload
struct PhotoPart {
    file_name: String,
    data: Bytes,
}

/// Receive a photo upload
async fn upload_photo(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, UploadError> {
    diagnostics::log_upload_received(&Local::now(), &headers);

    // A body that is not multipart at all simply carries no fields
    let mut multipart = match multipart {
        Ok(multipart) => Some(multipart),
        Err(MultipartRejection::InvalidBoundary(_)) => None,
        Err(rejection) => return Err(UploadError::Rejected(rejection)),
    };

    let mut form_fields = Vec::new();
    let mut photo: Option<PhotoPart> = None;

    while let Some(field) = next_field(multipart.as_mut()).await? {
        let name = field.name().unwrap_or_default().to_string();

        // Parts without a filename parameter are plain form fields
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let data = field.bytes().await?;
                if name == PHOTO_FIELD && photo.is_none() {
                    photo = Some(PhotoPart { file_name, data });
                }
            }
            None => {
                let value = field.text().await?;
                form_fields.push((name, value));
            }
        }
    }

    diagnostics::log_form_fields(&form_fields);

    let photo = photo.ok_or(UploadError::MissingFile)?;
    if photo.file_name.is_empty() {
        return Err(UploadError::EmptyFilename);
    }

    let stored = state.store.save(&photo.file_name, &photo.data).await?;
    diagnostics::log_saved(&stored);

    Ok(Json(UploadResponse {
        success: true,
        message: "Photo uploaded successfully".to_string(),
        filename: stored.filename,
        size: stored.size,
        received_at: Local::now().format(RECEIVED_AT_FORMAT).to_string(),
    }))
}

async fn next_field(
    multipart: Option<&mut Multipart>,
) -> Result<Option<Field<'_>>, MultipartError> {
    match multipart {
        Some(multipart) => multipart.next_field().await,
        None => Ok(None),
    }
}

/// Body of a rejected upload
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// Upload error type
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No photo file provided")]
    MissingFile,
    #[error("Empty filename")]
    EmptyFilename,
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Multipart rejected: {0}")]
    Rejected(MultipartRejection),
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match self {
            UploadError::MissingFile | UploadError::EmptyFilename => {
                tracing::warn!("Upload rejected: {}", self);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        success: false,
                        error: self.to_string(),
                    }),
                )
                    .into_response()
            }
            UploadError::Multipart(e) => {
                tracing::warn!("Malformed multipart body: {}", e);
                (e.status(), e.body_text()).into_response()
            }
            UploadError::Rejected(rejection) => {
                tracing::warn!("Multipart request rejected: {}", rejection);
                rejection.into_response()
            }
            UploadError::Storage(e) => {
                tracing::error!("Failed to store upload: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}
