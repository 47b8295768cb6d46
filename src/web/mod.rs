//! Web server module for photo-sink
//!
//! Receives photo uploads from the glasses companion app and stores them in a
//! local directory.
//!
//! # Endpoints
//!
//! - `POST /upload` - multipart upload, file field `photo`
//! - `GET /health` - liveness check with the number of stored photos
//! - `GET /` - landing page with status and usage instructions
//!
//! # Usage
//!
//! ```bash
//! photo-sink --port 5000
//! ```

mod diagnostics;
mod page;
mod routes;
mod server;
mod storage;

pub use routes::{AppState, ErrorResponse, HealthResponse, UploadError, UploadResponse};
pub use server::{ServerConfig, WebServer};
pub use storage::{PhotoStore, StoreError, StoredPhoto};

/// Default server port
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind address
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Name of the upload directory created beside the executable
pub const UPLOAD_DIR_NAME: &str = "backend_uploads";

/// Default upload limit in bytes (100 MB)
pub const DEFAULT_UPLOAD_LIMIT: usize = 100 * 1024 * 1024;

/// Multipart field carrying the photo
pub const PHOTO_FIELD: &str = "photo";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_PORT, 5000);
        assert_eq!(DEFAULT_BIND, "0.0.0.0");
        assert_eq!(UPLOAD_DIR_NAME, "backend_uploads");
        assert_eq!(DEFAULT_UPLOAD_LIMIT, 100 * 1024 * 1024);
        assert_eq!(PHOTO_FIELD, "photo");
    }
}
