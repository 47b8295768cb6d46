//! photo-sink - development backend for photo uploads
//!
//! A small HTTP server standing in for the real photo backend while the
//! glasses companion app is being developed. Uploads arrive as multipart
//! forms, are written to a local directory under a timestamped name and are
//! acknowledged with JSON.
//!
//! # Example
//!
//! ```no_run
//! use photo_sink::{ServerConfig, WebServer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = ServerConfig::default().with_upload_dir("/tmp/uploads");
//! let server = WebServer::with_config(config)?;
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod logging;
pub mod web;

pub use cli::Cli;
pub use web::{
    AppState, ErrorResponse, HealthResponse, PhotoStore, ServerConfig, StoreError, StoredPhoto,
    UploadError, UploadResponse, WebServer,
};

/// Process exit codes
pub mod exit_codes {
    /// Clean exit
    pub const SUCCESS: i32 = 0;
    /// Any startup or runtime failure
    pub const GENERAL_ERROR: i32 = 1;
}
