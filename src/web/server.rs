//! Web server implementation
//!
//! Provides the main server struct and configuration.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::routes::{routes, AppState};
use super::storage::{PhotoStore, StoreError};
use super::{DEFAULT_BIND, DEFAULT_PORT, DEFAULT_UPLOAD_LIMIT, UPLOAD_DIR_NAME};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Address to bind to
    pub bind: String,
    /// Number of worker threads
    pub workers: usize,
    /// Maximum upload size in bytes
    pub upload_limit: usize,
    /// Directory uploads are written to
    pub upload_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            workers: num_cpus::get(),
            upload_limit: DEFAULT_UPLOAD_LIMIT,
            upload_dir: default_upload_dir(),
        }
    }
}

impl ServerConfig {
    /// Create a new server config with the given port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Create a new server config with the given bind address
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// Create a new server config with the given upload limit
    pub fn with_upload_limit(mut self, limit: usize) -> Self {
        self.upload_limit = limit;
        self
    }

    /// Create a new server config with the given upload directory
    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = dir.into();
        self
    }

    /// Create a new server config with the given worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.bind, self.port).parse()
    }
}

/// `backend_uploads` beside the running executable, or in the working
/// directory when the executable path is unknown
pub fn default_upload_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(UPLOAD_DIR_NAME)))
        .unwrap_or_else(|| PathBuf::from(UPLOAD_DIR_NAME))
}

/// Web server instance
pub struct WebServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a web server, creating the upload directory if needed
    pub fn with_config(config: ServerConfig) -> Result<Self, StoreError> {
        let store = PhotoStore::open(&config.upload_dir)?;
        let state = AppState::new(store).with_port(config.port);

        Ok(Self {
            config,
            state: Arc::new(state),
        })
    }

    /// Get the server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the photo store
    pub fn store(&self) -> &PhotoStore {
        &self.state.store
    }

    /// Build the router
    pub fn router(&self) -> Router {
        routes()
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(self.config.upload_limit))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    fn print_banner(&self, addr: SocketAddr) {
        let rule = "=".repeat(60);
        println!();
        println!("{}", rule);
        println!("Starting photo-sink v{}", self.state.version);
        println!("{}", rule);
        println!("Upload folder: {}", self.store().root().display());
        println!("Server will run on: http://{}", addr);
        println!();
        println!("To use with the Android app:");
        println!("  1. Find your computer's IP address");
        println!(
            "  2. In app Settings, set endpoint to: http://YOUR_IP:{}/upload",
            addr.port()
        );
        println!("  3. Take photos and they'll be saved locally!");
        println!();
        println!("Endpoints:");
        println!("  POST /upload  - Upload a photo (multipart field \"photo\")");
        println!("  GET  /health  - Health check");
        println!("  GET  /        - Status page");
        println!();
        println!("Press Ctrl+C to stop the server");
        println!("{}", rule);
        println!();
    }

    /// Run the server until the process is interrupted
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.socket_addr()?;
        let router = self.router();

        self.print_banner(addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, router).await?;

        Ok(())
    }
}
