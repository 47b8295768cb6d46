//! Command-line interface
//!
//! Every flag is optional; with no arguments the server runs on
//! `0.0.0.0:5000` and stores uploads in `backend_uploads` beside the binary.

use clap::Parser;
use std::path::PathBuf;

use crate::web::{ServerConfig, DEFAULT_BIND, DEFAULT_PORT, DEFAULT_UPLOAD_LIMIT};

/// Development backend that receives photo uploads and saves them to disk
#[derive(Debug, Parser)]
#[command(name = "photo-sink", version, about)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Directory uploads are written to [default: backend_uploads beside the executable]
    #[arg(short = 'd', long)]
    pub upload_dir: Option<PathBuf>,

    /// Maximum request body size in bytes
    #[arg(long, default_value_t = DEFAULT_UPLOAD_LIMIT)]
    pub upload_limit: usize,

    /// Number of worker threads [default: number of CPUs]
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the server configuration from the parsed arguments
    pub fn server_config(&self) -> ServerConfig {
        let mut config = ServerConfig::default()
            .with_port(self.port)
            .with_bind(self.bind.clone())
            .with_upload_limit(self.upload_limit);

        if let Some(dir) = &self.upload_dir {
            config = config.with_upload_dir(dir);
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }

        config
    }
}
