//! photo-sink - development backend for photo uploads
//!
//! CLI entry point

use anyhow::Context;
use clap::Parser;
use photo_sink::{exit_codes, logging, Cli, WebServer};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    std::process::exit(match run_serve(&cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

fn run_serve(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.server_config();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.workers)
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let upload_dir = config.upload_dir.clone();
    let server = WebServer::with_config(config).with_context(|| {
        format!(
            "failed to prepare upload directory {}",
            upload_dir.display()
        )
    })?;

    rt.block_on(server.run())
        .map_err(|e| anyhow::anyhow!(e))
        .context("server stopped")
}
