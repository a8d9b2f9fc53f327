// This is the primary entry point for the optipix service.
// The lib.rs file serves only as a public API for external consumers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use optipix::core::AppState;
use optipix::gallery::ImageStore;
use optipix::handlers;

/// A small web service for resizing and re-encoding images.
#[derive(Debug, Parser)]
#[command(name = "optipix", version, about)]
struct Cli {
    /// Socket address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// Directory holding the persisted image list
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(true)
        .compact()
        .init();

    info!("=== optipix starting ===");

    let store = Arc::new(
        ImageStore::open(&cli.data_dir)
            .with_context(|| format!("failed to open image store in {}", cli.data_dir.display()))?,
    );
    info!("image store rehydrated ({} images)", store.snapshot().len());

    let app = handlers::router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    info!("listening on {}", cli.listen);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
