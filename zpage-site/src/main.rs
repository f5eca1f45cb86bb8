//! zpage-site - project information page
//!
//! `serve` renders the page on every request from the configured record
//! provider (normally the catalog). `build` renders it once and writes a
//! static file (normally from a generated record file).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};
use zpage_common::config::{load_site_config, SiteConfig};
use zpage_common::{open_provider, PageRenderer};
use zpage_site::logging::init_tracing;
use zpage_site::publish::publish_page;
use zpage_site::{build_router, AppState};

/// Command-line arguments for zpage-site
#[derive(Parser, Debug)]
#[command(name = "zpage-site")]
#[command(about = "Project information page renderer")]
#[command(version)]
struct Args {
    /// Config file (overrides ZPAGE_CONFIG and the default locations)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the page, rendering it on every request
    Serve {
        /// Listen address (overrides bind_addr)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Render the page once and write it to a file
    Build {
        /// Output path (overrides output_path)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_handle = init_tracing();

    info!(
        "Starting zpage-site v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = load_site_config(args.config.as_deref()).context("Failed to load configuration")?;
    log_handle.apply_configured_level(&config.log_level)?;

    match args.command {
        Command::Serve { bind } => serve(config, bind).await,
        Command::Build { output } => build(config, output).await,
    }
}

async fn serve(config: SiteConfig, bind: Option<String>) -> Result<()> {
    let source = config.provider_source()?;
    let provider = open_provider(&source).await?;
    let renderer = PageRenderer::new(config.load_template()?);

    let state = AppState::new(provider, renderer, config.project_id);
    let app = build_router(state);

    let addr = bind.unwrap_or(config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("zpage-site listening on http://{}", addr);
    info!("Serving project {}", config.project_id);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn build(config: SiteConfig, output: Option<PathBuf>) -> Result<()> {
    let source = config.provider_source()?;
    let provider = open_provider(&source).await?;
    let renderer = PageRenderer::new(config.load_template()?);

    let output = output.unwrap_or(config.output_path);
    let written = publish_page(provider.as_ref(), &renderer, config.project_id, &output)
        .await
        .map_err(|e| {
            if e.is_render_failure() {
                error!("Render failed for project {}; no page written", config.project_id);
            }
            e
        })
        .with_context(|| format!("Failed to publish {}", output.display()))?;

    info!("Published project {} to {}", config.project_id, written.display());
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
