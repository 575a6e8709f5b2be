//! Pokegen description backend.
//!
//! Serves the SPA shell and wraps a local causal-LM inference server to
//! produce structured Pokemon descriptions.
//!
//! Usage:
//!   pokegen-server --port 8000 --static-path app

use anyhow::{Context, Result};
use clap::Parser;
use pokegen_server::{AppState, ChatGenerator, build_router};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "pokegen-server")]
#[command(about = "Pokemon description backend and static file server")]
struct Args {
    /// Host to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, default_value = "debug")]
    log_level: Level,

    /// Path to the static files directory
    #[arg(long, default_value = "app")]
    static_path: PathBuf,

    /// Base URL of the chat-completion inference server
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    generator_url: String,

    /// Model name passed to the inference server
    #[arg(long, default_value = "Qwen/Qwen3-1.7B")]
    generator_model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .compact()
        .init();

    let generator = Arc::new(ChatGenerator::new(&args.generator_url, &args.generator_model));
    let state = AppState::new(generator, args.static_path.clone());
    let app = build_router(state);

    let address = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("serving on http://{address}");
    info!("static files from {}", args.static_path.display());

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
