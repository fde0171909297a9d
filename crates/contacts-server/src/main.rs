//! Contacts API server
//!
//! Opens the contact store and serves the JSON API until Ctrl-C.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use contacts_core::{Config, Store};

#[derive(Parser)]
#[command(name = "contacts-server")]
#[command(about = "Contacts - JSON API server")]
#[command(version)]
struct Args {
    /// Path to config file (overrides CONTACTS_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides bind_addr)
    #[arg(long)]
    bind: Option<String>,

    /// Data directory (overrides data_dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let mut config =
        Config::load_with_cli_override(args.config.as_ref()).context("Failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let store = Store::open(&config).context("Failed to open contact store")?;
    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    contacts_server::serve(listener, contacts_server::router(store), shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Log to stderr, filtered by CONTACTS_LOG (default: info)
fn init_logging() {
    let env_filter =
        EnvFilter::try_from_env("CONTACTS_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
