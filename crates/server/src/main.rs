//! Shutter server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use shutter_core::config::AppConfig;
use shutter_server::{AppState, create_router};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Shutter - a minimal self-hosted image host
#[derive(Parser, Debug)]
#[command(name = "shutterd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "SHUTTER_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Shutter v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration. The file is optional; every setting has a default
    // and can be overridden via SHUTTER_ environment variables.
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("SHUTTER_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    if config.auth.is_default_password() {
        tracing::warn!(
            "Admin password is the shipped default; set SHUTTER_AUTH__PASSWORD before exposing this server"
        );
    }

    // Open the stores and verify the storage directory is usable before
    // accepting requests.
    let (records, blobs) = shutter_store::open(&config.storage)
        .await
        .context("failed to open image store")?;
    blobs
        .health_check()
        .await
        .context("storage health check failed")?;
    tracing::info!(path = %config.storage.path.display(), "Image store ready");

    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;
    let state = AppState::new(config, records, blobs);
    let app = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
