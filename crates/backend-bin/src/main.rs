// ============================
// crates/backend-bin/src/main.rs
// ============================
//! Tokio / Axum entry-point for the Chirpy server.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chirpy_backend_lib::{
    config::{Settings, DEFAULT_CONFIG_FILE},
    create_router,
    storage::MemoryStorage,
    AppState,
};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Chirpy message board server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the bind address from the configuration
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // .env is optional
    dotenvy::dotenv().ok();

    let mut settings = Settings::load_from(&args.config)
        .with_context(|| format!("failed to load settings from {}", args.config.display()))?;
    if let Some(bind) = args.bind {
        settings.bind_addr = bind;
    }

    init_tracing(&settings);

    let addr = settings.bind_addr;
    let state = Arc::new(AppState::new(Arc::new(MemoryStorage::new()), settings)?);
    let app = create_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(settings: &Settings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if settings.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
