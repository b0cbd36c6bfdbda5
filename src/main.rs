use crate::app_config::AppConfig;
use crate::seed_loader::load_seed_from;
use crate::store::Store;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

mod app_config;
mod domain;
mod extensions;
mod http;
mod seed_loader;
mod store;
mod validation;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    tracing_subscriber::fmt().with_max_level(config.core().log_level()).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    info!("✅  Loaded configuration");

    let store = Store::new().shared();
    match config.data().seed_file() {
        Some(seed_file) => {
            load_seed_from(seed_file, &store).await?;
            info!("✅  Seeded store");
        }
        None => info!("✅  Initialized empty store"),
    }

    let listener = TcpListener::bind((config.server().host(), config.server().port())).await?;
    let address = listener.local_addr()?;
    let app = http::router(store, &config);

    info!("🔥 {} is up and running on http://{}", env!("CARGO_PKG_NAME"), address);
    http::serve(listener, app, shutdown_signal()).await?;

    info!("👋 {} stopped", env!("CARGO_PKG_NAME"));
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("⚠️ Could not listen for the shutdown signal: {}", e);
    }
}
