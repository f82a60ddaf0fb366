use std::path::Path;
use std::sync::Arc;

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

use app::{AppState, PlatformServices};
use domain::errors::DomainError;
use infrastructure::config::AppConfig;
use infrastructure::logging::logger;

/// Load the configuration at `config_path`, start logging and build the
/// shared application state.
pub async fn start(
    config_path: &Path,
    platform: PlatformServices,
) -> Result<Arc<AppState>, DomainError> {
    let config = AppConfig::load(config_path).await?;

    if let Err(error) = logger::init_logger(&config.log_dir) {
        eprintln!("Failed to initialize logger: {}", error);
    }

    tracing::info!("Starting wallpaper catalog");

    let state = AppState::new(config, platform).await.map_err(|error| {
        tracing::error!("Failed to initialize application state: {}", error);
        error
    })?;

    Ok(Arc::new(state))
}
