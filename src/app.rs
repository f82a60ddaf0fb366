use std::sync::Arc;

use crate::application::services::acquisition_service::AcquisitionService;
use crate::application::services::catalog_service::CatalogService;
use crate::application::services::device_action_service::DeviceActionService;
use crate::application::services::favorites_service::FavoritesService;
use crate::application::services::transfer_service::TransferService;
use crate::domain::errors::DomainError;
use crate::domain::repositories::device_gateway::DeviceGateway;
use crate::domain::repositories::picker_gateway::{DocumentPicker, ImagePicker};
use crate::domain::repositories::share_target::ShareTarget;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::file_system::DataDirectory;

mod bootstrap;

/// Platform collaborators supplied by the host application
pub struct PlatformServices {
    /// Falls back to the file-system gateway rooted in the data directory
    pub device_gateway: Option<Arc<dyn DeviceGateway>>,
    pub image_picker: Arc<dyn ImagePicker>,
    pub document_picker: Arc<dyn DocumentPicker>,
    pub share_target: Arc<dyn ShareTarget>,
}

pub struct AppState {
    pub config: AppConfig,
    pub data_directory: DataDirectory,
    pub catalog_service: Arc<CatalogService>,
    pub favorites_service: Arc<FavoritesService>,
    pub transfer_service: Arc<TransferService>,
    pub acquisition_service: Arc<AcquisitionService>,
    pub device_action_service: Arc<DeviceActionService>,
}

impl AppState {
    /// Wire every service and load the catalog. The catalog falls back to
    /// the defaults when the store is empty or unreadable.
    pub async fn new(config: AppConfig, platform: PlatformServices) -> Result<Self, DomainError> {
        tracing::info!("Initializing application with data root: {:?}", config.data_root);

        let data_directory = bootstrap::initialize_data_directory(&config).await?;
        let services = bootstrap::build_services(&config, &data_directory, platform)?;

        let wallpapers = services.catalog_service.initialize().await;
        tracing::info!(
            "Application initialized successfully with {} wallpapers",
            wallpapers.len()
        );

        Ok(Self {
            config,
            data_directory,
            catalog_service: services.catalog_service,
            favorites_service: services.favorites_service,
            transfer_service: services.transfer_service,
            acquisition_service: services.acquisition_service,
            device_action_service: services.device_action_service,
        })
    }
}
