use std::sync::Arc;

use crate::app::PlatformServices;
use crate::application::services::acquisition_service::AcquisitionService;
use crate::application::services::catalog_service::CatalogService;
use crate::application::services::device_action_service::DeviceActionService;
use crate::application::services::favorites_service::FavoritesService;
use crate::application::services::transfer_service::TransferService;
use crate::domain::errors::DomainError;
use crate::domain::repositories::device_gateway::{BundledAssets, DeviceGateway};
use crate::domain::repositories::favorites_repository::FavoritesRepository;
use crate::domain::repositories::key_value_store::KeyValueStore;
use crate::domain::repositories::wallpaper_repository::WallpaperRepository;
use crate::infrastructure::assets::EmbeddedWallpaperAssets;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::default_catalog::default_wallpapers;
use crate::infrastructure::http_client::build_download_client;
use crate::infrastructure::persistence::file_key_value_store::FileKeyValueStore;
use crate::infrastructure::persistence::file_system::DataDirectory;
use crate::infrastructure::platform::file_system_device_gateway::FileSystemDeviceGateway;
use crate::infrastructure::repositories::store_favorites_repository::StoreFavoritesRepository;
use crate::infrastructure::repositories::store_wallpaper_repository::StoreWallpaperRepository;

pub(super) struct AppServices {
    pub catalog_service: Arc<CatalogService>,
    pub favorites_service: Arc<FavoritesService>,
    pub transfer_service: Arc<TransferService>,
    pub acquisition_service: Arc<AcquisitionService>,
    pub device_action_service: Arc<DeviceActionService>,
}

struct AppRepositories {
    wallpaper_repository: Arc<dyn WallpaperRepository>,
    favorites_repository: Arc<dyn FavoritesRepository>,
}

pub(super) async fn initialize_data_directory(
    config: &AppConfig,
) -> Result<DataDirectory, DomainError> {
    let mut data_directory = DataDirectory::new(config.data_root.clone());
    if let Some(export_dir) = &config.export_dir {
        data_directory = data_directory.with_exports_dir(export_dir.clone());
    }

    data_directory.initialize().await?;
    Ok(data_directory)
}

pub(super) fn build_services(
    config: &AppConfig,
    data_directory: &DataDirectory,
    platform: PlatformServices,
) -> Result<AppServices, DomainError> {
    let repositories = build_repositories(data_directory);
    let assets: Arc<dyn BundledAssets> = Arc::new(EmbeddedWallpaperAssets);
    let device_gateway = match platform.device_gateway {
        Some(gateway) => gateway,
        None => build_file_system_device_gateway(data_directory)?,
    };

    let defaults = default_wallpapers(config.default_catalog, assets.as_ref());
    let catalog_service = Arc::new(CatalogService::new(
        repositories.wallpaper_repository,
        defaults,
    ));
    let favorites_service = Arc::new(FavoritesService::new(repositories.favorites_repository));
    let transfer_service = Arc::new(TransferService::new(
        catalog_service.clone(),
        platform.share_target,
        platform.document_picker,
        data_directory.exports().to_path_buf(),
    ));
    let acquisition_service = Arc::new(AcquisitionService::new(
        catalog_service.clone(),
        device_gateway.clone(),
        platform.image_picker,
    ));
    let device_action_service = Arc::new(DeviceActionService::new(
        device_gateway,
        assets,
        data_directory.cache().to_path_buf(),
    ));

    Ok(AppServices {
        catalog_service,
        favorites_service,
        transfer_service,
        acquisition_service,
        device_action_service,
    })
}

fn build_repositories(data_directory: &DataDirectory) -> AppRepositories {
    let store: Arc<dyn KeyValueStore> =
        Arc::new(FileKeyValueStore::new(data_directory.store().to_path_buf()));

    AppRepositories {
        wallpaper_repository: Arc::new(StoreWallpaperRepository::new(store.clone())),
        favorites_repository: Arc::new(StoreFavoritesRepository::new(store)),
    }
}

fn build_file_system_device_gateway(
    data_directory: &DataDirectory,
) -> Result<Arc<dyn DeviceGateway>, DomainError> {
    let client = build_download_client(reqwest::Client::builder())?;

    Ok(Arc::new(FileSystemDeviceGateway::new(
        client,
        data_directory.cache().to_path_buf(),
        data_directory.gallery().to_path_buf(),
    )))
}
