use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::wallpaper::WallpaperRecord;
use crate::domain::repositories::key_value_store::KeyValueStore;
use crate::domain::repositories::wallpaper_repository::WallpaperRepository;
use crate::infrastructure::logging::logger;

pub const WALLPAPERS_STORAGE_KEY: &str = "@wallpaper_app/wallpapers";

/// Wallpaper catalog stored as one JSON array under a fixed key
pub struct StoreWallpaperRepository {
    store: Arc<dyn KeyValueStore>,
}

impl StoreWallpaperRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WallpaperRepository for StoreWallpaperRepository {
    async fn load_wallpapers(&self) -> Result<Option<Vec<WallpaperRecord>>, DomainError> {
        let Some(raw) = self.store.get_item(WALLPAPERS_STORAGE_KEY).await? else {
            return Ok(None);
        };

        let wallpapers = serde_json::from_str::<Vec<WallpaperRecord>>(&raw).map_err(|error| {
            logger::error(&format!("Stored wallpaper catalog is not readable: {}", error));
            DomainError::InvalidData(format!("Invalid stored wallpaper catalog: {}", error))
        })?;

        Ok(Some(wallpapers))
    }

    async fn save_wallpapers(&self, wallpapers: &[WallpaperRecord]) -> Result<(), DomainError> {
        let json = serde_json::to_string(wallpapers).map_err(|error| {
            DomainError::Persistence(format!("Failed to serialize wallpaper catalog: {}", error))
        })?;

        self.store.set_item(WALLPAPERS_STORAGE_KEY, &json).await
    }
}
