use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::wallpaper::WallpaperRecord;

/// Repository interface for the persisted wallpaper catalog
#[async_trait]
pub trait WallpaperRepository: Send + Sync {
    /// Load the saved catalog, `None` if no catalog was saved yet
    async fn load_wallpapers(&self) -> Result<Option<Vec<WallpaperRecord>>, DomainError>;

    /// Overwrite the saved catalog with `wallpapers`
    async fn save_wallpapers(&self, wallpapers: &[WallpaperRecord]) -> Result<(), DomainError>;
}
