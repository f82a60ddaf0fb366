use std::sync::Arc;

use crate::application::services::catalog_service::CatalogService;
use crate::domain::errors::DomainError;
use crate::domain::models::wallpaper::WallpaperRecord;
use crate::domain::repositories::favorites_repository::FavoritesRepository;
use crate::infrastructure::logging::logger;

/// Service for the favorited wallpaper ids.
///
/// Nothing is cached: every call re-reads the store. Toggles are plain
/// read-modify-write, so two toggles racing on the same id can lose one.
pub struct FavoritesService {
    repository: Arc<dyn FavoritesRepository>,
}

impl FavoritesService {
    pub fn new(repository: Arc<dyn FavoritesRepository>) -> Self {
        Self { repository }
    }

    /// Whether `id` is a favorite. Read failures count as "not a favorite".
    pub async fn is_favorite(&self, id: &str) -> bool {
        match self.repository.load_favorites().await {
            Ok(favorites) => favorites.contains(id),
            Err(error) => {
                logger::error(&format!("Error checking favorite status: {}", error));
                false
            }
        }
    }

    /// Flip the favorite status of `id` and return the new status
    pub async fn toggle_favorite(&self, id: &str) -> Result<bool, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::InvalidData(
                "Wallpaper id cannot be empty".to_string(),
            ));
        }

        let mut favorites = self.repository.load_favorites().await?;
        let is_favorite = favorites.toggle(id);
        self.repository.save_favorites(&favorites).await?;

        if is_favorite {
            logger::info(&format!("Added wallpaper {} to favorites", id));
        } else {
            logger::info(&format!("Removed wallpaper {} from favorites", id));
        }

        Ok(is_favorite)
    }

    /// Favorited ids in the order they were added
    pub async fn favorite_ids(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.repository.load_favorites().await?.ids().to_vec())
    }

    /// Favorited wallpapers that still exist in `catalog`, in favorite order
    pub async fn favorite_wallpapers(
        &self,
        catalog: &CatalogService,
    ) -> Result<Vec<WallpaperRecord>, DomainError> {
        let ids = self.favorite_ids().await?;
        Ok(ids.iter().filter_map(|id| catalog.get_by_id(id)).collect())
    }
}
