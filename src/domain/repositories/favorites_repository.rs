use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::favorites::FavoritesSet;

/// Repository interface for the favorited wallpaper ids
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Load the favorites, empty if none were saved yet
    async fn load_favorites(&self) -> Result<FavoritesSet, DomainError>;

    /// Overwrite the saved favorites
    async fn save_favorites(&self, favorites: &FavoritesSet) -> Result<(), DomainError>;
}
