use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::favorites::FavoritesSet;
use crate::domain::repositories::favorites_repository::FavoritesRepository;
use crate::domain::repositories::key_value_store::KeyValueStore;

pub const FAVORITES_STORAGE_KEY: &str = "favorites";

/// Favorites stored as a JSON array of ids under a fixed key
pub struct StoreFavoritesRepository {
    store: Arc<dyn KeyValueStore>,
}

impl StoreFavoritesRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FavoritesRepository for StoreFavoritesRepository {
    async fn load_favorites(&self) -> Result<FavoritesSet, DomainError> {
        match self.store.get_item(FAVORITES_STORAGE_KEY).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|error| {
                DomainError::InvalidData(format!("Invalid stored favorites: {}", error))
            }),
            None => Ok(FavoritesSet::new()),
        }
    }

    async fn save_favorites(&self, favorites: &FavoritesSet) -> Result<(), DomainError> {
        let json = serde_json::to_string(favorites).map_err(|error| {
            DomainError::Persistence(format!("Failed to serialize favorites: {}", error))
        })?;

        self.store.set_item(FAVORITES_STORAGE_KEY, &json).await
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rand::random;

    use super::*;
    use crate::infrastructure::persistence::file_key_value_store::FileKeyValueStore;

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("wallpaper-catalog-favorites-{}", random::<u64>()))
    }

    #[tokio::test]
    async fn favorites_survive_a_new_repository_instance() {
        let root = unique_temp_root();
        let repository =
            StoreFavoritesRepository::new(Arc::new(FileKeyValueStore::new(root.clone())));
        assert!(repository.load_favorites().await.unwrap().is_empty());

        let mut favorites = FavoritesSet::new();
        favorites.toggle("3");
        favorites.toggle("11");
        repository.save_favorites(&favorites).await.unwrap();

        let reopened = StoreFavoritesRepository::new(Arc::new(FileKeyValueStore::new(root.clone())));
        assert_eq!(reopened.load_favorites().await.unwrap(), favorites);

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
