use crate::app::AppState;
use crate::domain::models::wallpaper::WallpaperRecord;
use crate::presentation::commands::helpers::{log_command, map_command_error};
use crate::presentation::errors::CommandError;

pub async fn is_favorite(app_state: &AppState, id: &str) -> bool {
    log_command(format!("is_favorite {}", id));
    app_state.favorites_service.is_favorite(id).await
}

/// Returns the new favorite status
pub async fn toggle_favorite(app_state: &AppState, id: &str) -> Result<bool, CommandError> {
    log_command(format!("toggle_favorite {}", id));

    app_state
        .favorites_service
        .toggle_favorite(id)
        .await
        .map_err(map_command_error(format!("Failed to toggle favorite {}", id)))
}

pub async fn get_favorite_wallpapers(
    app_state: &AppState,
) -> Result<Vec<WallpaperRecord>, CommandError> {
    log_command("get_favorite_wallpapers");

    app_state
        .favorites_service
        .favorite_wallpapers(&app_state.catalog_service)
        .await
        .map_err(map_command_error("Failed to load favorites"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app::test_support::{StubPicker, app_state, unique_temp_root};

    #[tokio::test]
    async fn toggled_favorites_are_listed() {
        let root = unique_temp_root();
        let state = app_state(&root, Arc::new(StubPicker::default())).await;

        assert!(toggle_favorite(&state, "3").await.unwrap());
        assert!(toggle_favorite(&state, "missing").await.unwrap());
        assert!(is_favorite(&state, "3").await);

        let favorites = get_favorite_wallpapers(&state).await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, "3");

        let empty = toggle_favorite(&state, "").await;
        assert!(matches!(empty, Err(CommandError::BadRequest(_))));

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
