use crate::app::AppState;
use crate::domain::models::wallpaper::{CategorySummary, WallpaperRecord};
use crate::presentation::commands::helpers::{find_wallpaper, log_command, map_command_error};
use crate::presentation::errors::CommandError;

pub fn get_wallpapers(app_state: &AppState) -> Vec<WallpaperRecord> {
    log_command("get_wallpapers");
    app_state.catalog_service.get_all()
}

pub fn get_wallpaper(app_state: &AppState, id: &str) -> Result<WallpaperRecord, CommandError> {
    log_command(format!("get_wallpaper {}", id));
    find_wallpaper(app_state, id)
}

/// Exact, case-sensitive category match
pub fn get_wallpapers_by_category(app_state: &AppState, category: &str) -> Vec<WallpaperRecord> {
    log_command(format!("get_wallpapers_by_category {}", category));
    app_state.catalog_service.get_by_category(category)
}

pub fn search_wallpapers(app_state: &AppState, query: &str) -> Vec<WallpaperRecord> {
    log_command("search_wallpapers");
    app_state.catalog_service.search(query)
}

pub fn get_categories(app_state: &AppState) -> Vec<String> {
    log_command("get_categories");
    app_state.catalog_service.get_all_categories()
}

pub fn get_category_summaries(app_state: &AppState) -> Vec<CategorySummary> {
    log_command("get_category_summaries");
    app_state.catalog_service.category_summaries()
}

/// Replace the whole catalog
pub async fn save_wallpapers(
    app_state: &AppState,
    wallpapers: Vec<WallpaperRecord>,
) -> Result<(), CommandError> {
    log_command(format!("save_wallpapers ({} items)", wallpapers.len()));

    app_state
        .catalog_service
        .save(wallpapers)
        .await
        .map_err(map_command_error("Failed to save wallpapers"))
}
