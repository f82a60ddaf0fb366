use crate::app::AppState;
use crate::application::dto::wallpaper_dto::{SaveWallpaperDto, SetWallpaperDto};
use crate::domain::models::device::WallpaperApplyOutcome;
use crate::presentation::commands::helpers::{find_wallpaper, log_command, map_command_error};
use crate::presentation::errors::CommandError;

pub async fn save_wallpaper_to_gallery(
    app_state: &AppState,
    dto: SaveWallpaperDto,
) -> Result<(), CommandError> {
    log_command(format!("save_wallpaper_to_gallery {}", dto.wallpaper_id));

    let wallpaper = find_wallpaper(app_state, &dto.wallpaper_id)?;
    let service = &app_state.device_action_service;
    let image = service
        .image_ref_for(&wallpaper)
        .map_err(map_command_error("Failed to resolve wallpaper image"))?;

    service
        .save_to_gallery(&image)
        .await
        .map_err(map_command_error("Failed to save wallpaper to gallery"))
}

/// Best effort: anything but `Applied` may need the user to finish by hand
pub async fn set_wallpaper(
    app_state: &AppState,
    dto: SetWallpaperDto,
) -> Result<WallpaperApplyOutcome, CommandError> {
    log_command(format!("set_wallpaper {} ({})", dto.wallpaper_id, dto.target));

    let wallpaper = find_wallpaper(app_state, &dto.wallpaper_id)?;
    let service = &app_state.device_action_service;
    let image = service
        .image_ref_for(&wallpaper)
        .map_err(map_command_error("Failed to resolve wallpaper image"))?;

    service
        .set_as_wallpaper(&image, dto.target)
        .await
        .map_err(map_command_error("Failed to set wallpaper"))
}
