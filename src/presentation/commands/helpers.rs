use std::fmt::Display;

use crate::app::AppState;
use crate::domain::models::wallpaper::WallpaperRecord;
use crate::infrastructure::logging::logger;
use crate::presentation::errors::CommandError;

pub fn log_command(command: impl AsRef<str>) {
    logger::debug(&format!("Command: {}", command.as_ref()));
}

pub fn map_command_error<E>(context: impl AsRef<str>) -> impl FnOnce(E) -> CommandError
where
    E: Display + Into<CommandError>,
{
    let context = context.as_ref().to_string();

    move |error| {
        logger::error(&format!("{}: {}", context, error));
        error.into()
    }
}

/// Look up a catalog wallpaper a command refers to by id
pub fn find_wallpaper(app_state: &AppState, id: &str) -> Result<WallpaperRecord, CommandError> {
    app_state.catalog_service.get_by_id(id).ok_or_else(|| {
        logger::warn(&format!("Wallpaper not found: {}", id));
        CommandError::NotFound(format!("Wallpaper not found: {}", id))
    })
}
