use std::path::Path;

use crate::app::AppState;
use crate::application::services::transfer_service::ImportSummary;
use crate::presentation::commands::helpers::{log_command, map_command_error};
use crate::presentation::errors::CommandError;

/// Import through the document picker. `None` when the user cancelled.
pub async fn import_wallpapers(app_state: &AppState) -> Result<Option<ImportSummary>, CommandError> {
    log_command("import_wallpapers");

    app_state
        .transfer_service
        .import_from_picker()
        .await
        .map_err(map_command_error("Failed to import wallpapers"))
}

pub async fn import_wallpapers_from_file(
    app_state: &AppState,
    path: &Path,
) -> Result<ImportSummary, CommandError> {
    log_command(format!("import_wallpapers_from_file {:?}", path));

    app_state
        .transfer_service
        .import_from_file(path)
        .await
        .map_err(map_command_error("Failed to import wallpapers"))
}

/// Export the catalog and share it. Returns the path of the export file.
pub async fn export_wallpapers(app_state: &AppState) -> Result<String, CommandError> {
    log_command("export_wallpapers");

    app_state
        .transfer_service
        .export_to_share()
        .await
        .map(|path| path.to_string_lossy().to_string())
        .map_err(map_command_error("Failed to export wallpapers"))
}
