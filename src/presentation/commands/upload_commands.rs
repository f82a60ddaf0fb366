use crate::app::AppState;
use crate::application::dto::wallpaper_dto::{BatchUploadDto, UploadWallpaperDto};
use crate::domain::models::wallpaper::WallpaperRecord;
use crate::presentation::commands::helpers::{log_command, map_command_error};
use crate::presentation::errors::CommandError;

/// Pick one image into a category. `None` when the user cancelled.
pub async fn upload_wallpaper(
    app_state: &AppState,
    dto: UploadWallpaperDto,
) -> Result<Option<WallpaperRecord>, CommandError> {
    log_command(format!("upload_wallpaper {}", dto.category));

    app_state
        .acquisition_service
        .upload_single(dto.name.as_deref(), &dto.category)
        .await
        .map_err(map_command_error("Failed to upload wallpaper"))
}

pub async fn upload_wallpapers_batch(
    app_state: &AppState,
    dto: BatchUploadDto,
) -> Result<Vec<WallpaperRecord>, CommandError> {
    log_command(format!("upload_wallpapers_batch {}", dto.category));

    app_state
        .acquisition_service
        .upload_batch(&dto.category)
        .await
        .map_err(map_command_error("Failed to upload wallpapers"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app::test_support::{StubPicker, app_state, unique_temp_root};
    use crate::domain::models::picker::PickedAsset;

    #[tokio::test]
    async fn uploads_land_in_the_requested_category() {
        let root = unique_temp_root();
        let picker = Arc::new(StubPicker::default());
        let state = app_state(&root, picker.clone()).await;

        let cancelled = upload_wallpaper(
            &state,
            UploadWallpaperDto {
                name: None,
                category: "Pets".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(cancelled, None);

        *picker.images.lock().unwrap() = Some(vec![
            PickedAsset::new("file:///DCIM/cat_nap.jpg", None),
            PickedAsset::new("file:///DCIM/dog_run.jpg", None),
        ]);
        let records = upload_wallpapers_batch(
            &state,
            BatchUploadDto {
                category: "Pets".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(state.catalog_service.get_by_category("Pets"), records);

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
