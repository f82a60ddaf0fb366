use serde::{Deserialize, Serialize};

use crate::domain::models::device::WallpaperTarget;

/// DTO for uploading a single picked image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadWallpaperDto {
    /// Display name; derived from the picked file when absent
    #[serde(default)]
    pub name: Option<String>,

    /// Category the new wallpaper is added to
    pub category: String,
}

/// DTO for uploading several picked images into one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUploadDto {
    pub category: String,
}

/// DTO for applying a catalog wallpaper to the device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetWallpaperDto {
    pub wallpaper_id: String,

    #[serde(default)]
    pub target: WallpaperTarget,
}

/// DTO for saving a catalog wallpaper to the gallery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveWallpaperDto {
    pub wallpaper_id: String,
}
