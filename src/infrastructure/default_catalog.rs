use serde::{Deserialize, Serialize};

use crate::domain::models::wallpaper::WallpaperRecord;
use crate::domain::repositories::device_gateway::BundledAssets;
use crate::infrastructure::assets::records_from_asset_keys;
use crate::infrastructure::logging::logger;

/// Where the catalog comes from before anything was saved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultCatalogSource {
    /// Hard-coded list of remote wallpapers
    #[default]
    Remote,
    /// One local wallpaper per bundled image
    Bundled,
}

const PEXELS_PHOTOS: &str = "https://images.pexels.com/photos";
const THUMBNAIL_QUERY: &str = "?auto=compress&cs=tinysrgb&w=400";

// (id, name, category, photo id, extension)
const REMOTE_DEFAULTS: &[(&str, &str, &str, &str, &str)] = &[
    ("1", "Demon Slayer", "Anime", "7809123", "jpeg"),
    ("2", "One Piece", "Anime", "5490778", "jpeg"),
    ("3", "Anime Girl", "Aesthetic", "5011647", "jpeg"),
    ("4", "Night Cityscape", "Aesthetic", "1252890", "jpeg"),
    ("5", "Studio Ghibli", "Anime", "1714208", "jpeg"),
    ("6", "Neo Tokyo", "Cyberpunk", "2129796", "png"),
    ("7", "Sakura Season", "Anime", "1287075", "jpeg"),
    ("8", "Neon Anime", "Cyberpunk", "924824", "jpeg"),
    ("9", "Anime Beach", "Summer", "1032650", "jpeg"),
    ("10", "Fantasy Aurora", "Fantasy", "1693095", "jpeg"),
    ("11", "Attack on Titan", "Anime", "3493777", "jpeg"),
    ("12", "Naruto", "Anime", "6507483", "jpeg"),
];

/// The hard-coded remote catalog
pub fn remote_default_wallpapers() -> Vec<WallpaperRecord> {
    REMOTE_DEFAULTS
        .iter()
        .map(|(id, name, category, photo, extension)| {
            let image_url = format!(
                "{}/{}/pexels-photo-{}.{}",
                PEXELS_PHOTOS, photo, photo, extension
            );
            let thumbnail_url = format!("{}{}", image_url, THUMBNAIL_QUERY);
            WallpaperRecord::remote(*id, *name, *category, image_url, thumbnail_url)
        })
        .collect()
}

/// Build the default catalog for `source`. A bundled build without any
/// bundled images falls back to the remote list.
pub fn default_wallpapers(
    source: DefaultCatalogSource,
    assets: &dyn BundledAssets,
) -> Vec<WallpaperRecord> {
    match source {
        DefaultCatalogSource::Remote => remote_default_wallpapers(),
        DefaultCatalogSource::Bundled => {
            let records = records_from_asset_keys(assets.keys());
            if records.is_empty() {
                logger::warn("No bundled wallpapers found, using the remote default catalog");
                return remote_default_wallpapers();
            }

            logger::debug(&format!("Derived {} bundled wallpapers", records.len()));
            records
        }
    }
}
