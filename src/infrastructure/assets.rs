use std::borrow::Cow;

use crate::domain::errors::DomainError;
use crate::domain::models::wallpaper::{WallpaperRecord, display_name_from_filename};
use crate::domain::repositories::device_gateway::BundledAssets;
use crate::infrastructure::logging::logger;

mod embedded_wallpapers {
    include!(concat!(env!("OUT_DIR"), "/embedded_wallpapers.rs"));
}

/// Wallpapers compiled in from `assets/wallpapers/<Category>/<file>`
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedWallpaperAssets;

impl BundledAssets for EmbeddedWallpaperAssets {
    fn keys(&self) -> Vec<String> {
        embedded_wallpapers::WALLPAPER_KEYS
            .iter()
            .map(|key| key.to_string())
            .collect()
    }

    fn read(&self, key: &str) -> Option<Cow<'static, [u8]>> {
        let normalized = normalize_asset_key(key).ok()?;
        embedded_wallpapers::get_embedded_wallpaper(&normalized).map(Cow::Borrowed)
    }
}

/// Normalize an asset key to `<Category>/<file>` with forward slashes
pub fn normalize_asset_key(key: &str) -> Result<String, DomainError> {
    let normalized = key.trim().replace('\\', "/");
    let normalized = normalized.trim_start_matches("./").trim_matches('/');

    let segments = normalized.split('/').collect::<Vec<_>>();
    let valid = segments.len() == 2
        && segments
            .iter()
            .all(|segment| !segment.is_empty() && *segment != "." && *segment != "..");

    if !valid {
        return Err(DomainError::AssetResolution(format!(
            "Invalid bundled asset key: {}",
            key
        )));
    }

    Ok(segments.join("/"))
}

/// Turn bundled asset keys into local wallpaper records, one per image,
/// in key order. Keys that are not `<Category>/<file>` are skipped.
pub fn records_from_asset_keys<I, S>(keys: I) -> Vec<WallpaperRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .filter_map(|key| {
            let key = key.as_ref();
            let normalized = match normalize_asset_key(key) {
                Ok(normalized) => normalized,
                Err(error) => {
                    logger::warn(&format!("Skipping bundled wallpaper: {}", error));
                    return None;
                }
            };

            let (category, filename) = normalized.split_once('/')?;
            let name = display_name_from_filename(filename);
            if name.is_empty() {
                return None;
            }

            Some(WallpaperRecord::bundled(
                asset_record_id(category, filename),
                name,
                category,
                normalized.clone(),
            ))
        })
        .collect()
}

/// `Anime/Sakura Night.jpg` becomes `anime_sakura_night`
fn asset_record_id(category: &str, filename: &str) -> String {
    let stem = match filename.rfind('.') {
        Some(index) if index > 0 => &filename[..index],
        _ => filename,
    };

    format!("{}_{}", category, stem)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
