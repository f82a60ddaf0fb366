use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;

use crate::domain::errors::DomainError;
use crate::domain::models::device::{
    DirectSetOutcome, ImageRef, PermissionKind, PermissionStatus, StrategyOutcome,
    WallpaperApplyOutcome, WallpaperStrategy, WallpaperTarget,
};
use crate::domain::models::wallpaper::WallpaperRecord;
use crate::domain::repositories::device_gateway::{BundledAssets, DeviceGateway};
use crate::infrastructure::assets::normalize_asset_key;
use crate::infrastructure::logging::logger;
use crate::infrastructure::persistence::file_system::sanitize_file_name;

const BUNDLED_CACHE_DIR: &str = "bundled";

/// Saves wallpapers to the gallery and applies them through the platform
pub struct DeviceActionService {
    device: Arc<dyn DeviceGateway>,
    assets: Arc<dyn BundledAssets>,
    cache_dir: PathBuf,
}

impl DeviceActionService {
    pub fn new(
        device: Arc<dyn DeviceGateway>,
        assets: Arc<dyn BundledAssets>,
        cache_dir: PathBuf,
    ) -> Self {
        Self {
            device,
            assets,
            cache_dir,
        }
    }

    /// Where the full-size image of `record` comes from
    pub fn image_ref_for(&self, record: &WallpaperRecord) -> Result<ImageRef, DomainError> {
        if record.is_local {
            return record
                .local_image
                .clone()
                .map(ImageRef::Bundled)
                .ok_or_else(|| {
                    DomainError::AssetResolution(format!(
                        "Wallpaper '{}' has no bundled image",
                        record.id
                    ))
                });
        }

        let url = if record.image_url.is_empty() {
            &record.thumbnail_url
        } else {
            &record.image_url
        };
        if url.is_empty() {
            return Err(DomainError::InvalidData(format!(
                "Wallpaper '{}' has no image URL",
                record.id
            )));
        }

        Ok(ImageRef::Remote(url.clone()))
    }

    /// Save the image to the platform media library
    pub async fn save_to_gallery(&self, image: &ImageRef) -> Result<(), DomainError> {
        self.ensure_permission(PermissionKind::MediaLibraryWrite)
            .await?;

        let local_path = self.resolve_local_file(image).await?;
        self.commit_to_gallery(&local_path).await
    }

    async fn commit_to_gallery(&self, local_path: &Path) -> Result<(), DomainError> {
        self.device.save_to_media_library(local_path).await?;

        logger::info(&format!("Saved image to gallery: {:?}", local_path));
        Ok(())
    }

    /// Apply the image as wallpaper using the first platform strategy that
    /// works.
    ///
    /// Media-write permission is required up front, since every path may end
    /// in the gallery. With no strategy available the image is saved to the
    /// gallery and `SavedToGallery` is returned. If every strategy fails the
    /// image is still saved, but the call fails with `ManualActionRequired`
    /// so the user can be told to finish by hand.
    pub async fn set_as_wallpaper(
        &self,
        image: &ImageRef,
        target: WallpaperTarget,
    ) -> Result<WallpaperApplyOutcome, DomainError> {
        logger::info(&format!("Setting wallpaper for {} screen", target));

        self.ensure_permission(PermissionKind::MediaLibraryWrite)
            .await?;

        let local_path = self.resolve_local_file(image).await?;
        let mut failures = Vec::new();

        for strategy in self.device.wallpaper_strategies() {
            let outcome = self.attempt_strategy(strategy, &local_path, target).await;
            logger::debug(&format!("Wallpaper strategy {:?}: {:?}", strategy, outcome));

            match outcome {
                StrategyOutcome::Succeeded => {
                    return Ok(match strategy {
                        WallpaperStrategy::DirectSet => WallpaperApplyOutcome::Applied,
                        WallpaperStrategy::System(_) => WallpaperApplyOutcome::HandedToSystem,
                    });
                }
                StrategyOutcome::Unsupported => {}
                StrategyOutcome::Failed(reason) => {
                    logger::warn(&format!("Wallpaper strategy {:?} failed: {}", strategy, reason));
                    failures.push(reason);
                }
            }
        }

        self.commit_to_gallery(&local_path).await.map_err(|error| {
            logger::error(&format!("Gallery fallback failed: {}", error));
            DomainError::DeviceAction(format!(
                "Could not set wallpaper or save it to the gallery: {}",
                error
            ))
        })?;

        if failures.is_empty() {
            logger::info("Wallpaper setting not supported on this platform; saved to gallery");
            Ok(WallpaperApplyOutcome::SavedToGallery)
        } else {
            Err(DomainError::ManualActionRequired(
                "Image saved to gallery. Please set it as wallpaper from your gallery app"
                    .to_string(),
            ))
        }
    }

    async fn attempt_strategy(
        &self,
        strategy: WallpaperStrategy,
        local_path: &Path,
        target: WallpaperTarget,
    ) -> StrategyOutcome {
        let result = match strategy {
            WallpaperStrategy::DirectSet => self
                .device
                .attempt_direct_wallpaper_set(local_path, target)
                .await
                .map(|outcome| match outcome {
                    DirectSetOutcome::Applied => StrategyOutcome::Succeeded,
                    DirectSetOutcome::Unsupported => StrategyOutcome::Unsupported,
                }),
            WallpaperStrategy::System(fallback) => self
                .device
                .launch_system_fallback(local_path, fallback)
                .await
                .map(|_| StrategyOutcome::Succeeded),
        };

        result.unwrap_or_else(|error| StrategyOutcome::Failed(error.to_string()))
    }

    async fn ensure_permission(&self, kind: PermissionKind) -> Result<(), DomainError> {
        match self.device.request_permission(kind).await? {
            PermissionStatus::Granted => Ok(()),
            PermissionStatus::Denied => {
                logger::warn(&format!("Permission {:?} denied", kind));
                Err(DomainError::PermissionDenied(
                    "Permission to save images to the gallery is required".to_string(),
                ))
            }
        }
    }

    /// Download remote images and copy bundled ones out of the binary
    async fn resolve_local_file(&self, image: &ImageRef) -> Result<PathBuf, DomainError> {
        match image {
            ImageRef::Remote(url) => self.device.download_to_local(url).await,
            ImageRef::Bundled(key) => self.materialize_bundled(key).await,
        }
    }

    async fn materialize_bundled(&self, key: &str) -> Result<PathBuf, DomainError> {
        let normalized = normalize_asset_key(key)?;
        let bytes = self.assets.read(&normalized).ok_or_else(|| {
            logger::error(&format!("Bundled wallpaper not found: {}", normalized));
            DomainError::AssetResolution(format!("Bundled wallpaper not found: {}", normalized))
        })?;

        let dir = self.cache_dir.join(BUNDLED_CACHE_DIR);
        let target = dir.join(sanitize_file_name(&normalized));

        let write = async {
            fs::create_dir_all(&dir).await?;
            fs::write(&target, bytes.as_ref()).await
        };
        write.await.map_err(|error| {
            logger::error(&format!(
                "Failed to materialize bundled wallpaper {}: {}",
                normalized, error
            ));
            DomainError::AssetResolution(format!(
                "Failed to copy bundled wallpaper {}: {}",
                normalized, error
            ))
        })?;

        Ok(target)
    }
}
