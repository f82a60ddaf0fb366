use std::borrow::Cow;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::device::{
    DirectSetOutcome, PermissionKind, PermissionStatus, SystemFallback, WallpaperStrategy,
    WallpaperTarget,
};

/// Platform capabilities used to save images and apply wallpapers.
///
/// Implementations are platform specific; none of these calls are retried.
#[async_trait]
pub trait DeviceGateway: Send + Sync {
    /// Mechanisms this platform offers for applying a wallpaper, in the
    /// order they should be tried. An empty chain means the platform cannot
    /// set wallpapers and the image is only saved to the gallery.
    fn wallpaper_strategies(&self) -> Vec<WallpaperStrategy> {
        vec![
            WallpaperStrategy::DirectSet,
            WallpaperStrategy::System(SystemFallback::AttachData),
            WallpaperStrategy::System(SystemFallback::View),
        ]
    }

    async fn request_permission(
        &self,
        kind: PermissionKind,
    ) -> Result<PermissionStatus, DomainError>;

    /// Download a remote image and return the local file it was written to
    async fn download_to_local(&self, url: &str) -> Result<PathBuf, DomainError>;

    /// Commit a local file to the platform media library
    async fn save_to_media_library(&self, local_path: &Path) -> Result<(), DomainError>;

    /// Apply the wallpaper in place, if the platform allows it
    async fn attempt_direct_wallpaper_set(
        &self,
        local_path: &Path,
        target: WallpaperTarget,
    ) -> Result<DirectSetOutcome, DomainError>;

    /// Hand the image to a system activity that lets the user finish
    async fn launch_system_fallback(
        &self,
        local_path: &Path,
        fallback: SystemFallback,
    ) -> Result<(), DomainError>;
}

/// Read-only table of images compiled into the application
pub trait BundledAssets: Send + Sync {
    /// Keys of every bundled image, formatted `<Category>/<file>`
    fn keys(&self) -> Vec<String>;

    fn read(&self, key: &str) -> Option<Cow<'static, [u8]>>;
}
