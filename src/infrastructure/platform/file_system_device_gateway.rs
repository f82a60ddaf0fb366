use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures_util::StreamExt;
use mime_guess::from_path;
use reqwest::Client;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::domain::errors::DomainError;
use crate::domain::models::device::{
    DirectSetOutcome, PermissionKind, PermissionStatus, SystemFallback, WallpaperStrategy,
    WallpaperTarget,
};
use crate::domain::repositories::device_gateway::DeviceGateway;
use crate::infrastructure::logging::logger;
use crate::infrastructure::persistence::file_system::sanitize_file_name;

const DEFAULT_DOWNLOAD_NAME: &str = "wallpaper.jpg";

/// Device gateway for hosts without a wallpaper API: downloads over HTTP
/// into a cache directory and uses a plain directory as the media library.
/// Permissions are always granted and wallpapers are never applied in place.
pub struct FileSystemDeviceGateway {
    client: Client,
    cache_dir: PathBuf,
    gallery_dir: PathBuf,
}

impl FileSystemDeviceGateway {
    pub fn new(client: Client, cache_dir: PathBuf, gallery_dir: PathBuf) -> Self {
        Self {
            client,
            cache_dir,
            gallery_dir,
        }
    }

    fn download_file_name(url: &str) -> String {
        Url::parse(url)
            .ok()
            .and_then(|parsed| {
                parsed
                    .path_segments()
                    .and_then(|mut segments| segments.next_back().map(str::to_string))
            })
            .map(|segment| sanitize_file_name(&segment))
            .filter(|name| !name.is_empty() && Self::is_image(Path::new(name)))
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
    }

    /// Path of an image that is already on this host: a `file://` uri or an
    /// absolute path. Anything else has to be downloaded.
    fn local_source(locator: &str) -> Option<PathBuf> {
        match Url::parse(locator) {
            Ok(parsed) if parsed.scheme() == "file" => parsed.to_file_path().ok(),
            Ok(_) => None,
            Err(_) => {
                let path = Path::new(locator);
                path.is_absolute().then(|| path.to_path_buf())
            }
        }
    }

    fn is_image(path: &Path) -> bool {
        from_path(path)
            .first()
            .is_some_and(|mime| mime.type_() == "image")
    }

    /// `<stem>_<millis>[_<n>].<ext>` so repeated saves never overwrite each other
    fn gallery_file_name(source: &Path, timestamp: i64, attempt: u32) -> String {
        let stem = source
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "wallpaper".to_string());
        let stem = if attempt == 0 {
            format!("{}_{}", stem, timestamp)
        } else {
            format!("{}_{}_{}", stem, timestamp, attempt)
        };

        match source.extension() {
            Some(extension) => format!("{}.{}", stem, extension.to_string_lossy()),
            None => stem,
        }
    }

    async fn ensure_dir(path: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(path).await.map_err(|error| {
            logger::error(&format!("Failed to create directory {:?}: {}", path, error));
            DomainError::DeviceAction(format!("Failed to create directory: {}", error))
        })
    }
}

#[async_trait]
impl DeviceGateway for FileSystemDeviceGateway {
    fn wallpaper_strategies(&self) -> Vec<WallpaperStrategy> {
        Vec::new()
    }

    async fn request_permission(
        &self,
        kind: PermissionKind,
    ) -> Result<PermissionStatus, DomainError> {
        logger::debug(&format!("FileSystemDeviceGateway: Granting {:?}", kind));
        Ok(PermissionStatus::Granted)
    }

    async fn download_to_local(&self, url: &str) -> Result<PathBuf, DomainError> {
        if let Some(path) = Self::local_source(url) {
            let exists = fs::try_exists(&path).await.unwrap_or(false);
            if !exists {
                logger::error(&format!("Local image not found: {:?}", path));
                return Err(DomainError::DeviceAction(format!(
                    "Image file not found: {}",
                    path.display()
                )));
            }

            logger::debug(&format!("Image already local: {:?}", path));
            return Ok(path);
        }

        logger::info(&format!("Downloading image: {}", url));

        Self::ensure_dir(&self.cache_dir).await?;
        let target = self.cache_dir.join(Self::download_file_name(url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| {
                logger::error(&format!("Failed to download {}: {}", url, error));
                DomainError::DeviceAction(format!("Failed to download image: {}", error))
            })?;

        let mut file = fs::File::create(&target).await.map_err(|error| {
            DomainError::DeviceAction(format!("Failed to create download file: {}", error))
        })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|error| {
                DomainError::DeviceAction(format!("Failed to download image: {}", error))
            })?;
            file.write_all(&chunk).await.map_err(|error| {
                DomainError::DeviceAction(format!("Failed to write download file: {}", error))
            })?;
        }

        file.flush().await.map_err(|error| {
            DomainError::DeviceAction(format!("Failed to write download file: {}", error))
        })?;

        logger::info(&format!("Image downloaded to: {:?}", target));
        Ok(target)
    }

    async fn save_to_media_library(&self, local_path: &Path) -> Result<(), DomainError> {
        if !Self::is_image(local_path) {
            return Err(DomainError::DeviceAction(format!(
                "Not an image file: {}",
                local_path.display()
            )));
        }

        Self::ensure_dir(&self.gallery_dir).await?;
        let timestamp = chrono::Utc::now().timestamp_millis();
        let mut attempt = 0;
        let mut target = self
            .gallery_dir
            .join(Self::gallery_file_name(local_path, timestamp, attempt));
        while fs::try_exists(&target).await.unwrap_or(false) {
            attempt += 1;
            target = self
                .gallery_dir
                .join(Self::gallery_file_name(local_path, timestamp, attempt));
        }

        fs::copy(local_path, &target).await.map_err(|error| {
            logger::error(&format!(
                "Failed to copy {:?} into the gallery: {}",
                local_path, error
            ));
            DomainError::DeviceAction(format!("Failed to save image to gallery: {}", error))
        })?;

        logger::info(&format!("Saved image to gallery: {:?}", target));
        Ok(())
    }

    async fn attempt_direct_wallpaper_set(
        &self,
        _local_path: &Path,
        _target: WallpaperTarget,
    ) -> Result<DirectSetOutcome, DomainError> {
        Ok(DirectSetOutcome::Unsupported)
    }

    async fn launch_system_fallback(
        &self,
        _local_path: &Path,
        fallback: SystemFallback,
    ) -> Result<(), DomainError> {
        Err(DomainError::DeviceAction(format!(
            "System fallback {:?} is not available on this host",
            fallback
        )))
    }
}
