use std::sync::Arc;

use crate::application::services::catalog_service::CatalogService;
use crate::domain::errors::DomainError;
use crate::domain::models::device::{PermissionKind, PermissionStatus};
use crate::domain::models::picker::{PickedAsset, PickerResult};
use crate::domain::models::wallpaper::{WallpaperRecord, display_name_from_filename};
use crate::domain::repositories::device_gateway::DeviceGateway;
use crate::domain::repositories::picker_gateway::ImagePicker;
use crate::infrastructure::logging::logger;

const DEFAULT_UPLOAD_NAME: &str = "New Wallpaper";

/// Turns images picked by the user into catalog wallpapers
pub struct AcquisitionService {
    catalog: Arc<CatalogService>,
    device: Arc<dyn DeviceGateway>,
    picker: Arc<dyn ImagePicker>,
}

impl AcquisitionService {
    pub fn new(
        catalog: Arc<CatalogService>,
        device: Arc<dyn DeviceGateway>,
        picker: Arc<dyn ImagePicker>,
    ) -> Self {
        Self {
            catalog,
            device,
            picker,
        }
    }

    /// Pick one image and add it to `category`.
    ///
    /// `name` overrides the name derived from the picked file. Returns
    /// `None` when the user dismissed the picker.
    pub async fn upload_single(
        &self,
        name: Option<&str>,
        category: &str,
    ) -> Result<Option<WallpaperRecord>, DomainError> {
        let category = validate_category(category)?;
        self.ensure_read_permission().await?;

        let assets = match self.picker.pick_images(false).await? {
            PickerResult::Cancelled => {
                logger::info("Image selection canceled");
                return Ok(None);
            }
            PickerResult::Picked(assets) => assets,
        };

        let Some(asset) = assets.into_iter().next() else {
            logger::info("Image picker returned no assets");
            return Ok(None);
        };

        let file_name = asset.resolved_file_name();
        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| file_name.as_deref().map(display_name_from_filename))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string());

        let timestamp = chrono::Utc::now().timestamp_millis();
        let id = format!(
            "local_{}_{}_{}",
            slug(category),
            timestamp,
            slug(file_name.as_deref().unwrap_or("image"))
        );

        let record = record_for_asset(id, name, category, &asset);
        self.catalog.append(vec![record.clone()]).await?;

        logger::info(&format!(
            "Added wallpaper {} to category {}",
            record.id, record.category
        ));
        Ok(Some(record))
    }

    /// Pick any number of images and add them all to `category` in one save.
    ///
    /// Cancelling or picking nothing returns an empty list and writes nothing.
    pub async fn upload_batch(&self, category: &str) -> Result<Vec<WallpaperRecord>, DomainError> {
        let category = validate_category(category)?;
        self.ensure_read_permission().await?;

        let assets = match self.picker.pick_images(true).await? {
            PickerResult::Cancelled => Vec::new(),
            PickerResult::Picked(assets) => assets,
        };

        if assets.is_empty() {
            logger::info("Batch selection canceled or empty");
            return Ok(Vec::new());
        }

        let timestamp = chrono::Utc::now().timestamp_millis();
        let records = assets
            .iter()
            .enumerate()
            .map(|(index, asset)| {
                let file_name = asset.resolved_file_name();
                let name = file_name
                    .as_deref()
                    .map(display_name_from_filename)
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| format!("{} {}", category, index + 1));
                let id = format!(
                    "local_batch_{}_{}_{}",
                    timestamp,
                    index,
                    slug(file_name.as_deref().unwrap_or("image"))
                );

                record_for_asset(id, name, category, asset)
            })
            .collect::<Vec<_>>();

        self.catalog.append(records.clone()).await?;

        logger::info(&format!(
            "Added {} wallpapers to category {}",
            records.len(),
            category
        ));
        Ok(records)
    }

    async fn ensure_read_permission(&self) -> Result<(), DomainError> {
        match self
            .device
            .request_permission(PermissionKind::MediaLibraryRead)
            .await?
        {
            PermissionStatus::Granted => Ok(()),
            PermissionStatus::Denied => {
                logger::warn("Media library read permission denied");
                Err(DomainError::PermissionDenied(
                    "Permission to access the photo library is required".to_string(),
                ))
            }
        }
    }
}

fn validate_category(category: &str) -> Result<&str, DomainError> {
    let category = category.trim();
    if category.is_empty() {
        return Err(DomainError::InvalidData(
            "Category cannot be empty".to_string(),
        ));
    }
    Ok(category)
}

/// Picked images are referenced by their device uri for both sizes
fn record_for_asset(id: String, name: String, category: &str, asset: &PickedAsset) -> WallpaperRecord {
    WallpaperRecord::remote(id, name, category, asset.uri.clone(), asset.uri.clone())
}

/// Lowercase ascii alphanumerics, everything else collapsed to `-`
fn slug(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }

    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "image".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::models::device::{
        DirectSetOutcome, SystemFallback, WallpaperStrategy, WallpaperTarget,
    };
    use crate::domain::repositories::wallpaper_repository::WallpaperRepository;

    #[derive(Default)]
    struct MockWallpaperRepository {
        stored: Mutex<Option<Vec<WallpaperRecord>>>,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl WallpaperRepository for MockWallpaperRepository {
        async fn load_wallpapers(&self) -> Result<Option<Vec<WallpaperRecord>>, DomainError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save_wallpapers(&self, wallpapers: &[WallpaperRecord]) -> Result<(), DomainError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.stored.lock().unwrap() = Some(wallpapers.to_vec());
            Ok(())
        }
    }

    struct MockDevice {
        granted: bool,
    }

    #[async_trait]
    impl DeviceGateway for MockDevice {
        fn wallpaper_strategies(&self) -> Vec<WallpaperStrategy> {
            Vec::new()
        }

        async fn request_permission(
            &self,
            _kind: PermissionKind,
        ) -> Result<PermissionStatus, DomainError> {
            Ok(if self.granted {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            })
        }

        async fn download_to_local(&self, _url: &str) -> Result<PathBuf, DomainError> {
            unreachable!("acquisition never downloads")
        }

        async fn save_to_media_library(&self, _local_path: &Path) -> Result<(), DomainError> {
            unreachable!("acquisition never saves to the gallery")
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
            _fallback: SystemFallback,
        ) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct MockPicker {
        result: PickerResult<Vec<PickedAsset>>,
        called: AtomicBool,
        allow_multiple: Mutex<Option<bool>>,
    }

    impl MockPicker {
        fn new(result: PickerResult<Vec<PickedAsset>>) -> Self {
            Self {
                result,
                called: AtomicBool::new(false),
                allow_multiple: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl ImagePicker for MockPicker {
        async fn pick_images(
            &self,
            allow_multiple: bool,
        ) -> Result<PickerResult<Vec<PickedAsset>>, DomainError> {
            self.called.store(true, Ordering::SeqCst);
            *self.allow_multiple.lock().unwrap() = Some(allow_multiple);
            Ok(self.result.clone())
        }
    }

    struct Fixture {
        service: AcquisitionService,
        catalog: Arc<CatalogService>,
        repository: Arc<MockWallpaperRepository>,
        picker: Arc<MockPicker>,
    }

    fn fixture(granted: bool, result: PickerResult<Vec<PickedAsset>>) -> Fixture {
        let repository = Arc::new(MockWallpaperRepository::default());
        let catalog = Arc::new(CatalogService::new(
            repository.clone(),
            vec![WallpaperRecord::remote(
                "1",
                "Demon Slayer",
                "Anime",
                "https://i/1.jpg",
                "",
            )],
        ));
        let picker = Arc::new(MockPicker::new(result));

        Fixture {
            service: AcquisitionService::new(
                catalog.clone(),
                Arc::new(MockDevice { granted }),
                picker.clone(),
            ),
            catalog,
            repository,
            picker,
        }
    }

    #[test]
    fn slug_collapses_non_alphanumerics() {
        assert_eq!(slug("Sunset Over_Tokyo.JPG"), "sunset-over-tokyo-jpg");
        assert_eq!(slug("--"), "image");
    }

    #[tokio::test]
    async fn single_upload_derives_name_from_file_name() {
        let fixture = fixture(
            true,
            PickerResult::Picked(vec![PickedAsset::new(
                "file:///DCIM/sunset_over_tokyo.jpg",
                None,
            )]),
        );

        let record = fixture
            .service
            .upload_single(None, "Nature")
            .await
            .unwrap()
            .expect("record");

        assert_eq!(record.name, "Sunset Over Tokyo");
        assert_eq!(record.category, "Nature");
        assert_eq!(record.image_url, "file:///DCIM/sunset_over_tokyo.jpg");
        assert_eq!(record.thumbnail_url, record.image_url);
        assert!(record.id.starts_with("local_nature_"));
        assert!(record.id.ends_with("_sunset-over-tokyo-jpg"));
        assert_eq!(fixture.picker.allow_multiple.lock().unwrap().clone(), Some(false));
        assert_eq!(fixture.catalog.get_by_id(&record.id), Some(record));
        assert_eq!(fixture.repository.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn single_upload_prefers_explicit_name() {
        let fixture = fixture(
            true,
            PickerResult::Picked(vec![PickedAsset::new("content://media/42", None)]),
        );

        let record = fixture
            .service
            .upload_single(Some("My Cat"), "Pets")
            .await
            .unwrap()
            .expect("record");
        assert_eq!(record.name, "My Cat");

        let fallback = fixture
            .service
            .upload_single(Some("  "), "Pets")
            .await
            .unwrap()
            .expect("record");
        assert_eq!(fallback.name, "42");
    }

    #[tokio::test]
    async fn single_upload_cancel_is_not_an_error() {
        let fixture = fixture(true, PickerResult::Cancelled);

        assert_eq!(fixture.service.upload_single(None, "Anime").await.unwrap(), None);
        assert_eq!(fixture.repository.saves.load(Ordering::SeqCst), 0);
        assert_eq!(fixture.catalog.len(), 1);
    }

    #[tokio::test]
    async fn permission_denial_aborts_before_picker() {
        let fixture = fixture(
            false,
            PickerResult::Picked(vec![PickedAsset::new("file:///a.jpg", None)]),
        );

        let single = fixture.service.upload_single(None, "Anime").await;
        assert!(matches!(single, Err(DomainError::PermissionDenied(_))));
        let batch = fixture.service.upload_batch("Anime").await;
        assert!(matches!(batch, Err(DomainError::PermissionDenied(_))));

        assert!(!fixture.picker.called.load(Ordering::SeqCst));
        assert_eq!(fixture.repository.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_category_is_rejected() {
        let fixture = fixture(true, PickerResult::Cancelled);

        let result = fixture.service.upload_batch("   ").await;
        assert!(matches!(result, Err(DomainError::InvalidData(_))));
        assert!(!fixture.picker.called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn batch_upload_saves_once() {
        let fixture = fixture(
            true,
            PickerResult::Picked(vec![
                PickedAsset::new("file:///DCIM/a.jpg", Some("beach_day.jpg".to_string())),
                PickedAsset::new("content://media/", None),
                PickedAsset::new("file:///DCIM/night_sky.png", None),
            ]),
        );

        let records = fixture.service.upload_batch("Nature").await.unwrap();

        let names = records.iter().map(|record| record.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Beach Day", "Nature 2", "Night Sky"]);
        assert!(records.iter().all(|record| record.category == "Nature"));
        assert!(records[1].id.starts_with("local_batch_"));
        assert!(records[1].id.ends_with("_1_image"));
        assert_eq!(fixture.picker.allow_multiple.lock().unwrap().clone(), Some(true));
        assert_eq!(fixture.repository.saves.load(Ordering::SeqCst), 1);
        assert_eq!(fixture.catalog.count_in_category("Nature"), 3);
    }

    #[tokio::test]
    async fn batch_upload_cancel_or_empty_writes_nothing() {
        let cancelled = fixture(true, PickerResult::Cancelled);
        assert!(cancelled.service.upload_batch("Anime").await.unwrap().is_empty());
        assert_eq!(cancelled.repository.saves.load(Ordering::SeqCst), 0);

        let empty = fixture(true, PickerResult::Picked(Vec::new()));
        assert!(empty.service.upload_batch("Anime").await.unwrap().is_empty());
        assert_eq!(empty.repository.saves.load(Ordering::SeqCst), 0);
        assert_eq!(empty.catalog.len(), 1);
    }
}
