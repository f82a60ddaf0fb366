use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::services::catalog_service::CatalogService;
use crate::domain::errors::DomainError;
use crate::domain::models::picker::PickerResult;
use crate::domain::models::wallpaper::WallpaperRecord;
use crate::domain::repositories::picker_gateway::DocumentPicker;
use crate::domain::repositories::share_target::ShareTarget;
use crate::infrastructure::assets::normalize_asset_key;
use crate::infrastructure::logging::logger;

const EXPORT_FILE_PREFIX: &str = "wallpaper_export_";
const IMPORTED_ID_PREFIX: &str = "imported_";

/// Counts from a completed import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// Elements in the payload
    pub total: usize,
    /// Elements that passed validation
    pub valid: usize,
    /// Records appended to the catalog
    pub added: usize,
}

/// Shape of one element of an import payload. Unknown fields are ignored.
/// `isLocal`/`localImage` are present on bundled records from an export.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedWallpaper {
    #[serde(default)]
    id: Option<Value>,
    name: String,
    category: String,
    image_url: String,
    thumbnail_url: String,
    #[serde(default)]
    is_local: bool,
    #[serde(default)]
    local_image: Option<String>,
}

impl ImportedWallpaper {
    fn explicit_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }
}

/// Parse an import payload into the records that pass validation.
///
/// Returns the number of elements in the payload alongside the records.
/// Elements without an id get `imported_<batch_stamp>_<index>`, where the
/// index counts valid elements only.
pub fn parse_import_payload(
    contents: &str,
    batch_stamp: i64,
) -> Result<(usize, Vec<WallpaperRecord>), DomainError> {
    let payload: Value = serde_json::from_str(contents).map_err(|error| {
        logger::error(&format!("Import file is not valid JSON: {}", error));
        DomainError::InvalidFormat(format!("Import file is not valid JSON: {}", error))
    })?;

    let Value::Array(items) = payload else {
        logger::error("Invalid import format - not an array");
        return Err(DomainError::InvalidFormat(
            "Expected an array of wallpapers".to_string(),
        ));
    };

    let total = items.len();
    let mut records = Vec::new();

    for item in items {
        let Ok(imported) = serde_json::from_value::<ImportedWallpaper>(item) else {
            continue;
        };

        let explicit_id = imported.explicit_id();
        let id = explicit_id.clone().unwrap_or_else(|| {
            format!("{}{}_{}", IMPORTED_ID_PREFIX, batch_stamp, records.len())
        });
        let record = if imported.is_local {
            // Bundled records from an export; the key must still name an asset.
            let Some(key) = imported
                .local_image
                .as_deref()
                .and_then(|key| normalize_asset_key(key).ok())
            else {
                continue;
            };
            let mut record = WallpaperRecord::bundled(id, imported.name, imported.category, key);
            record.image_url = imported.image_url;
            record.thumbnail_url = imported.thumbnail_url;
            record
        } else {
            WallpaperRecord::remote(
                id,
                imported.name,
                imported.category,
                imported.image_url,
                imported.thumbnail_url,
            )
        };

        if record.validate().is_ok() {
            records.push(record);
        }
    }

    Ok((total, records))
}

/// Bulk import and export of the catalog as JSON
pub struct TransferService {
    catalog: Arc<CatalogService>,
    share_target: Arc<dyn ShareTarget>,
    document_picker: Arc<dyn DocumentPicker>,
    export_dir: PathBuf,
}

impl TransferService {
    pub fn new(
        catalog: Arc<CatalogService>,
        share_target: Arc<dyn ShareTarget>,
        document_picker: Arc<dyn DocumentPicker>,
        export_dir: PathBuf,
    ) -> Self {
        Self {
            catalog,
            share_target,
            document_picker,
            export_dir,
        }
    }

    /// Ask the user for an import file and import it. `None` if the picker
    /// was dismissed.
    pub async fn import_from_picker(&self) -> Result<Option<ImportSummary>, DomainError> {
        logger::info("Starting wallpaper import process");

        match self.document_picker.pick_json_document().await? {
            PickerResult::Cancelled => {
                logger::info("Import canceled by user");
                Ok(None)
            }
            PickerResult::Picked(path) => self.import_from_file(&path).await.map(Some),
        }
    }

    /// Import the JSON array stored at `path`
    pub async fn import_from_file(&self, path: &Path) -> Result<ImportSummary, DomainError> {
        let contents = fs::read_to_string(path).await.map_err(|error| {
            logger::error(&format!("Failed to read import file {:?}: {}", path, error));
            if error.kind() == std::io::ErrorKind::NotFound {
                DomainError::NotFound(format!("Import file not found: {}", path.display()))
            } else {
                DomainError::InternalError(format!("Failed to read import file: {}", error))
            }
        })?;

        self.import_json(&contents).await
    }

    /// Validate `contents` and append the wallpapers whose ids are new.
    ///
    /// All or nothing: a malformed payload or one without any valid element
    /// fails without touching the catalog. Existing wallpapers always win
    /// over imported ones with the same id.
    pub async fn import_json(&self, contents: &str) -> Result<ImportSummary, DomainError> {
        let batch_stamp = chrono::Utc::now().timestamp_millis();
        let (total, candidates) = parse_import_payload(contents, batch_stamp)?;

        logger::info(&format!(
            "Found {} valid wallpapers out of {} items",
            candidates.len(),
            total
        ));

        if candidates.is_empty() {
            return Err(DomainError::EmptyImport(
                "No valid wallpapers found in the import file".to_string(),
            ));
        }

        let valid = candidates.len();
        let mut known_ids = self
            .catalog
            .get_all()
            .into_iter()
            .map(|wallpaper| wallpaper.id)
            .collect::<HashSet<_>>();
        let additions = candidates
            .into_iter()
            .filter(|candidate| known_ids.insert(candidate.id.clone()))
            .collect::<Vec<_>>();
        let added = additions.len();

        self.catalog.append(additions).await?;

        logger::info(&format!("Added {} new wallpapers to collection", added));
        Ok(ImportSummary {
            total,
            valid,
            added,
        })
    }

    /// Write the catalog to a new export file and hand it to the share
    /// target. The file stays on disk even when sharing is unavailable.
    pub async fn export_to_share(&self) -> Result<PathBuf, DomainError> {
        logger::info("Exporting wallpaper collection");

        let path = self.export_catalog().await?;

        if !self.share_target.is_available().await {
            logger::warn("Sharing not available on this device");
            return Err(DomainError::SharingUnavailable(
                "Sharing is not available on this device".to_string(),
            ));
        }

        self.share_target.share_file(&path).await?;
        logger::info("Export file shared successfully");
        Ok(path)
    }

    /// Write the catalog as pretty-printed JSON to a new timestamped file
    pub async fn export_catalog(&self) -> Result<PathBuf, DomainError> {
        let json = serde_json::to_string_pretty(&self.catalog.get_all()).map_err(|error| {
            DomainError::InternalError(format!("Failed to serialize catalog: {}", error))
        })?;

        let timestamp = chrono::Utc::now().timestamp_millis();
        let path = self.write_new_export(&json, timestamp).await?;

        logger::info(&format!("Export file created at: {:?}", path));
        Ok(path)
    }

    /// Create `wallpaper_export_<timestamp>[_<n>].json`, taking the first
    /// suffix whose file does not exist yet. Existing files are never opened.
    async fn write_new_export(&self, json: &str, timestamp: i64) -> Result<PathBuf, DomainError> {
        fs::create_dir_all(&self.export_dir).await.map_err(|error| {
            logger::error(&format!(
                "Failed to create export directory {:?}: {}",
                self.export_dir, error
            ));
            DomainError::InternalError(format!("Failed to create export directory: {}", error))
        })?;

        let mut attempt = 0u32;
        loop {
            let path = self.export_dir.join(export_file_name(timestamp, attempt));
            let opened = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            let mut file = match opened {
                Ok(file) => file,
                Err(error) if error.kind() == std::io::ErrorKind::AlreadyExists => {
                    attempt += 1;
                    continue;
                }
                Err(error) => {
                    logger::error(&format!("Failed to create export file {:?}: {}", path, error));
                    return Err(DomainError::InternalError(format!(
                        "Failed to create export file: {}",
                        error
                    )));
                }
            };

            let written = async {
                file.write_all(json.as_bytes()).await?;
                file.flush().await
            };
            written.await.map_err(|error| {
                logger::error(&format!("Failed to write export file {:?}: {}", path, error));
                DomainError::InternalError(format!("Failed to write export file: {}", error))
            })?;

            return Ok(path);
        }
    }
}

fn export_file_name(timestamp: i64, attempt: u32) -> String {
    if attempt == 0 {
        format!("{}{}.json", EXPORT_FILE_PREFIX, timestamp)
    } else {
        format!("{}{}_{}.json", EXPORT_FILE_PREFIX, timestamp, attempt)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rand::random;
    use serde_json::json;

    use super::*;
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

    struct MockShareTarget {
        available: bool,
        shared: Mutex<Vec<PathBuf>>,
    }

    #[async_trait]
    impl ShareTarget for MockShareTarget {
        async fn is_available(&self) -> bool {
            self.available
        }

        async fn share_file(&self, path: &Path) -> Result<(), DomainError> {
            self.shared.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    struct MockDocumentPicker {
        path: Option<PathBuf>,
        called: AtomicBool,
    }

    #[async_trait]
    impl DocumentPicker for MockDocumentPicker {
        async fn pick_json_document(&self) -> Result<PickerResult<PathBuf>, DomainError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(match &self.path {
                Some(path) => PickerResult::Picked(path.clone()),
                None => PickerResult::Cancelled,
            })
        }
    }

    struct Fixture {
        service: TransferService,
        catalog: Arc<CatalogService>,
        repository: Arc<MockWallpaperRepository>,
        share_target: Arc<MockShareTarget>,
        root: PathBuf,
    }

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("wallpaper-catalog-transfer-{}", random::<u64>()))
    }

    fn fixture(share_available: bool, picked: Option<PathBuf>) -> Fixture {
        let root = unique_temp_root();
        let repository = Arc::new(MockWallpaperRepository::default());
        let catalog = Arc::new(CatalogService::new(
            repository.clone(),
            vec![WallpaperRecord::remote(
                "1",
                "Demon Slayer",
                "Anime",
                "https://i/1.jpg",
                "https://i/1t.jpg",
            )],
        ));
        let share_target = Arc::new(MockShareTarget {
            available: share_available,
            shared: Mutex::new(Vec::new()),
        });
        let picker = Arc::new(MockDocumentPicker {
            path: picked,
            called: AtomicBool::new(false),
        });

        Fixture {
            service: TransferService::new(
                catalog.clone(),
                share_target.clone(),
                picker,
                root.join("exports"),
            ),
            catalog,
            repository,
            share_target,
            root,
        }
    }

    fn payload() -> String {
        json!([
            {
                "id": "100",
                "name": "Mountain Lake",
                "category": "Nature",
                "imageUrl": "https://example.com/lake.jpg",
                "thumbnailUrl": "https://example.com/lake_thumb.jpg",
                "photographer": "ignored"
            },
            {
                "id": "101",
                "name": "No Category",
                "imageUrl": "https://example.com/x.jpg",
                "thumbnailUrl": "https://example.com/x_thumb.jpg"
            }
        ])
        .to_string()
    }

    #[test]
    fn parse_assigns_ids_by_valid_index() {
        let contents = json!([
            {"name": "A", "category": "C", "imageUrl": "https://a", "thumbnailUrl": "https://a/t"},
            {"name": 5, "category": "C", "imageUrl": "https://b", "thumbnailUrl": "https://b/t"},
            {"id": "", "name": "B", "category": "C", "imageUrl": "https://c", "thumbnailUrl": ""},
            {"id": 7, "name": "N", "category": "C", "imageUrl": "https://d", "thumbnailUrl": ""},
            "not an object"
        ])
        .to_string();

        let (total, records) = parse_import_payload(&contents, 1700).unwrap();

        assert_eq!(total, 5);
        let ids = records.iter().map(|record| record.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["imported_1700_0", "imported_1700_1", "7"]);
        assert!(records.iter().all(|record| !record.is_local));
    }

    #[test]
    fn parse_drops_elements_without_any_image_url() {
        let contents = json!([
            {"id": "x", "name": "A", "category": "C", "imageUrl": "", "thumbnailUrl": ""}
        ])
        .to_string();

        let (_, records) = parse_import_payload(&contents, 1).unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn import_adds_valid_elements_once() {
        let fixture = fixture(true, None);

        let first = fixture.service.import_json(&payload()).await.unwrap();
        assert_eq!(first, ImportSummary { total: 2, valid: 1, added: 1 });
        assert_eq!(fixture.catalog.len(), 2);
        assert_eq!(fixture.catalog.get_by_id("100").unwrap().category, "Nature");

        let second = fixture.service.import_json(&payload()).await.unwrap();
        assert_eq!(second.added, 0);
        assert_eq!(fixture.catalog.len(), 2);
    }

    #[tokio::test]
    async fn import_keeps_existing_record_on_id_clash() {
        let fixture = fixture(true, None);
        let contents = json!([
            {"id": "1", "name": "Impostor", "category": "Other", "imageUrl": "https://x", "thumbnailUrl": "https://x/t"},
            {"id": "200", "name": "First", "category": "New", "imageUrl": "https://y", "thumbnailUrl": ""},
            {"id": "200", "name": "Second", "category": "New", "imageUrl": "https://z", "thumbnailUrl": ""}
        ])
        .to_string();

        let summary = fixture.service.import_json(&contents).await.unwrap();

        assert_eq!(summary.added, 1);
        assert_eq!(fixture.catalog.get_by_id("1").unwrap().name, "Demon Slayer");
        assert_eq!(fixture.catalog.get_by_id("200").unwrap().name, "First");
    }

    #[tokio::test]
    async fn import_rejects_non_array_without_touching_catalog() {
        let fixture = fixture(true, None);

        let result = fixture.service.import_json(r#"{"a":1}"#).await;
        assert!(matches!(result, Err(DomainError::InvalidFormat(_))));

        let result = fixture.service.import_json("not json").await;
        assert!(matches!(result, Err(DomainError::InvalidFormat(_))));

        assert_eq!(fixture.catalog.len(), 1);
        assert_eq!(fixture.repository.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn import_without_valid_elements_fails() {
        let fixture = fixture(true, None);
        let contents = json!([{"name": "Only a name"}, 42]).to_string();

        let result = fixture.service.import_json(&contents).await;
        assert!(matches!(result, Err(DomainError::EmptyImport(_))));
        assert_eq!(fixture.repository.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn import_from_file_reads_json_array() {
        let fixture = fixture(true, None);
        let path = fixture.root.join("import.json");
        tokio::fs::create_dir_all(&fixture.root).await.unwrap();
        tokio::fs::write(&path, payload()).await.unwrap();

        let summary = fixture.service.import_from_file(&path).await.unwrap();
        assert_eq!(summary.added, 1);

        let missing = fixture.service.import_from_file(&fixture.root.join("nope.json")).await;
        assert!(matches!(missing, Err(DomainError::NotFound(_))));

        let _ = tokio::fs::remove_dir_all(&fixture.root).await;
    }

    #[tokio::test]
    async fn cancelled_picker_imports_nothing() {
        let fixture = fixture(true, None);

        assert_eq!(fixture.service.import_from_picker().await.unwrap(), None);
        assert_eq!(fixture.repository.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn export_writes_pretty_json_and_shares_it() {
        let fixture = fixture(true, None);

        let path = fixture.service.export_to_share().await.unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("wallpaper_export_"));
        assert!(name.ends_with(".json"));

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.contains("\n  {"));
        let exported: Vec<WallpaperRecord> = serde_json::from_str(&contents).unwrap();
        assert_eq!(exported, fixture.catalog.get_all());
        assert_eq!(fixture.share_target.shared.lock().unwrap().clone(), vec![path]);

        let _ = tokio::fs::remove_dir_all(&fixture.root).await;
    }

    #[tokio::test]
    async fn export_fails_when_sharing_unavailable_but_keeps_file() {
        let fixture = fixture(false, None);

        let result = fixture.service.export_to_share().await;
        assert!(matches!(result, Err(DomainError::SharingUnavailable(_))));

        let mut entries = tokio::fs::read_dir(fixture.root.join("exports")).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_some());

        let _ = tokio::fs::remove_dir_all(&fixture.root).await;
    }

    #[tokio::test]
    async fn export_skips_names_that_are_taken() {
        let fixture = fixture(true, None);
        let exports = fixture.root.join("exports");
        tokio::fs::create_dir_all(&exports).await.unwrap();
        tokio::fs::write(exports.join("wallpaper_export_1700.json"), "keep")
            .await
            .unwrap();

        let path = fixture.service.write_new_export("[]", 1700).await.unwrap();

        assert_eq!(path, exports.join("wallpaper_export_1700_1.json"));
        assert_eq!(
            tokio::fs::read_to_string(exports.join("wallpaper_export_1700.json"))
                .await
                .unwrap(),
            "keep"
        );
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), "[]");

        let _ = tokio::fs::remove_dir_all(&fixture.root).await;
    }

    #[tokio::test]
    async fn exported_bundled_wallpapers_survive_reimport() {
        let source = fixture(true, None);
        let bundled = WallpaperRecord::bundled("anime_sky", "Sky", "Anime", "Anime/sky.jpg");
        source.catalog.append(vec![bundled.clone()]).await.unwrap();

        let path = source.service.export_catalog().await.unwrap();
        let exported = tokio::fs::read_to_string(&path).await.unwrap();

        let target = fixture(true, None);
        let summary = target.service.import_json(&exported).await.unwrap();

        assert_eq!(summary, ImportSummary { total: 2, valid: 2, added: 1 });
        assert_eq!(target.catalog.get_by_id("anime_sky"), Some(bundled));

        let _ = tokio::fs::remove_dir_all(&source.root).await;
    }

    #[test]
    fn parse_drops_local_elements_without_asset_key() {
        let contents = json!([
            {"id": "a", "name": "A", "category": "C", "imageUrl": "", "thumbnailUrl": "", "isLocal": true},
            {"id": "b", "name": "B", "category": "C", "imageUrl": "", "thumbnailUrl": "", "isLocal": true, "localImage": "../etc"}
        ])
        .to_string();

        let (total, records) = parse_import_payload(&contents, 1).unwrap();
        assert_eq!(total, 2);
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn consecutive_exports_do_not_overwrite_each_other() {
        let fixture = fixture(true, None);

        let first = fixture.service.export_catalog().await.unwrap();
        let second = fixture.service.export_catalog().await.unwrap();
        assert_ne!(first, second);

        let _ = tokio::fs::remove_dir_all(&fixture.root).await;
    }
}
