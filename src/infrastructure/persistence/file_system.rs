use crate::domain::errors::DomainError;
use crate::infrastructure::logging::logger;
use rand::random;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs::{self as tokio_fs, create_dir_all, read_to_string};

/// Represents the application data directory structure
#[derive(Debug, Clone)]
pub struct DataDirectory {
    root: PathBuf,
    store: PathBuf,
    exports: PathBuf,
    cache: PathBuf,
    gallery: PathBuf,
}

impl DataDirectory {
    /// Create a new DataDirectory instance
    pub fn new(root: PathBuf) -> Self {
        let store = root.join("store");
        let exports = root.join("exports");
        let cache = root.join("cache");
        let gallery = root.join("gallery");

        Self {
            root,
            store,
            exports,
            cache,
            gallery,
        }
    }

    /// Use `exports` instead of `<root>/exports` for export files
    pub fn with_exports_dir(mut self, exports: PathBuf) -> Self {
        self.exports = exports;
        self
    }

    /// Initialize the data directory structure
    pub async fn initialize(&self) -> Result<(), DomainError> {
        tracing::info!("Initializing data directory at: {:?}", self.root);

        for dir in [
            &self.root,
            &self.store,
            &self.exports,
            &self.cache,
            &self.gallery,
        ] {
            self.create_directory(dir).await?;
        }

        tracing::info!("Data directory initialized successfully");
        Ok(())
    }

    /// Create a directory if it doesn't exist
    async fn create_directory(&self, path: &Path) -> Result<(), DomainError> {
        if !path.exists() {
            tracing::info!("Creating directory: {:?}", path);
            create_dir_all(path).await.map_err(|e| {
                tracing::error!("Failed to create directory {:?}: {}", path, e);
                DomainError::InternalError(format!("Failed to create directory: {}", e))
            })?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Key-value blobs
    pub fn store(&self) -> &Path {
        &self.store
    }

    /// Exported catalog files
    pub fn exports(&self) -> &Path {
        &self.exports
    }

    /// Downloaded and materialized images
    pub fn cache(&self) -> &Path {
        &self.cache
    }

    /// Media library of the file-system device gateway
    pub fn gallery(&self) -> &Path {
        &self.gallery
    }
}

/// Read a JSON file and deserialize it
pub async fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, DomainError> {
    logger::debug(&format!("Reading JSON file: {:?}", path));

    let contents = read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DomainError::NotFound(format!("File not found: {}", path.display()))
        } else {
            logger::error(&format!("Failed to read file {:?}: {}", path, e));
            DomainError::InternalError(format!("Failed to read file: {}", e))
        }
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        logger::error(&format!("Failed to parse JSON from file {:?}: {}", path, e));
        DomainError::InvalidData(format!("Invalid JSON: {}", e))
    })
}

/// Write `contents` next to `path` and rename it into place, so readers
/// never observe a half-written file.
pub async fn write_text_file_atomic(path: &Path, contents: &str) -> Result<(), DomainError> {
    ensure_parent_dir(path).await?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{}.{:x}.tmp", file_name, random::<u64>()));

    tokio_fs::write(&temp_path, contents).await.map_err(|e| {
        logger::error(&format!("Failed to write temp file {:?}: {}", temp_path, e));
        DomainError::InternalError(format!("Failed to write to file: {}", e))
    })?;

    if let Err(e) = tokio_fs::rename(&temp_path, path).await {
        logger::error(&format!(
            "Failed to move {:?} into place at {:?}: {}",
            temp_path, path, e
        ));
        let _ = tokio_fs::remove_file(&temp_path).await;
        return Err(DomainError::InternalError(format!(
            "Failed to replace file: {}",
            e
        )));
    }

    Ok(())
}

async fn ensure_parent_dir(path: &Path) -> Result<(), DomainError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await.map_err(|e| {
            logger::error(&format!(
                "Failed to create parent directory for {:?}: {}",
                path, e
            ));
            DomainError::InternalError(format!("Failed to create directory: {}", e))
        })?;
    }

    Ok(())
}

/// Replace characters that are unsafe in file names
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized = name
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ if ch.is_control() => '_',
            _ => ch,
        })
        .collect::<String>();

    sanitized.trim().trim_end_matches(['.', ' ']).to_string()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rand::random;
    use serde_json::{Value, json};

    use super::*;

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("wallpaper-catalog-fs-{}", random::<u64>()))
    }

    #[test]
    fn sanitize_file_name_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_name("@wallpaper_app/wallpapers"), "@wallpaper_app_wallpapers");
        assert_eq!(sanitize_file_name("..\\bad:*name?.json"), ".._bad__name_.json");
        assert_eq!(sanitize_file_name(" ... "), "");
    }

    #[tokio::test]
    async fn initialize_creates_layout() {
        let root = unique_temp_root();
        let directory = DataDirectory::new(root.clone());
        directory.initialize().await.expect("initialize data directory");

        assert!(directory.store().is_dir());
        assert!(directory.exports().is_dir());
        assert!(directory.cache().is_dir());
        assert!(directory.gallery().is_dir());

        let _ = tokio_fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn json_file_round_trip_and_missing_file() {
        let root = unique_temp_root();
        let path = root.join("nested").join("data.json");

        let missing = read_json_file::<Value>(&path).await;
        assert!(matches!(missing, Err(DomainError::NotFound(_))));

        write_text_file_atomic(&path, &json!({"name": "Naruto"}).to_string())
            .await
            .expect("write json");
        let value = read_json_file::<Value>(&path).await.expect("read json");
        assert_eq!(value["name"], "Naruto");

        write_text_file_atomic(&path, "not json").await.expect("replace file");
        let invalid = read_json_file::<Value>(&path).await;
        assert!(matches!(invalid, Err(DomainError::InvalidData(_))));

        let _ = tokio_fs::remove_dir_all(&root).await;
    }
}
