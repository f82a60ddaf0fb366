use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::domain::errors::DomainError;
use crate::domain::repositories::key_value_store::KeyValueStore;
use crate::infrastructure::logging::logger;
use crate::infrastructure::persistence::file_system::{sanitize_file_name, write_text_file_atomic};

/// Key-value store keeping one `<key>.json` file per key
pub struct FileKeyValueStore {
    store_dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(store_dir: PathBuf) -> Self {
        Self { store_dir }
    }

    fn path_for_key(&self, key: &str) -> Result<PathBuf, DomainError> {
        let file_stem = sanitize_file_name(key);
        if file_stem.is_empty() {
            return Err(DomainError::InvalidData(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }

        Ok(self.store_dir.join(format!("{}.json", file_stem)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, DomainError> {
        let path = self.path_for_key(key)?;
        logger::debug(&format!("FileKeyValueStore: Reading {} from {:?}", key, path));

        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => {
                logger::error(&format!("Failed to read storage key {}: {}", key, error));
                Err(DomainError::Persistence(format!(
                    "Failed to read '{}': {}",
                    key, error
                )))
            }
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let path = self.path_for_key(key)?;
        logger::debug(&format!("FileKeyValueStore: Writing {} to {:?}", key, path));

        write_text_file_atomic(&path, value)
            .await
            .map_err(|error| DomainError::Persistence(format!("Failed to write '{}': {}", key, error)))
    }
}
