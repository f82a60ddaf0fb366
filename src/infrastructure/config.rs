use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::infrastructure::default_catalog::DefaultCatalogSource;
use crate::infrastructure::logging::logger;
use crate::infrastructure::persistence::file_system::read_json_file;

/// Overrides the configured data root when set
pub const DATA_DIR_ENV: &str = "WALLPAPER_CATALOG_DATA_DIR";

/// Application configuration, read from an optional JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Root of the persisted store, caches and exports
    pub data_root: PathBuf,

    /// Directory for rolling log files
    pub log_dir: PathBuf,

    /// Catalog used until something has been saved
    pub default_catalog: DefaultCatalogSource,

    /// Where exported catalogs are written, `<data_root>/exports` when unset
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            log_dir: PathBuf::from("logs"),
            default_catalog: DefaultCatalogSource::default(),
            export_dir: None,
        }
    }
}

impl AppConfig {
    /// Load the configuration file at `path`. A missing file yields the
    /// defaults; a malformed one is an error.
    pub async fn load(path: &Path) -> Result<Self, DomainError> {
        let config = match read_json_file::<AppConfig>(path).await {
            Ok(config) => {
                logger::info(&format!("Loaded configuration from {:?}", path));
                config
            }
            Err(DomainError::NotFound(_)) => {
                logger::info(&format!(
                    "No configuration file at {:?}, using defaults",
                    path
                ));
                AppConfig::default()
            }
            Err(error) => return Err(error),
        };

        Ok(config.with_env_overrides(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from)))
    }

    /// Apply the data root taken from the environment, if any
    pub fn with_env_overrides(mut self, data_root: Option<PathBuf>) -> Self {
        if let Some(data_root) = data_root.filter(|path| !path.as_os_str().is_empty()) {
            self.data_root = data_root;
        }
        self
    }
}
