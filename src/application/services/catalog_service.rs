use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::errors::DomainError;
use crate::domain::models::wallpaper::{CategorySummary, WallpaperRecord};
use crate::domain::repositories::wallpaper_repository::WallpaperRepository;
use crate::infrastructure::logging::logger;

/// Owns the in-memory wallpaper catalog and keeps it in step with the
/// persisted copy.
///
/// Reads are synchronous scans over the in-memory list. The only way to
/// change the list is [`CatalogService::save`] (or [`CatalogService::append`],
/// which goes through it), and the list is replaced only after the store
/// write succeeded. Concurrent appends are not serialized: the last save wins.
pub struct CatalogService {
    repository: Arc<dyn WallpaperRepository>,
    defaults: Vec<WallpaperRecord>,
    wallpapers: RwLock<Vec<WallpaperRecord>>,
}

impl CatalogService {
    /// Create a catalog that starts out as `defaults` until initialized
    pub fn new(repository: Arc<dyn WallpaperRepository>, defaults: Vec<WallpaperRecord>) -> Self {
        Self {
            repository,
            wallpapers: RwLock::new(defaults.clone()),
            defaults,
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Vec<WallpaperRecord>> {
        self.wallpapers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Vec<WallpaperRecord>> {
        self.wallpapers.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the saved catalog, falling back to the defaults when nothing was
    /// saved or the saved copy cannot be read. Never fails.
    ///
    /// Stored records that break the record invariants are dropped, so the
    /// in-memory list always passes the validation [`CatalogService::save`]
    /// applies.
    pub async fn initialize(&self) -> Vec<WallpaperRecord> {
        let wallpapers = match self.repository.load_wallpapers().await {
            Ok(Some(stored)) => {
                let total = stored.len();
                let wallpapers = stored
                    .into_iter()
                    .filter(|wallpaper| match wallpaper.validate() {
                        Ok(()) => true,
                        Err(error) => {
                            logger::warn(&format!("Dropping stored wallpaper: {}", error));
                            false
                        }
                    })
                    .collect::<Vec<_>>();

                logger::info(&format!(
                    "Loaded {} of {} wallpapers from storage",
                    wallpapers.len(),
                    total
                ));
                wallpapers
            }
            Ok(None) => {
                logger::info("No stored wallpapers found, using defaults");
                self.defaults.clone()
            }
            Err(error) => {
                logger::error(&format!("Error initializing wallpapers: {}", error));
                self.defaults.clone()
            }
        };

        *self.write_state() = wallpapers.clone();
        wallpapers
    }

    /// Every wallpaper, in catalog order
    pub fn get_all(&self) -> Vec<WallpaperRecord> {
        logger::debug("CatalogService: Fetching all wallpapers");
        self.read_state().clone()
    }

    pub fn len(&self) -> usize {
        self.read_state().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_state().is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<WallpaperRecord> {
        let wallpaper = self
            .read_state()
            .iter()
            .find(|wallpaper| wallpaper.id == id)
            .cloned();

        if wallpaper.is_none() {
            logger::debug(&format!("No wallpaper found with ID: {}", id));
        }

        wallpaper
    }

    /// Wallpapers whose category equals `category` exactly (case-sensitive)
    pub fn get_by_category(&self, category: &str) -> Vec<WallpaperRecord> {
        let results = self
            .read_state()
            .iter()
            .filter(|wallpaper| wallpaper.category == category)
            .cloned()
            .collect::<Vec<_>>();

        logger::debug(&format!(
            "Category results: {} wallpapers found in \"{}\"",
            results.len(),
            category
        ));
        results
    }

    pub fn count_in_category(&self, category: &str) -> usize {
        self.read_state()
            .iter()
            .filter(|wallpaper| wallpaper.category == category)
            .count()
    }

    /// Case-insensitive substring search over name and category. An empty
    /// query matches everything.
    pub fn search(&self, query: &str) -> Vec<WallpaperRecord> {
        let lowercase_query = query.to_lowercase();
        let results = self
            .read_state()
            .iter()
            .filter(|wallpaper| wallpaper.matches_query(&lowercase_query))
            .cloned()
            .collect::<Vec<_>>();

        logger::debug(&format!(
            "Search results for {:?}: {} wallpapers found",
            query,
            results.len()
        ));
        results
    }

    /// Distinct categories, sorted
    pub fn get_all_categories(&self) -> Vec<String> {
        self.read_state()
            .iter()
            .map(|wallpaper| wallpaper.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// One entry per category in order of first appearance, using the first
    /// wallpaper of the category as its cover.
    pub fn category_summaries(&self) -> Vec<CategorySummary> {
        let wallpapers = self.read_state();
        let mut summaries: Vec<CategorySummary> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for wallpaper in wallpapers.iter() {
            match positions.get(wallpaper.category.as_str()) {
                Some(&position) => summaries[position].count += 1,
                None => {
                    positions.insert(wallpaper.category.as_str(), summaries.len());
                    summaries.push(CategorySummary {
                        category: wallpaper.category.clone(),
                        thumbnail_url: wallpaper.preview_url().to_string(),
                        local_image: wallpaper.local_image.clone(),
                        count: 1,
                    });
                }
            }
        }

        summaries
    }

    /// Persist `wallpapers` as the whole catalog and make it the in-memory
    /// state. Nothing changes in memory if validation or the write fails.
    pub async fn save(&self, wallpapers: Vec<WallpaperRecord>) -> Result<(), DomainError> {
        for wallpaper in &wallpapers {
            wallpaper.validate()?;
        }

        self.repository
            .save_wallpapers(&wallpapers)
            .await
            .map_err(|error| {
                logger::error(&format!("Error saving wallpapers: {}", error));
                match error {
                    DomainError::Persistence(_) => error,
                    other => DomainError::Persistence(other.to_string()),
                }
            })?;

        let count = wallpapers.len();
        *self.write_state() = wallpapers;
        logger::info(&format!("Saved {} wallpapers to storage", count));
        Ok(())
    }

    /// Append `additions` to the current catalog in a single save
    pub async fn append(&self, additions: Vec<WallpaperRecord>) -> Result<(), DomainError> {
        let mut merged = self.get_all();
        merged.extend(additions);
        self.save(merged).await
    }
}
