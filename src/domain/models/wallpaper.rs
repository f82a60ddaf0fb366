use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// A single wallpaper in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallpaperRecord {
    /// Unique within the catalog; never reassigned
    pub id: String,

    /// Display name
    pub name: String,

    /// Grouping key; categories are the distinct values of this field
    pub category: String,

    /// Full-size remote locator, empty for bundled wallpapers
    #[serde(default)]
    pub image_url: String,

    /// Thumbnail remote locator, empty for bundled wallpapers
    #[serde(default)]
    pub thumbnail_url: String,

    /// Whether the image ships with the application
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_local: bool,

    /// Bundled asset key (`<Category>/<file>`), present only for local wallpapers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_image: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl WallpaperRecord {
    /// Create a wallpaper fetched over the network
    pub fn remote(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        image_url: impl Into<String>,
        thumbnail_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            image_url: image_url.into(),
            thumbnail_url: thumbnail_url.into(),
            is_local: false,
            local_image: None,
        }
    }

    /// Create a wallpaper backed by a bundled asset
    pub fn bundled(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        local_image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            image_url: String::new(),
            thumbnail_url: String::new(),
            is_local: true,
            local_image: Some(local_image.into()),
        }
    }

    /// Check the record invariants: non-empty id, name and category, and a
    /// resolvable image (bundled asset for local records, a URL otherwise).
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidData(
                "Wallpaper id cannot be empty".to_string(),
            ));
        }

        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return Err(DomainError::InvalidData(format!(
                "Wallpaper '{}' must have a name and a category",
                self.id
            )));
        }

        let has_locator = if self.is_local {
            self.local_image
                .as_deref()
                .is_some_and(|key| !key.trim().is_empty())
        } else {
            !self.image_url.is_empty() || !self.thumbnail_url.is_empty()
        };

        if !has_locator {
            return Err(DomainError::InvalidData(format!(
                "Wallpaper '{}' has no image locator",
                self.id
            )));
        }

        Ok(())
    }

    /// Case-insensitive substring match against name or category.
    /// `lowercase_query` must already be lowercased.
    pub fn matches_query(&self, lowercase_query: &str) -> bool {
        self.name.to_lowercase().contains(lowercase_query)
            || self.category.to_lowercase().contains(lowercase_query)
    }

    /// Best locator for a preview image
    pub fn preview_url(&self) -> &str {
        if self.thumbnail_url.is_empty() {
            &self.image_url
        } else {
            &self.thumbnail_url
        }
    }
}

/// A category with its cover image and size, as shown on the category grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_image: Option<String>,
    pub count: usize,
}

/// Turn a file name into a display name: drop the extension, replace
/// underscores with spaces and capitalize every word.
///
/// `sunset_over_tokyo.jpg` becomes `Sunset Over Tokyo`.
pub fn display_name_from_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    let stem = match base.rfind('.') {
        Some(index) if index > 0 => &base[..index],
        _ => base,
    };

    stem.replace('_', " ")
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_extension_and_capitalizes() {
        assert_eq!(
            display_name_from_filename("sunset_over_tokyo.jpg"),
            "Sunset Over Tokyo"
        );
        assert_eq!(display_name_from_filename("Anime/neo__city.PNG"), "Neo City");
        assert_eq!(display_name_from_filename("no_extension"), "No Extension");
        assert_eq!(display_name_from_filename(".hidden"), ".hidden");
    }

    #[test]
    fn validate_requires_locator_for_kind() {
        let remote = WallpaperRecord::remote("1", "Demon Slayer", "Anime", "https://a/b.jpg", "");
        assert!(remote.validate().is_ok());

        let missing_urls = WallpaperRecord::remote("2", "Empty", "Anime", "", "");
        assert!(matches!(
            missing_urls.validate(),
            Err(DomainError::InvalidData(_))
        ));

        let bundled = WallpaperRecord::bundled("anime_sky", "Sky", "Anime", "Anime/sky.jpg");
        assert!(bundled.validate().is_ok());

        let mut broken = bundled.clone();
        broken.local_image = None;
        assert!(broken.validate().is_err());

        let nameless = WallpaperRecord::remote("3", " ", "Anime", "https://a/b.jpg", "");
        assert!(nameless.validate().is_err());
    }

    #[test]
    fn serializes_with_camel_case_and_omits_local_fields_for_remote() {
        let remote = WallpaperRecord::remote("1", "Naruto", "Anime", "https://i/full.jpg", "https://i/thumb.jpg");
        let value = serde_json::to_value(&remote).unwrap();

        assert_eq!(value["imageUrl"], "https://i/full.jpg");
        assert_eq!(value["thumbnailUrl"], "https://i/thumb.jpg");
        assert!(value.get("isLocal").is_none());
        assert!(value.get("localImage").is_none());

        let bundled = WallpaperRecord::bundled("anime_sky", "Sky", "Anime", "Anime/sky.jpg");
        let value = serde_json::to_value(&bundled).unwrap();
        assert_eq!(value["isLocal"], true);
        assert_eq!(value["localImage"], "Anime/sky.jpg");
    }

    #[test]
    fn matches_query_checks_name_and_category() {
        let record = WallpaperRecord::remote("6", "Neo Tokyo", "Cyberpunk", "https://i/1.png", "");

        assert!(record.matches_query("tokyo"));
        assert!(record.matches_query("cyber"));
        assert!(record.matches_query(""));
        assert!(!record.matches_query("anime"));
    }
}
