use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Permissions requested from the platform before touching the media library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionKind {
    MediaLibraryRead,
    MediaLibraryWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Which screen a wallpaper should be applied to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallpaperTarget {
    Home,
    Lock,
    #[default]
    Both,
}

impl WallpaperTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Lock => "lock",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for WallpaperTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WallpaperTarget {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "lock" => Ok(Self::Lock),
            "both" => Ok(Self::Both),
            other => Err(DomainError::InvalidData(format!(
                "Invalid wallpaper target: {}",
                other
            ))),
        }
    }
}

/// Where the bytes of an image come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Remote URL, downloaded before use
    Remote(String),
    /// Bundled asset key, materialized from the embedded table
    Bundled(String),
}

/// Result of asking the platform to set the wallpaper in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectSetOutcome {
    Applied,
    Unsupported,
}

/// System hand-offs tried when no direct-set capability applied the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemFallback {
    /// "Set as..." chooser for the image
    AttachData,
    /// Open the image in a viewer that offers "Set as wallpaper"
    View,
}

/// One step of the set-as-wallpaper chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallpaperStrategy {
    DirectSet,
    System(SystemFallback),
}

/// Tagged result of a single strategy attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    Succeeded,
    Unsupported,
    Failed(String),
}

/// How a set-as-wallpaper request was satisfied. Callers treat every
/// variant except `Applied` as "may need manual follow-up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WallpaperApplyOutcome {
    /// Applied in place
    Applied,
    /// Handed to a system chooser/viewer to finish
    HandedToSystem,
    /// Platform cannot set wallpapers; the image was saved to the gallery
    SavedToGallery,
}
