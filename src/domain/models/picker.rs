use percent_encoding::percent_decode_str;
use url::Url;

/// An image chosen through the platform image picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedAsset {
    /// Locator of the picked image on the device
    pub uri: String,
    /// File name reported by the picker, if any
    pub file_name: Option<String>,
}

impl PickedAsset {
    pub fn new(uri: impl Into<String>, file_name: Option<String>) -> Self {
        Self {
            uri: uri.into(),
            file_name,
        }
    }

    /// The reported file name, or the last path segment of the uri.
    pub fn resolved_file_name(&self) -> Option<String> {
        if let Some(name) = self
            .file_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            return Some(name.to_string());
        }

        let path = match Url::parse(&self.uri) {
            Ok(url) => url.path().to_string(),
            Err(_) => self.uri.clone(),
        };

        path.rsplit(['/', '\\'])
            .next()
            .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
            .filter(|segment| !segment.trim().is_empty())
    }
}

/// Outcome of showing a picker. Cancellation is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerResult<T> {
    Cancelled,
    Picked(T),
}
