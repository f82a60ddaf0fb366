use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::picker::{PickedAsset, PickerResult};

/// Platform image picker
#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// Show the picker. With `allow_multiple` the user may pick several images.
    async fn pick_images(
        &self,
        allow_multiple: bool,
    ) -> Result<PickerResult<Vec<PickedAsset>>, DomainError>;
}

/// Platform document picker used to choose an import file
#[async_trait]
pub trait DocumentPicker: Send + Sync {
    /// Let the user choose a JSON document, returning a readable local path
    async fn pick_json_document(&self) -> Result<PickerResult<PathBuf>, DomainError>;
}
