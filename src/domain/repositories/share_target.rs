use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// Platform share sheet that exported files are handed to
#[async_trait]
pub trait ShareTarget: Send + Sync {
    async fn is_available(&self) -> bool;

    async fn share_file(&self, path: &Path) -> Result<(), DomainError>;
}
