use async_trait::async_trait;

use crate::domain::errors::DomainError;

/// String-keyed blob storage that outlives the process
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was ever written
    async fn get_item(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Replace the value stored under `key`
    async fn set_item(&self, key: &str, value: &str) -> Result<(), DomainError>;
}
