use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The import payload is not valid JSON or its root is not an array.
    #[error("Invalid import format: {0}")]
    InvalidFormat(String),

    /// Nothing in the import payload passed validation.
    #[error("No valid wallpapers found: {0}")]
    EmptyImport(String),

    #[error("Sharing unavailable: {0}")]
    SharingUnavailable(String),

    /// A bundled asset could not be materialized to a file.
    #[error("Asset resolution error: {0}")]
    AssetResolution(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Every mechanism for saving or applying the image failed.
    #[error("Device action failed: {0}")]
    DeviceAction(String),

    /// The wallpaper could not be applied directly; the image was saved to
    /// the gallery and the user has to finish from the device settings.
    #[error("Manual action required: {0}")]
    ManualActionRequired(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}
