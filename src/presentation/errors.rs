use serde::Serialize;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Error returned to the UI. Every failure the user can act on has its own
/// variant so the UI can show a distinct message for it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum CommandError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid import file: {0}")]
    InvalidFormat(String),

    #[error("Nothing to import: {0}")]
    EmptyImport(String),

    #[error("Sharing unavailable: {0}")]
    SharingUnavailable(String),

    #[error("Device action failed: {0}")]
    DeviceActionFailed(String),

    #[error("Manual action required: {0}")]
    ManualActionRequired(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl CommandError {
    /// Short heading for the alert shown to the user
    pub fn title(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "Invalid request",
            Self::NotFound(_) => "Not found",
            Self::PermissionDenied(_) => "Permission needed",
            Self::InvalidFormat(_) => "Import failed",
            Self::EmptyImport(_) => "Nothing imported",
            Self::SharingUnavailable(_) => "Sharing unavailable",
            Self::DeviceActionFailed(_) => "Action failed",
            Self::ManualActionRequired(_) => "Almost done",
            Self::InternalServerError(_) => "Error",
        }
    }
}

impl From<DomainError> for CommandError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::NotFound(msg) => CommandError::NotFound(msg),
            DomainError::InvalidData(msg) => CommandError::BadRequest(msg),
            DomainError::PermissionDenied(msg) => CommandError::PermissionDenied(msg),
            DomainError::InvalidFormat(msg) => CommandError::InvalidFormat(msg),
            DomainError::EmptyImport(msg) => CommandError::EmptyImport(msg),
            DomainError::SharingUnavailable(msg) => CommandError::SharingUnavailable(msg),
            DomainError::DeviceAction(msg) => CommandError::DeviceActionFailed(msg),
            DomainError::ManualActionRequired(msg) => CommandError::ManualActionRequired(msg),
            DomainError::AssetResolution(msg) => CommandError::DeviceActionFailed(msg),
            DomainError::Persistence(msg) => CommandError::InternalServerError(msg),
            DomainError::InternalError(msg) => CommandError::InternalServerError(msg),
        }
    }
}
