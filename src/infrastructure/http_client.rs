use reqwest::{Client, ClientBuilder};

use crate::domain::errors::DomainError;

/// Product token sent with every image download
pub const APP_USER_AGENT: &str = concat!("WallpaperCatalog/", env!("CARGO_PKG_VERSION"));

/// Client used by the file-system device gateway for remote wallpapers.
/// No request timeout: a stalled download waits until the server gives up.
pub fn build_download_client(builder: ClientBuilder) -> Result<Client, DomainError> {
    builder.user_agent(APP_USER_AGENT).build().map_err(|error| {
        DomainError::InternalError(format!("Failed to build HTTP client: {}", error))
    })
}
