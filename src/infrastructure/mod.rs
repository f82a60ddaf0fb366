// Infrastructure layer - implements interfaces defined in the domain layer
pub mod assets;
pub mod config;
pub mod default_catalog;
pub mod http_client;
pub mod logging;
pub mod persistence;
pub mod platform;
pub mod repositories;
