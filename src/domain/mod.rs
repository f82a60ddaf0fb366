// Domain layer - models, errors and the interfaces the outer layers implement
pub mod errors;
pub mod models;
pub mod repositories;
