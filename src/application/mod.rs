// Application layer - use cases built on the domain traits
pub mod dto;
pub mod services;
