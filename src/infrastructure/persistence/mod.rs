// Persistence utilities
pub mod file_key_value_store;
pub mod file_system;
