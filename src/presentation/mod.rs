// Presentation layer - commands called by the UI
pub mod commands;
pub mod errors;
