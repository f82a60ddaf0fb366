// Data Transfer Objects for commands
pub mod wallpaper_dto;
