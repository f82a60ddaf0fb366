pub mod device_commands;
pub mod favorite_commands;
pub mod helpers;
pub mod transfer_commands;
pub mod upload_commands;
pub mod wallpaper_commands;
