pub mod store_favorites_repository;
pub mod store_wallpaper_repository;
