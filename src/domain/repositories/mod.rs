pub mod device_gateway;
pub mod favorites_repository;
pub mod key_value_store;
pub mod picker_gateway;
pub mod share_target;
pub mod wallpaper_repository;
