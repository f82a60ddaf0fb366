pub mod device;
pub mod favorites;
pub mod picker;
pub mod wallpaper;
