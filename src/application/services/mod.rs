pub mod acquisition_service;
pub mod catalog_service;
pub mod device_action_service;
pub mod favorites_service;
pub mod transfer_service;
