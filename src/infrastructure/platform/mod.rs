pub mod file_system_device_gateway;
