pub mod app_config;
pub mod demo_config;
pub mod sheets_config;
