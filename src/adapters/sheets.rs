pub mod auth;
pub mod cell_range;
pub mod grid;
pub mod http_client;
pub mod spreadsheet_format;
pub mod spreadsheet_manager;
pub mod spreadsheet_read;
pub mod spreadsheet_write;
pub mod value_range_factory;
