pub mod adapters;
pub mod config;
pub mod domain;
pub mod prettyprint;

// Re-export key types for easy access
pub use adapters::sheets::{
    grid::Grid,
    spreadsheet_format::SpreadsheetFormat,
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
    spreadsheet_read::{SpreadsheetRead, ValueRenderOption},
    spreadsheet_write::{SpreadsheetWrite, ValueInputOption},
};
pub use config::sheets_config::SpreadsheetConfig;
pub use domain::sheets::color::RgbColor;
