use config::Config;
use error_stack::{report, ResultExt};
use serde::{de::IntoDeserializer, Deserialize};
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::{demo_config::DemoConfig, sheets_config::SpreadsheetConfig};

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "Config";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub sheets: SpreadsheetConfig,
    pub demo: DemoConfig,
}

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Error reading config file '{0}'")]
    Read(String),
    #[error("Failed to deserialize config file '{path}' at field '{field}'")]
    Deserialize { path: String, field: String },
}

impl AppConfig {
    /// Loads the file named by `CONFIG_PATH`, falling back to `Config.{toml,json,yaml,...}`.
    pub fn from_env() -> error_stack::Result<Self, ConfigLoadError> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(&config_path)
    }

    pub fn load(config_path: &str) -> error_stack::Result<Self, ConfigLoadError> {
        let value = Config::builder()
            .add_source(config::File::with_name(config_path))
            .build()
            .and_then(|config| config.try_deserialize::<serde_json::Value>())
            .change_context_lazy(|| ConfigLoadError::Read(config_path.to_string()))?;

        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|e| {
            let field = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();

            report!(ConfigLoadError::Deserialize {
                path: config_path.to_string(),
                field: field.trim_start_matches('.').to_string(),
            })
            .attach_printable(e.to_string())
            .attach_printable("Make sure all required fields are present in the configuration file.")
        })
    }
}
