use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::settings::config_model::SettingsConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to deserialize config.")]
    Serde(#[from] serde_yaml::Error),
    #[error("Failed to open config file")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(&'static str),
    #[error("Unknown time zone: {0}")]
    Timezone(String),
}

pub fn load_settings(path: impl AsRef<Path>) -> Result<SettingsConfig, ConfigError> {
    let mut file = File::open(path)?;
    let mut s = String::new();
    file.read_to_string(&mut s)?;

    parse_settings(&s)
}

pub fn parse_settings(s: &str) -> Result<SettingsConfig, ConfigError> {
    let t: SettingsConfig = serde_yaml::from_str(s)?;

    Ok(t)
}
