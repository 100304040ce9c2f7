use thiserror::Error;

use crate::settings::config::ConfigError;

/// Failure of one pipeline phase. Each phase maps to its own process exit code so a
/// scheduler can tell from the status alone where a run stopped.
#[derive(Error, Debug)]
pub enum SpotError {
    #[error("Failed to fetch spot prices: {0:#}")]
    SourceFetch(anyhow::Error),
    #[error("Failed to write prices into InfluxDB: {0:#}")]
    SinkWrite(anyhow::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl SpotError {
    pub fn exit_code(&self) -> u8 {
        match self {
            SpotError::SourceFetch(_) => 1,
            SpotError::SinkWrite(_) => 2,
            SpotError::Config(_) => 3,
        }
    }
}
