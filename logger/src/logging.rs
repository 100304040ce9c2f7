use tracing_subscriber::filter::LevelFilter;

use crate::settings::config_model::LoggingConfig;

/// Installs the global subscriber; `log` records are bridged into it.
pub fn init_logging(config: &LoggingConfig) -> Result<(), anyhow::Error> {
    let level = config.get_level_filter().unwrap_or(LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
