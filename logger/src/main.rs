#[macro_use]
extern crate log;

use std::process::ExitCode;

use chrono::Utc;
use dotenv::dotenv;

use crate::error::SpotError;
use crate::settings::config_model::{LoggingConfig, SettingsConfig};

mod app;
mod client;
mod error;
mod logging;
mod pricing;
mod settings;
mod storage;

const SETTINGS_FILE: &str = "spothinta.yaml";

fn load_config() -> Result<SettingsConfig, SpotError> {
    let config = settings::config::load_settings(SETTINGS_FILE)?;
    config.validate()?;

    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            if let Err(log_err) = logging::init_logging(&LoggingConfig::default()) {
                eprintln!("Failed to initialize logging: {}", log_err);
            }
            error!("Failed to load {}: {}", SETTINGS_FILE, err);
            return ExitCode::from(err.exit_code());
        }
    };

    if let Err(err) = logging::init_logging(&config.logging) {
        eprintln!("Failed to initialize logging: {}", err);
    }

    info!("Spot price logger starting");

    match app::run(&config, Utc::now()).await {
        Ok(written) => {
            info!("Done, {} prices logged", written);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
