use std::time::Duration;

use crate::settings::config_model::HttpConfig;

/// Shared HTTP client setup. Without a configured timeout requests wait indefinitely.
pub fn build_client(config: &HttpConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::ClientBuilder::new();
    if let Some(seconds) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }

    builder.build()
}
