use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use spot_api::{get_spot_prices, DayWindow, RawPricePoint};

use crate::{
    client::build_client,
    error::SpotError,
    pricing::compute,
    settings::{config_model::SettingsConfig, time::get_target_day},
    storage::influxdb::influx::write_prices,
};

/// Fetches the prices of the local day following `now`.
pub async fn fetch_prices(
    config: &SettingsConfig,
    tz: &Tz,
    now: DateTime<Utc>,
) -> Result<Vec<RawPricePoint>, SpotError> {
    let day = get_target_day(now, tz);
    let window = DayWindow::for_day(day);

    info!(
        "Retrieving {} spot prices for {} using {}",
        config.source.market, day, config.source.url
    );

    let client = build_client(&config.http).map_err(|err| SpotError::SourceFetch(err.into()))?;
    let prices = get_spot_prices(&client, &config.source.url, &window, &config.source.market)
        .await
        .map_err(SpotError::SourceFetch)?;

    info!("Data retrieved, {} prices", prices.len());

    Ok(prices)
}

/// One full run: fetch, apply tariffs, write. Returns the number of points written.
pub async fn run(config: &SettingsConfig, now: DateTime<Utc>) -> Result<usize, SpotError> {
    let tz = config.get_timezone()?;

    let raw_points = fetch_prices(config, &tz, now).await?;
    let points = compute(&raw_points, &config.tariffs, &tz);

    write_prices(&config.sink, &config.http, &points).await
}
