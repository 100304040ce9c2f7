#[macro_use]
extern crate log;

pub mod models;

use http::header::{ACCEPT, USER_AGENT};
pub use models::*;

const SPOT_USER_AGENT: &str = concat!("spothinta/", env!("CARGO_PKG_VERSION"));

/// Fetches the day-ahead prices of `market` for the given window.
///
/// Any non-2xx status, transport error or unexpected JSON shape is returned as an error; the
/// request headers and the response body are only logged at debug level.
pub async fn get_spot_prices(
    client: &reqwest::Client,
    url: &str,
    window: &DayWindow,
    market: &str,
) -> Result<Vec<RawPricePoint>, anyhow::Error> {
    let request = client
        .get(url)
        .query(&window.as_query())
        .header(USER_AGENT, SPOT_USER_AGENT)
        .header(ACCEPT, "application/json")
        .build()?;

    debug!("GET {}", request.url());
    let headers = request.headers().clone();

    let res = client.execute(request).await?;
    let status = res.status();

    let data_str = res.text().await?;

    if !status.is_success() {
        debug!("Headers: {:?}", headers);
        debug!("Body: {}", data_str);
        return Err(anyhow::anyhow!("Spot price API responded with {}", status));
    }

    debug!("{}", data_str);

    let data: SpotPriceResponse = serde_json::from_str(&data_str)?;
    let prices = data.into_market(market)?;
    debug!("{} prices for market {}: {:?}", prices.len(), market, prices);

    Ok(prices)
}
