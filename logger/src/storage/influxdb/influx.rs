use crate::{
    client::build_client,
    error::SpotError,
    pricing::ComputedPricePoint,
    settings::config_model::{HttpConfig, SinkConfig},
};

/// Writes every point with its own POST to the InfluxDB 1.x `/write` endpoint.
///
/// The first failing write aborts the run; points already written stay in the database and
/// the remaining ones are never sent. Returns the number of points written.
pub async fn write_prices(
    config: &SinkConfig,
    http: &HttpConfig,
    points: &[ComputedPricePoint],
) -> Result<usize, SpotError> {
    info!("InfluxDB | Preparing to send {} prices to {}", points.len(), config.url);
    debug!("{:?}", points);

    let client = build_client(http).map_err(|err| SpotError::SinkWrite(err.into()))?;
    let params = [
        ("db", config.database.as_str()),
        ("rp", config.retention_policy.as_str()),
        ("precision", "s"),
        ("consistency", "one"),
    ];

    for point in points {
        let record = point.to_line_protocol().map_err(SpotError::SinkWrite)?;
        debug!("InfluxDB | {}", record);

        let request = client
            .post(&config.url)
            .query(&params)
            .basic_auth(&config.username, Some(&config.password))
            .body(record.clone())
            .build()
            .map_err(|err| SpotError::SinkWrite(err.into()))?;
        let headers = request.headers().clone();

        let res = match client.execute(request).await {
            Ok(res) => res,
            Err(err) => {
                debug!("Headers: {:?}", headers);
                debug!("Body: {}", record);
                return Err(SpotError::SinkWrite(err.into()));
            }
        };

        let status = res.status();
        if !status.is_success() {
            let data_str = res.text().await.unwrap_or_default();
            debug!("Headers: {:?}", headers);
            debug!("Body: {}", record);
            debug!("Response: {}", data_str);
            return Err(SpotError::SinkWrite(anyhow::anyhow!(
                "InfluxDB responded with {} for point {}",
                status,
                point.timestamp
            )));
        }
    }

    info!("InfluxDB | Data sent, {} prices written", points.len());

    Ok(points.len())
}
