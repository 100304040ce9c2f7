use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_aux::field_attributes::deserialize_number_from_string;
use serde_json::{Map, Value};

/// Envelope returned by the spot price endpoint: `{"data": {"<market>": [...]}}`.
#[derive(Debug, Deserialize)]
pub struct SpotPriceResponse {
    pub data: Map<String, Value>,
}

impl SpotPriceResponse {
    /// Takes the price list of a single market out of the envelope.
    pub fn into_market(mut self, market: &str) -> Result<Vec<RawPricePoint>, anyhow::Error> {
        let prices = self
            .data
            .remove(market)
            .ok_or_else(|| anyhow::anyhow!("Market '{}' missing from the response", market))?;

        let prices: Vec<RawPricePoint> = serde_json::from_value(prices)?;
        Ok(prices)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPricePoint {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub price: f64,
}

impl RawPricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        RawPricePoint { timestamp, price }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Seconds(i64),
    FractionalSeconds(f64),
    Text(String),
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let parsed = match WireTimestamp::deserialize(deserializer)? {
        WireTimestamp::Seconds(seconds) => Utc.timestamp_opt(seconds, 0).single(),
        // Points are written with second precision; sub-second timestamps are rejected.
        WireTimestamp::FractionalSeconds(seconds) if seconds.fract() == 0.0 => {
            Utc.timestamp_opt(seconds as i64, 0).single()
        }
        WireTimestamp::FractionalSeconds(_) => None,
        WireTimestamp::Text(text) => match text.parse::<i64>() {
            Ok(seconds) => Utc.timestamp_opt(seconds, 0).single(),
            Err(_) => DateTime::parse_from_rfc3339(&text)
                .ok()
                .filter(|time| time.timestamp_subsec_nanos() == 0)
                .map(|time| time.with_timezone(&Utc)),
        },
    };

    parsed.ok_or_else(|| D::Error::custom("invalid price timestamp"))
}

/// Query window covering one whole day, in the format the endpoint expects.
#[derive(Debug, Clone, PartialEq)]
pub struct DayWindow {
    pub start: String,
    pub end: String,
}

impl DayWindow {
    pub fn for_day(day: NaiveDate) -> Self {
        let day = day.format("%Y-%m-%d");
        DayWindow {
            start: format!("{}T00:00:00.000Z", day),
            end: format!("{}T23:59:59.999Z", day),
        }
    }

    pub fn as_query(&self) -> [(&'static str, &str); 2] {
        [("start", &self.start), ("end", &self.end)]
    }
}
