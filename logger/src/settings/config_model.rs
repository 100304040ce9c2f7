use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

use super::config::ConfigError;
use super::time::get_timezone;

fn default_market() -> String {
    "fi".to_string()
}

fn default_database() -> String {
    "electricity".to_string()
}

fn default_retention_policy() -> String {
    "autogen".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourceConfig {
    pub url: String,
    #[serde(default = "default_market")]
    pub market: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TariffConfig {
    pub tax_rate: f64,
    pub margin: f64,
    pub day_fee: f64,
    pub night_fee: f64,
    pub vat: f64,
    night_start_hour: Option<u32>,
    night_end_hour: Option<u32>,
}

impl TariffConfig {
    #[cfg(test)]
    pub fn new(tax_rate: f64, margin: f64, day_fee: f64, night_fee: f64, vat: f64) -> Self {
        TariffConfig {
            tax_rate,
            margin,
            day_fee,
            night_fee,
            vat,
            night_start_hour: None,
            night_end_hour: None,
        }
    }

    pub fn get_night_start_hour(&self) -> u32 {
        self.night_start_hour.unwrap_or(22)
    }

    pub fn get_night_end_hour(&self) -> u32 {
        self.night_end_hour.unwrap_or(7)
    }

    /// Night is `[night_start_hour, night_end_hour)`, wrapping past midnight when start > end.
    pub fn is_night_hour(&self, hour: u32) -> bool {
        let start = self.get_night_start_hour();
        let end = self.get_night_end_hour();

        if start > end {
            hour >= start || hour < end
        } else {
            start <= hour && hour < end
        }
    }

    pub fn get_is_night(&self, time: DateTime<Utc>, tz: &Tz) -> bool {
        let local = time.with_timezone(tz);
        self.is_night_hour(local.hour())
    }

    pub fn get_transfer_fee(&self, time: DateTime<Utc>, tz: &Tz) -> f64 {
        if self.get_is_night(time, tz) {
            self.night_fee
        } else {
            self.day_fee
        }
    }

    /// Source price is per MWh; the result is per kWh with VAT applied.
    pub fn get_spot_price(&self, price: f64) -> f64 {
        (price / 10.0) * (1.0 + self.vat / 100.0)
    }

    pub fn get_total_price(&self, spot_price: f64, time: DateTime<Utc>, tz: &Tz) -> f64 {
        spot_price + self.tax_rate + self.margin + self.get_transfer_fee(time, tz)
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        let start = self.get_night_start_hour();
        let end = self.get_night_end_hour();

        if start > 23 || end > 23 {
            return Err("Night window hours must be between 0 and 23");
        }

        if start == end {
            return Err("Night window start and end hours must differ");
        }

        if self.vat.is_nan() || self.vat < 0.0 {
            return Err("VAT must be zero or positive");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SinkConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_retention_policy")]
    pub retention_policy: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    pub fn get_level_filter(&self) -> Option<LevelFilter> {
        self.level.parse().ok()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SettingsConfig {
    pub timezone: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub source: SourceConfig,
    pub tariffs: TariffConfig,
    pub sink: SinkConfig,
}

impl SettingsConfig {
    pub fn get_timezone(&self) -> Result<Tz, ConfigError> {
        get_timezone(self.timezone.as_deref())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if Url::parse(&self.source.url).is_err() {
            return Err(ConfigError::Validation("source.url is not a valid URL"));
        }

        if self.source.market.is_empty() {
            return Err(ConfigError::Validation("source.market must not be empty"));
        }

        if Url::parse(&self.sink.url).is_err() {
            return Err(ConfigError::Validation("sink.url is not a valid URL"));
        }

        if self.sink.database.is_empty() {
            return Err(ConfigError::Validation("sink.database must not be empty"));
        }

        if self.logging.get_level_filter().is_none() {
            return Err(ConfigError::Validation("logging.level is not a known level"));
        }

        self.tariffs.validate().map_err(ConfigError::Validation)?;
        self.get_timezone()?;

        Ok(())
    }
}
