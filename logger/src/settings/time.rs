use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use super::config::ConfigError;

pub const DEFAULT_TIMEZONE: &str = "Europe/Helsinki";

/// Resolves the local time zone: the configured one, then `CHRONO_TIMEZONE`, then the host's.
pub fn get_timezone(configured: Option<&str>) -> Result<Tz, ConfigError> {
    let from_env = dotenv::var("CHRONO_TIMEZONE").ok();
    let host = iana_time_zone::get_timezone().ok();

    resolve_timezone(configured, from_env.as_deref(), host.as_deref())
}

/// An explicit name (config or environment) must parse. A host zone unknown to chrono-tz
/// falls back to the default.
pub fn resolve_timezone(
    configured: Option<&str>,
    from_env: Option<&str>,
    host: Option<&str>,
) -> Result<Tz, ConfigError> {
    if let Some(timezone) = configured.or(from_env) {
        return timezone
            .parse()
            .map_err(|_| ConfigError::Timezone(timezone.to_string()));
    }

    if let Some(tz) = host.and_then(|host| host.parse::<Tz>().ok()) {
        return Ok(tz);
    }

    debug!("Host time zone unavailable, using {}", DEFAULT_TIMEZONE);
    Ok(chrono_tz::Europe::Helsinki)
}

/// Day-ahead prices are published for the local day after `now`.
pub fn get_target_day(now: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    let tz_now: DateTime<Tz> = now.with_timezone(tz);

    tz_now.date_naive() + Duration::days(1)
}
