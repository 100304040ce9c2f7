use chrono_tz::Tz;
use spot_api::RawPricePoint;

use crate::settings::config_model::TariffConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedPricePoint {
    /// Epoch seconds
    pub timestamp: i64,
    pub spot_price: f64,
    pub total_price: f64,
}

/// Applies the tariffs to every raw point. One output per input, in input order.
pub fn compute(
    raw_points: &[RawPricePoint],
    tariffs: &TariffConfig,
    tz: &Tz,
) -> Vec<ComputedPricePoint> {
    raw_points
        .iter()
        .map(|raw| {
            let spot_price = tariffs.get_spot_price(raw.price);
            let total_price = tariffs.get_total_price(spot_price, raw.timestamp, tz);

            ComputedPricePoint {
                timestamp: raw.timestamp.timestamp(),
                spot_price,
                total_price,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use chrono_tz::Europe::Helsinki;

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn tariffs() -> TariffConfig {
        TariffConfig::new(2.79372, 0.3996, 2.15, 1.43, 24.0)
    }

    fn at_local_hour(hour: u32, price: f64) -> RawPricePoint {
        let time = Helsinki
            .with_ymd_and_hms(2024, 1, 15, hour, 0, 0)
            .unwrap()
            .with_timezone(&Utc);
        RawPricePoint::new(time, price)
    }

    #[test]
    fn test_spot_price_includes_vat() {
        let computed = compute(&[at_local_hour(12, 100.0)], &tariffs(), &Helsinki);
        assert!((computed[0].spot_price - 12.4).abs() < EPSILON);
    }

    #[test]
    fn test_night_price() {
        let raw = at_local_hour(3, 100.0);
        let computed = compute(&[raw.clone()], &tariffs(), &Helsinki);

        assert_eq!(computed[0].timestamp, raw.timestamp.timestamp());
        assert!((computed[0].spot_price - 12.4).abs() < EPSILON);
        assert!((computed[0].total_price - 17.02332).abs() < EPSILON);
    }

    #[test]
    fn test_day_price() {
        let computed = compute(&[at_local_hour(12, 100.0)], &tariffs(), &Helsinki);
        assert!((computed[0].total_price - 17.74332).abs() < EPSILON);
    }

    #[test]
    fn test_fee_selection_for_every_hour() {
        let tariffs = tariffs();
        let raw: Vec<RawPricePoint> = (0..24).map(|hour| at_local_hour(hour, 0.0)).collect();
        let computed = compute(&raw, &tariffs, &Helsinki);

        let base = tariffs.tax_rate + tariffs.margin;
        for (hour, point) in computed.iter().enumerate() {
            let fee = point.total_price - base;
            let expected = match hour {
                22 | 23 | 0..=6 => tariffs.night_fee,
                _ => tariffs.day_fee,
            };
            assert!((fee - expected).abs() < EPSILON, "hour {} used fee {}", hour, fee);
        }
    }

    #[test]
    fn test_boundary_hours() {
        let tariffs = tariffs();
        let raw = [
            at_local_hour(6, 0.0),
            at_local_hour(7, 0.0),
            at_local_hour(21, 0.0),
            at_local_hour(22, 0.0),
        ];
        let computed = compute(&raw, &tariffs, &Helsinki);
        let base = tariffs.tax_rate + tariffs.margin;

        assert!((computed[0].total_price - (base + tariffs.night_fee)).abs() < EPSILON);
        assert!((computed[1].total_price - (base + tariffs.day_fee)).abs() < EPSILON);
        assert!((computed[2].total_price - (base + tariffs.day_fee)).abs() < EPSILON);
        assert!((computed[3].total_price - (base + tariffs.night_fee)).abs() < EPSILON);
    }

    #[test]
    fn test_hour_is_taken_in_local_time() {
        // 05:00 UTC is 07:00 in Helsinki during winter
        let raw = RawPricePoint::new(Utc.with_ymd_and_hms(2024, 1, 15, 5, 0, 0).unwrap(), 0.0);
        let tariffs = tariffs();

        let helsinki = compute(&[raw.clone()], &tariffs, &Helsinki);
        let utc = compute(&[raw], &tariffs, &chrono_tz::UTC);

        let difference = helsinki[0].total_price - utc[0].total_price;
        assert!((difference - (tariffs.day_fee - tariffs.night_fee)).abs() < EPSILON);
    }

    #[test]
    fn test_order_and_count_preserved() {
        let raw = vec![
            at_local_hour(15, 30.0),
            at_local_hour(2, -5.0),
            at_local_hour(9, 250.5),
            at_local_hour(9, 250.5),
        ];
        let computed = compute(&raw, &tariffs(), &Helsinki);

        assert_eq!(computed.len(), raw.len());
        for (raw, point) in raw.iter().zip(computed.iter()) {
            assert_eq!(point.timestamp, raw.timestamp.timestamp());
        }
    }

    #[test]
    fn test_compute_is_deterministic() {
        let raw: Vec<RawPricePoint> = (0..24)
            .map(|hour| at_local_hour(hour, hour as f64 * 13.37))
            .collect();
        let tariffs = tariffs();

        let first = compute(&raw, &tariffs, &Helsinki);
        let second = compute(&raw, &tariffs, &Helsinki);

        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.spot_price.to_bits(), b.spot_price.to_bits());
            assert_eq!(a.total_price.to_bits(), b.total_price.to_bits());
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(compute(&[], &tariffs(), &Helsinki).is_empty());
    }
}
