use std::convert::TryFrom;

use influxdb::{InfluxDbWriteable, Query, Timestamp, WriteQuery};

use crate::pricing::ComputedPricePoint;

pub const MEASUREMENT: &str = "prices";

impl ComputedPricePoint {
    pub fn to_write_query(&self) -> Result<WriteQuery, anyhow::Error> {
        let seconds = u128::try_from(self.timestamp)
            .map_err(|_| anyhow::anyhow!("Timestamp {} is before the epoch", self.timestamp))?;

        Ok(Timestamp::Seconds(seconds)
            .into_query(MEASUREMENT)
            .add_field("spot", self.spot_price)
            .add_field("total", self.total_price))
    }

    /// Single line protocol record: `prices spot=<spot>,total=<total> <seconds>`.
    pub fn to_line_protocol(&self) -> Result<String, anyhow::Error> {
        let query = self.to_write_query()?.build()?;

        Ok(query.get())
    }
}
