use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use coalsynth_core::{COAL_MOVEMENT_TABLE, InsertStatement, SqlValue};

use crate::errors::GenerationError;
use crate::trucks::{TruckPicker, TruckRoster};

/// Tonnes carried by one truck movement.
pub const DEFAULT_UNIT_SIZE: u32 = 220;
/// Window the daily tonnage is spread across.
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const ARRIVAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One truck arrival carrying a single unit of coal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRecord {
    pub coal: String,
    pub truck: String,
    pub arrival: NaiveDateTime,
}

impl MovementRecord {
    pub fn arrival_text(&self) -> String {
        self.arrival.format(ARRIVAL_FORMAT).to_string()
    }

    pub fn to_statement(&self) -> InsertStatement {
        InsertStatement::new(
            &COAL_MOVEMENT_TABLE,
            vec![
                SqlValue::text(self.coal.as_str()),
                SqlValue::text(self.truck.as_str()),
                SqlValue::text(self.arrival_text()),
            ],
        )
    }
}

/// Derives evenly spaced truck movements from a daily tonnage figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementSynthesizer {
    unit_size: u32,
}

impl MovementSynthesizer {
    pub fn new(unit_size: u32) -> Result<Self, GenerationError> {
        if unit_size == 0 {
            return Err(GenerationError::InvalidOptions(
                "unit size must be greater than zero".to_string(),
            ));
        }
        Ok(Self { unit_size })
    }

    pub fn unit_size(&self) -> u32 {
        self.unit_size
    }

    pub fn movement_count(&self, tonnage: u32) -> u32 {
        tonnage / self.unit_size
    }

    /// Seconds between consecutive movements, `None` when there are none.
    pub fn interval_seconds(&self, tonnage: u32) -> Option<f64> {
        match self.movement_count(tonnage) {
            0 => None,
            count => Some(SECONDS_PER_DAY / f64::from(count)),
        }
    }

    /// Movements for one coal entry, in arrival order.
    ///
    /// A running timestamp starts at `start` and advances by the interval,
    /// rounded to the millisecond, before each movement. The first truck
    /// therefore arrives one interval after `start`. When the interval does
    /// not divide a day evenly the last arrival falls just short of
    /// `start` plus one day.
    pub fn synthesize(
        &self,
        start: NaiveDateTime,
        coal: &str,
        tonnage: u32,
        roster: &TruckRoster,
        picker: &mut dyn TruckPicker,
    ) -> Result<Vec<MovementRecord>, GenerationError> {
        let Some(interval) = self.interval_seconds(tonnage) else {
            return Ok(Vec::new());
        };
        let count = self.movement_count(tonnage);
        let step = Duration::milliseconds((interval * 1000.0).round() as i64);

        let mut arrival = start;
        let mut movements = Vec::with_capacity(count as usize);
        for _ in 0..count {
            arrival = arrival.checked_add_signed(step).ok_or_else(|| {
                GenerationError::InvalidDate(format!("{arrival} + {step} is out of range"))
            })?;
            movements.push(MovementRecord {
                coal: coal.to_string(),
                truck: roster.pick(picker).to_string(),
                arrival,
            });
        }
        Ok(movements)
    }
}

impl Default for MovementSynthesizer {
    fn default() -> Self {
        Self {
            unit_size: DEFAULT_UNIT_SIZE,
        }
    }
}

/// Parse the date line of an input file. A bare date means midnight.
pub fn parse_date_stamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_utc()))
        .or_else(|| {
            ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"]
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_date_shapes() {
        let midnight = NaiveDate::from_ymd_opt(2024, 1, 31)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap();
        assert_eq!(parse_date_stamp("2024-01-31"), Some(midnight));
        assert_eq!(parse_date_stamp(" 2024/01/31 "), Some(midnight));
        assert_eq!(parse_date_stamp("31/01/2024"), Some(midnight));
        assert_eq!(
            parse_date_stamp("2024-01-31 06:30:00").map(|dt| dt.format("%H:%M").to_string()),
            Some("06:30".to_string())
        );
        assert_eq!(parse_date_stamp("yesterday"), None);
    }

    #[test]
    fn zero_unit_size_is_rejected() {
        assert!(MovementSynthesizer::new(0).is_err());
    }

    #[test]
    fn interval_is_absent_below_one_unit() {
        let synth = MovementSynthesizer::default();
        assert_eq!(synth.interval_seconds(219), None);
        assert_eq!(synth.interval_seconds(440), Some(43_200.0));
    }
}
