//! Station observation reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StationId;

/// One measurement as published: the cell text split on whitespace.
///
/// The unit suffix stays in place (`["4.2", "ft"]`) so malformed values
/// are kept rather than silently dropped by a numeric parse.
pub type Reading = Vec<String>;

/// A timestamped snapshot of wave and water observations for a station.
///
/// Every measurement is optional; a report carrying only a timestamp means
/// the station was online but no rows were recognised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationReport {
    pub station_id: StationId,
    pub timestamp: DateTime<Utc>,
    pub wave_height: Option<Reading>,
    pub wave_dominant_period: Option<Reading>,
    pub wave_average_period: Option<Reading>,
    pub wave_mean_degrees: Option<Reading>,
    pub water_temperature: Option<Reading>,
}

impl StationReport {
    /// Create a report with a timestamp and no measurements.
    pub fn new(station_id: StationId, timestamp: DateTime<Utc>) -> Self {
        Self {
            station_id,
            timestamp,
            wave_height: None,
            wave_dominant_period: None,
            wave_average_period: None,
            wave_mean_degrees: None,
            water_temperature: None,
        }
    }

    /// True if no measurement field was populated.
    pub fn is_empty(&self) -> bool {
        self.wave_height.is_none()
            && self.wave_dominant_period.is_none()
            && self.wave_average_period.is_none()
            && self.wave_mean_degrees.is_none()
            && self.water_temperature.is_none()
    }
}
