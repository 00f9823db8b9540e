//! Station identity and descriptor types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A buoy station identifier.
///
/// Station IDs are positive integers assigned by the data buoy center and
/// stable across runs. Any `StationId` value is positive by construction.
///
/// # Examples
///
/// ```
/// use buoy_ingest::domain::StationId;
///
/// let id = StationId::parse("46086").unwrap();
/// assert_eq!(id.get(), 46086);
///
/// // Zero is not a valid station
/// assert!(StationId::parse("0").is_err());
///
/// // Only ASCII digits are accepted
/// assert!(StationId::parse("46O86").is_err());
/// assert!(StationId::parse("-1").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StationId(u32);

impl StationId {
    /// Create a station ID from a raw integer.
    pub fn new(raw: u32) -> Result<Self, InvalidStationId> {
        if raw == 0 {
            return Err(InvalidStationId {
                reason: "must be positive",
            });
        }
        Ok(StationId(raw))
    }

    /// Parse a station ID from its decimal text form.
    ///
    /// The input must be non-empty ASCII digits that fit in a `u32`.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidStationId {
                reason: "must be ASCII digits",
            });
        }

        let raw = s.parse::<u32>().map_err(|_| InvalidStationId {
            reason: "out of range",
        })?;

        Self::new(raw)
    }

    /// Returns the raw integer value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for StationId {
    type Error = InvalidStationId;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<StationId> for u32 {
    fn from(id: StationId) -> Self {
        id.0
    }
}

impl FromStr for StationId {
    type Err = InvalidStationId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A buoy station descriptor, as published on its detail page.
///
/// Latitude and longitude keep the page's degree-plus-hemisphere text
/// (e.g. `"32.868 N"`); callers needing signed decimals convert themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub feed_url: String,
    pub latitude: String,
    pub longitude: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_ids() {
        assert_eq!(StationId::parse("46086").unwrap().get(), 46086);
        assert_eq!(StationId::parse("1").unwrap().get(), 1);
        assert_eq!(StationId::parse("007").unwrap().get(), 7);
    }

    #[test]
    fn reject_zero() {
        assert!(StationId::parse("0").is_err());
        assert!(StationId::new(0).is_err());
    }

    #[test]
    fn reject_non_digits() {
        assert!(StationId::parse("").is_err());
        assert!(StationId::parse("+5").is_err());
        assert!(StationId::parse("41 001").is_err());
        assert!(StationId::parse("SGOF1").is_err());
    }

    #[test]
    fn reject_overflow() {
        assert!(StationId::parse("99999999999").is_err());
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::parse("46086").unwrap();
        assert_eq!(id.to_string(), "46086");
        assert_eq!(format!("{:?}", id), "StationId(46086)");
    }

    #[test]
    fn serde_as_plain_integer() {
        let id = StationId::new(46086).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "46086");

        let back: StationId = serde_json::from_str("46086").unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<StationId>("0").is_err());
    }

    #[test]
    fn station_roundtrips_through_json() {
        let station = Station {
            id: StationId::new(46086).unwrap(),
            name: "Station 46086 - San Clemente Basin".to_string(),
            feed_url: "https://www.ndbc.noaa.gov/data/latest_obs/46086.rss".to_string(),
            latitude: "32.499 N".to_string(),
            longitude: "118.052 W".to_string(),
        };

        let json = serde_json::to_string(&station).unwrap();
        let back: Station = serde_json::from_str(&json).unwrap();
        assert_eq!(back, station);
    }
}
