//! Durable archive of extracted stations and reports.
//!
//! Records are stored as JSON under their identity:
//! `stations/{id}.json` and `reports/{id}/{unix_seconds}.json`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{Station, StationId, StationReport};
use crate::store::KeyValueStore;

/// Identity-keyed record store.
///
/// Reads and writes are best-effort: failures are logged and reported as a
/// miss or `false`, never as errors.
#[derive(Debug, Clone)]
pub struct EntityArchive<S> {
    store: S,
}

impl<S: KeyValueStore> EntityArchive<S> {
    /// Create an archive over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Key under which a station descriptor is archived.
    pub fn station_key(id: StationId) -> String {
        format!("stations/{id}.json")
    }

    /// Key under which a report is archived.
    pub fn report_key(report: &StationReport) -> String {
        format!(
            "reports/{}/{}.json",
            report.station_id,
            report.timestamp.timestamp()
        )
    }

    /// Load an archived station descriptor.
    pub async fn load_station(&self, id: StationId) -> Option<Station> {
        self.load(&Self::station_key(id)).await
    }

    /// Archive a station descriptor.
    pub async fn save_station(&self, station: &Station) -> bool {
        self.save(&Self::station_key(station.id), station).await
    }

    /// Archive a report.
    pub async fn save_report(&self, report: &StationReport) -> bool {
        self.save(&Self::report_key(report), report).await
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.store.get(key).await {
            Ok(bytes) => bytes?,
            Err(e) => {
                warn!(key, error = %e, "archive read failed");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "archived record is unreadable, ignoring");
                None
            }
        }
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let json = match serde_json::to_vec_pretty(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize record");
                return false;
            }
        };

        match self.store.put(key, &json).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "archive write failed");
                false
            }
        }
    }
}
