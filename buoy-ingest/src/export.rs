//! Export of batch results to a key-value target.
//!
//! Layout: `stations.json` holds every extracted station as one list, and
//! each report lands in `report/{id}.json`.

use tracing::info;

use crate::batch::BatchResult;
use crate::domain::{Station, StationReport};
use crate::store::{KeyValueStore, StoreError};

/// Key of the combined station list.
pub const STATIONS_KEY: &str = "stations.json";

/// Errors exporting results.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Serialization failed
    #[error("failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },

    /// Writing to the target failed
    #[error("failed to write {key}: {source}")]
    Store { key: String, source: StoreError },
}

async fn write_json<S, T>(target: &S, key: String, value: &T) -> Result<(), ExportError>
where
    S: KeyValueStore,
    T: serde::Serialize + ?Sized,
{
    let json = serde_json::to_vec(value).map_err(|source| ExportError::Serialize {
        key: key.clone(),
        source,
    })?;

    target
        .put(&key, &json)
        .await
        .map_err(|source| ExportError::Store { key, source })
}

/// Key under which a station's report is exported.
pub fn report_key(report: &StationReport) -> String {
    format!("report/{}.json", report.station_id)
}

/// Write all extracted stations as a single list. Returns the station count.
pub async fn export_stations<S: KeyValueStore>(
    target: &S,
    result: &BatchResult<Station>,
) -> Result<usize, ExportError> {
    let stations: Vec<&Station> = result.records.values().collect();
    write_json(target, STATIONS_KEY.to_string(), &stations).await?;

    info!(count = stations.len(), key = STATIONS_KEY, "exported stations");
    Ok(stations.len())
}

/// Write one object per extracted report. Returns the report count.
///
/// Stops at the first failed write.
pub async fn export_reports<S: KeyValueStore>(
    target: &S,
    result: &BatchResult<StationReport>,
) -> Result<usize, ExportError> {
    for report in result.records.values() {
        write_json(target, report_key(report), report).await?;
    }

    info!(count = result.records.len(), "exported reports");
    Ok(result.records.len())
}
