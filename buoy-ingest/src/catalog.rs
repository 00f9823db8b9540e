//! Station catalog resolution.

use std::collections::BTreeSet;

use tracing::info;

use crate::domain::StationId;
use crate::extract::extract_station_ids;
use crate::instrument::timed;
use crate::ndbc::{NdbcClient, Transport};
use crate::store::KeyValueStore;

/// Errors resolving the station catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The index page could not be fetched
    #[error("station index page unavailable")]
    IndexUnavailable,
}

/// List every station linked from the index page.
///
/// An index page with no station links is an empty catalog, not an error.
pub async fn list_stations<T: Transport, S: KeyValueStore>(
    client: &NdbcClient<T, S>,
) -> Result<BTreeSet<StationId>, CatalogError> {
    timed("list_stations", async {
        let Some(body) = client.index_page().await else {
            return Err(CatalogError::IndexUnavailable);
        };
        let stations = extract_station_ids(&body);
        info!(count = stations.len(), "resolved station catalog");
        Ok(stations)
    })
    .await
}
