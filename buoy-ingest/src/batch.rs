//! Concurrent per-station fetch and extraction.
//!
//! One unit of work per station, all driven together until every unit has
//! finished. A station that yields nothing is recorded as absent and never
//! affects its siblings. Dropping or cancelling a batch drops every unit
//! still in flight.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

use crate::domain::{Station, StationId, StationReport};
use crate::extract::ExtractError;
use crate::instrument::timed;
use crate::ndbc::{NdbcClient, Transport};
use crate::store::KeyValueStore;

/// What one per-station operation produced.
pub type StationOutcome<T> = Result<Option<T>, ExtractError>;

/// Best-effort result of a completed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult<T> {
    /// Records extracted, by station.
    pub records: BTreeMap<StationId, T>,

    /// Stations that yielded no record (no data or nothing to extract).
    pub absent: BTreeSet<StationId>,

    /// Stations whose pages could not be understood.
    pub diagnostics: Vec<ExtractError>,
}

impl<T> BatchResult<T> {
    fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            absent: BTreeSet::new(),
            diagnostics: Vec::new(),
        }
    }

    fn record(&mut self, id: StationId, outcome: StationOutcome<T>) {
        match outcome {
            Ok(Some(record)) => {
                self.records.insert(id, record);
            }
            Ok(None) => {
                debug!(station = %id, "station absent");
                self.absent.insert(id);
            }
            Err(e) => {
                warn!(station = %id, error = %e, "extraction malformation");
                self.diagnostics.push(e);
            }
        }
    }

    /// Number of stations the batch accounted for.
    pub fn attempted(&self) -> usize {
        self.records.len() + self.absent.len() + self.diagnostics.len()
    }

    /// Look up one station's record.
    pub fn get(&self, id: StationId) -> Option<&T> {
        self.records.get(&id)
    }
}

/// The batch was cancelled before every station finished.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("batch cancelled after {completed} of {total} stations")]
pub struct BatchCancelled {
    pub completed: usize,
    pub total: usize,
}

fn units<F, Fut, T>(
    ids: &BTreeSet<StationId>,
    op: &F,
) -> FuturesUnordered<impl Future<Output = (StationId, StationOutcome<T>)>>
where
    F: Fn(StationId) -> Fut,
    Fut: Future<Output = StationOutcome<T>>,
{
    ids.iter()
        .map(|&id| async move { (id, op(id).await) })
        .collect()
}

/// Run `op` for every station and wait for all of them.
pub async fn fetch_all<I, F, Fut, T>(ids: I, op: F) -> BatchResult<T>
where
    I: IntoIterator<Item = StationId>,
    F: Fn(StationId) -> Fut,
    Fut: Future<Output = StationOutcome<T>>,
{
    let ids: BTreeSet<StationId> = ids.into_iter().collect();

    timed("fetch_all", async {
        let mut result = BatchResult::new();
        let mut pending = units(&ids, &op);

        while let Some((id, outcome)) = pending.next().await {
            result.record(id, outcome);
        }

        summarize(&result);
        result
    })
    .await
}

/// Run `op` for every station, stopping early if `cancel` resolves first.
///
/// On cancellation every unit still running is dropped and the partial
/// results are discarded; the error says how far the batch got.
pub async fn fetch_all_until<I, F, Fut, T, C>(
    ids: I,
    op: F,
    cancel: C,
) -> Result<BatchResult<T>, BatchCancelled>
where
    I: IntoIterator<Item = StationId>,
    F: Fn(StationId) -> Fut,
    Fut: Future<Output = StationOutcome<T>>,
    C: Future<Output = ()>,
{
    let ids: BTreeSet<StationId> = ids.into_iter().collect();
    let total = ids.len();

    timed("fetch_all", async {
        let mut result = BatchResult::new();
        let mut pending = units(&ids, &op);
        tokio::pin!(cancel);

        loop {
            tokio::select! {
                biased;
                () = &mut cancel => {
                    let cancelled = BatchCancelled {
                        completed: result.attempted(),
                        total,
                    };
                    warn!(completed = cancelled.completed, total, "batch cancelled");
                    return Err(cancelled);
                }
                next = pending.next() => match next {
                    Some((id, outcome)) => result.record(id, outcome),
                    None => break,
                },
            }
        }

        summarize(&result);
        Ok(result)
    })
    .await
}

fn summarize<T>(result: &BatchResult<T>) {
    info!(
        records = result.records.len(),
        absent = result.absent.len(),
        malformed = result.diagnostics.len(),
        "batch complete"
    );
}

/// Fetch station descriptors for every station.
pub async fn fetch_stations<T, S, C>(
    client: &NdbcClient<T, S>,
    ids: impl IntoIterator<Item = StationId>,
    cancel: C,
) -> Result<BatchResult<Station>, BatchCancelled>
where
    T: Transport,
    S: KeyValueStore,
    C: Future<Output = ()>,
{
    fetch_all_until(
        ids,
        move |id| async move { Ok::<_, ExtractError>(client.station(id).await) },
        cancel,
    )
    .await
}

/// Fetch the latest report for every station.
pub async fn fetch_reports<T, S, C>(
    client: &NdbcClient<T, S>,
    ids: impl IntoIterator<Item = StationId>,
    cancel: C,
) -> Result<BatchResult<StationReport>, BatchCancelled>
where
    T: Transport,
    S: KeyValueStore,
    C: Future<Output = ()>,
{
    fetch_all_until(ids, move |id| client.station_report(id), cancel).await
}
