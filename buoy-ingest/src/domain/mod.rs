//! Domain types for buoy observations.
//!
//! Records here are only ever built by successful extraction and are never
//! mutated afterwards.

mod report;
mod station;

pub use report::{Reading, StationReport};
pub use station::{InvalidStationId, Station, StationId};
