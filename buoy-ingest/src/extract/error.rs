//! Extraction error types.

use crate::domain::StationId;

/// A page element was present but its contents could not be understood.
///
/// Distinct from an extraction miss (`Ok(None)`): this signals that the
/// remote page format has changed under the extractor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// Report caption carried a GMT stamp that failed strict parsing
    #[error("station {station}: malformed report timestamp {text:?}: {source}")]
    MalformedTimestamp {
        station: StationId,
        text: String,
        source: chrono::ParseError,
    },
}

impl ExtractError {
    /// The station whose page produced this error.
    pub fn station(&self) -> StationId {
        match self {
            ExtractError::MalformedTimestamp { station, .. } => *station,
        }
    }
}
