//! HTML extraction for data buoy pages.
//!
//! Pure functions from a page body to typed records: no network, no disk.
//! A missing page element yields `None`; a present-but-unparsable one
//! yields an [`ExtractError`].

mod catalog;
mod error;
mod report;
mod station;

#[cfg(test)]
pub(crate) mod fixtures;

use scraper::ElementRef;

pub use catalog::extract_station_ids;
pub use error::ExtractError;
pub use report::extract_report;
pub use station::extract_station;

/// Text content of an element with whitespace runs collapsed to one space.
fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
