//! Station catalog extraction from the index page.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::domain::StationId;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

static STATION_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"station_page\.php\?station=(\d+)$").expect("valid regex"));

/// Collect the distinct station IDs linked from an index page.
///
/// Links whose digit group is not a valid station ID are skipped.
pub fn extract_station_ids(body: &str) -> BTreeSet<StationId> {
    let document = Html::parse_document(body);

    document
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| STATION_LINK.captures(href))
        .filter_map(|caps| StationId::parse(&caps[1]).ok())
        .collect()
}
