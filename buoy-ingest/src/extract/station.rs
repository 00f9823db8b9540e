//! Station descriptor extraction from a station detail page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::element_text;
use crate::domain::{Station, StationId};

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

static METADATA: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#stn_metadata").expect("valid selector"));

/// Decimal degrees plus hemisphere, latitude then longitude.
static COORDINATES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\d.]+ [NS]) ([\d.]+ [EW])").expect("valid regex"));

/// Site-relative path of a station's latest-observation feed.
fn feed_path(id: StationId) -> String {
    format!("/data/latest_obs/{id}.rss")
}

/// Extract a station descriptor from its detail page.
///
/// Returns `None` when the feed anchor, the metadata block, or the
/// coordinate pair is missing. `base_url` absolutises the feed link.
pub fn extract_station(body: &str, id: StationId, base_url: &str) -> Option<Station> {
    let document = Html::parse_document(body);
    let href = feed_path(id);

    let anchor = document
        .select(&ANCHOR)
        .find(|a| a.value().attr("href") == Some(href.as_str()))?;

    // The feed icon sits inside the heading that names the station
    let name = anchor
        .parent()
        .and_then(ElementRef::wrap)
        .map(element_text)
        .unwrap_or_else(|| element_text(anchor));

    let metadata = document.select(&METADATA).next().map(element_text)?;
    let caps = COORDINATES.captures(&metadata)?;

    Some(Station {
        id,
        name,
        feed_url: format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            href.trim_start_matches('/')
        ),
        latitude: caps[1].to_string(),
        longitude: caps[2].to_string(),
    })
}
