//! Observation report extraction from a station detail page.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{ExtractError, element_text};
use crate::domain::{Reading, StationId, StationReport};

static CAPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("caption.titleDataHeader").expect("valid selector"));

static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));

static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("valid selector"));

/// The GMT stamp closing a report caption, e.g. `0650 GMT on 10/19/2026:`.
static CAPTION_STAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4} GMT .+):$").expect("valid regex"));

static DEGREES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+ deg)").expect("valid regex"));

const STAMP_FORMAT: &str = "%H%M GMT on %m/%d/%Y";

/// Maps a row label prefix to the report field it fills.
struct FieldRule {
    label: &'static str,
    read: fn(&str) -> Option<Reading>,
    store: fn(&mut StationReport, Reading),
}

/// Checked in order; the first matching prefix wins.
const FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        label: "Wave Height",
        read: read_tokens,
        store: |r, v| r.wave_height = Some(v),
    },
    FieldRule {
        label: "Dominant Wave Period",
        read: read_tokens,
        store: |r, v| r.wave_dominant_period = Some(v),
    },
    FieldRule {
        label: "Average Period",
        read: read_tokens,
        store: |r, v| r.wave_average_period = Some(v),
    },
    FieldRule {
        label: "Mean Wave Direction",
        read: read_degrees,
        store: |r, v| r.wave_mean_degrees = Some(v),
    },
    FieldRule {
        label: "Water Temperature",
        read: read_tokens,
        store: |r, v| r.water_temperature = Some(v),
    },
];

fn read_tokens(text: &str) -> Option<Reading> {
    Some(text.split_whitespace().map(str::to_string).collect())
}

/// Direction cells read like `NNE ( 38 deg true )`; keep only `38 deg`.
fn read_degrees(text: &str) -> Option<Reading> {
    DEGREES.captures(text).and_then(|caps| read_tokens(&caps[1]))
}

fn parse_stamp(text: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, STAMP_FORMAT).map(|dt| dt.and_utc())
}

/// Extract the latest observation report from a station detail page.
///
/// Returns `Ok(None)` when the page has no report caption or the caption
/// carries no GMT stamp. A stamp that is present but fails strict parsing is
/// an [`ExtractError::MalformedTimestamp`].
pub fn extract_report(body: &str, id: StationId) -> Result<Option<StationReport>, ExtractError> {
    let document = Html::parse_document(body);

    let Some(caption) = document.select(&CAPTION).next() else {
        return Ok(None);
    };

    let caption_text = element_text(caption);
    let Some(stamp) = CAPTION_STAMP.captures(&caption_text).map(|caps| caps[1].to_string()) else {
        return Ok(None);
    };

    let timestamp = parse_stamp(&stamp).map_err(|source| ExtractError::MalformedTimestamp {
        station: id,
        text: stamp.clone(),
        source,
    })?;

    let mut report = StationReport::new(id, timestamp);

    let Some(table) = caption.parent().and_then(ElementRef::wrap) else {
        return Ok(Some(report));
    };

    for row in table.select(&ROW) {
        let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
        if cells.len() < 3 {
            continue;
        }

        let label = element_text(cells[1]);
        let Some(rule) = FIELD_RULES.iter().find(|rule| label.starts_with(rule.label)) else {
            continue;
        };

        let value: String = cells[2].text().collect();
        if let Some(reading) = (rule.read)(&value) {
            (rule.store)(&mut report, reading);
        }
    }

    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::fixtures;
    use chrono::TimeZone;

    fn id() -> StationId {
        StationId::new(46086).unwrap()
    }

    fn tokens(parts: &[&str]) -> Option<Reading> {
        Some(parts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn extracts_all_fields() {
        let report = extract_report(fixtures::STATION_PAGE, id()).unwrap().unwrap();

        assert_eq!(report.station_id, id());
        assert_eq!(
            report.timestamp,
            Utc.with_ymd_and_hms(2026, 10, 19, 6, 50, 0).unwrap()
        );
        assert_eq!(report.wave_height, tokens(&["4.9", "ft"]));
        assert_eq!(report.wave_dominant_period, tokens(&["13", "sec"]));
        assert_eq!(report.wave_average_period, tokens(&["6.5", "sec"]));
        assert_eq!(report.wave_mean_degrees, tokens(&["264", "deg"]));
        assert_eq!(report.water_temperature, tokens(&["64.4", "°F"]));
    }

    #[test]
    fn unmatched_labels_are_ignored() {
        let page = fixtures::report_page(
            "Conditions at 46086 as of (11:50 pm PDT) 0650 GMT on 10/19/2026:",
            &[
                ("Wave Height (WVHT):", "4.2 ft"),
                ("Air Pressure (PRES):", "30.1 in"),
                (
                    "Mean Wave Direction (MWD):",
                    "(from the NNE) some text 38 deg",
                ),
            ],
        );

        let report = extract_report(&page, id()).unwrap().unwrap();
        assert_eq!(report.wave_height, tokens(&["4.2", "ft"]));
        assert_eq!(report.wave_mean_degrees, tokens(&["38", "deg"]));
        assert_eq!(report.wave_dominant_period, None);
        assert_eq!(report.wave_average_period, None);
        assert_eq!(report.water_temperature, None);
    }

    #[test]
    fn zero_matching_rows_is_a_valid_empty_report() {
        let page = fixtures::report_page(
            "Conditions at 46086 as of 0650 GMT on 10/19/2026:",
            &[("Wind Speed (WSPD):", "5.8 kts"), ("Air Temperature (ATMP):", "61.3 °F")],
        );

        let report = extract_report(&page, id()).unwrap().unwrap();
        assert_eq!(
            report.timestamp,
            Utc.with_ymd_and_hms(2026, 10, 19, 6, 50, 0).unwrap()
        );
        assert!(report.is_empty());
    }

    #[test]
    fn direction_without_degrees_stays_absent() {
        let page = fixtures::report_page(
            "Conditions at 46086 as of 0650 GMT on 10/19/2026:",
            &[("Mean Wave Direction (MWD):", "NNE")],
        );

        let report = extract_report(&page, id()).unwrap().unwrap();
        assert_eq!(report.wave_mean_degrees, None);
    }

    #[test]
    fn label_match_is_prefix_and_case_sensitive() {
        let page = fixtures::report_page(
            "Conditions at 46086 as of 0650 GMT on 10/19/2026:",
            &[
                ("wave height (WVHT):", "4.2 ft"),
                ("Significant Wave Height:", "4.2 ft"),
                ("Water Temperature (WTMP):", "64.4 °F"),
            ],
        );

        let report = extract_report(&page, id()).unwrap().unwrap();
        assert_eq!(report.wave_height, None);
        assert_eq!(report.water_temperature, tokens(&["64.4", "°F"]));
    }

    #[test]
    fn short_rows_are_skipped() {
        let page = r#"<html><body><table>
            <caption class="titleDataHeader">0650 GMT on 10/19/2026:</caption>
            <tr><td>Wave Height (WVHT):</td><td>4.2 ft</td></tr>
        </table></body></html>"#;

        let report = extract_report(page, id()).unwrap().unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn missing_caption_is_absent() {
        let page = r#"<html><body><table>
            <caption class="otherHeader">0650 GMT on 10/19/2026:</caption>
        </table></body></html>"#;

        assert_eq!(extract_report(page, id()).unwrap(), None);
        assert_eq!(extract_report("", id()).unwrap(), None);
    }

    #[test]
    fn caption_without_stamp_is_absent() {
        let page = fixtures::report_page("Conditions at 46086 are unavailable", &[]);
        assert_eq!(extract_report(&page, id()).unwrap(), None);
    }

    #[test]
    fn malformed_stamp_is_an_error() {
        let page =
            fixtures::report_page("Conditions at 46086 as of 1234 GMT whenever on a boat:", &[]);

        let err = extract_report(&page, id()).unwrap_err();
        match err {
            ExtractError::MalformedTimestamp { station, text, .. } => {
                assert_eq!(station, id());
                assert_eq!(text, "1234 GMT whenever on a boat");
            }
        }
    }

    #[test]
    fn out_of_range_time_is_an_error() {
        let page = fixtures::report_page("Conditions at 46086 as of 2561 GMT on 10/19/2026:", &[]);
        assert!(extract_report(&page, id()).is_err());
    }
}
