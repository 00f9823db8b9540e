//! Trimmed-down copies of data buoy pages for tests.

/// Station index page listing three stations, one of them twice.
pub const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><title>NDBC - Station List</title></head>
<body>
<div id="contentarea">
  <h1>Station List</h1>
  <span class="stndesc">
    <a href="station_page.php?station=41001">41001</a> - EAST HATTERAS - 150 NM East of Cape Hatteras<br>
    <a href="station_page.php?station=46025">46025</a> - Santa Monica Basin - 33NM WSW of Santa Monica, CA<br>
    <a href="station_page.php?station=46086">46086</a> - San Clemente Basin - 27NM SE of San Clemente Is, CA<br>
  </span>
  <p>Featured: <a href="station_page.php?station=46086">San Clemente Basin</a></p>
  <p><a href="/obs.shtml">Observations</a> | <a href="/rss/">RSS feeds</a></p>
</div>
</body>
</html>
"#;

/// Detail page for station 46086 with metadata and a full report table.
pub const STATION_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head><title>NDBC Station Page</title></head>
<body>
<div id="contentarea">
  <h1 style="text-align:center;">Station 46086 (LLNJ 198) - San Clemente Basin
    <a href="/data/latest_obs/46086.rss"><img src="/images/rss.gif" alt="RSS"></a>
  </h1>
  <div id="stn_metadata">
    <p>Owned and maintained by National Data Buoy Center<br>
    3-meter foundation hull<br>
    <b>32.499 N 118.052 W (32&#176;29'56" N 118&#176;3'7" W)</b><br>
    Site elevation: sea level</p>
  </div>
  <table class="dataTable" style="width:100%;">
    <caption class="titleDataHeader">Conditions at 46086 as of<br>(11:50 pm PDT)<br>0650 GMT on 10/19/2026:
    </caption>
    <tr><td><a href="#"><img src="/images/maroon.gif" alt=""></a></td><td>Wind Direction (WDIR):</td><td>WNW ( 290 deg true )</td></tr>
    <tr><td></td><td>Wind Speed (WSPD):</td><td> 13.6 kts </td></tr>
    <tr><td></td><td>Wave Height (WVHT):</td><td> 4.9 ft </td></tr>
    <tr><td></td><td>Dominant Wave Period (DPD):</td><td> 13 sec </td></tr>
    <tr><td></td><td>Average Period (APD):</td><td> 6.5 sec </td></tr>
    <tr><td></td><td>Mean Wave Direction (MWD):</td><td>W ( 264 deg true )</td></tr>
    <tr><td></td><td>Atmospheric Pressure (PRES):</td><td> 29.93 in </td></tr>
    <tr><td></td><td>Water Temperature (WTMP):</td><td> 64.4 &#176;F </td></tr>
    <tr><td colspan="3">Data disclaimer</td></tr>
  </table>
</div>
</body>
</html>
"##;

/// Build a detail page whose report table has the given caption and
/// `(label, value)` rows.
pub fn report_page(caption: &str, rows: &[(&str, &str)]) -> String {
    let rows: String = rows
        .iter()
        .map(|(label, value)| format!("<tr><td></td><td>{label}</td><td>{value}</td></tr>\n"))
        .collect();

    format!(
        "<html><body><table>\n<caption class=\"titleDataHeader\">{caption}</caption>\n{rows}</table></body></html>"
    )
}
