//! Cached fetch client for data buoy pages.
//!
//! Every request goes through the response cache first. On a miss the page
//! is fetched under a concurrency ceiling and a per-request deadline; any
//! failure to get a 2xx body is logged and reported as "no data".

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::archive::EntityArchive;
use crate::cache::{ResponseCache, Signature};
use crate::domain::{Station, StationId, StationReport};
use crate::extract::{ExtractError, extract_report, extract_station};
use crate::instrument::{timed, timed_sync};
use crate::store::KeyValueStore;

use super::error::TransportError;
use super::transport::Transport;

/// Default base URL of the data buoy center.
pub const DEFAULT_BASE_URL: &str = "https://www.ndbc.noaa.gov";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Default per-request deadline in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const INDEX_PATH: &str = "to_station.shtml";
const STATION_PATH: &str = "station_page.php";
const RADIAL_SEARCH_PATH: &str = "radial_search.php";

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct NdbcConfig {
    /// Base URL of the remote page source
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Per-request deadline in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl NdbcConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("buoy-ingest/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests. Zero is treated as one.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }

    /// Set request timeout. Zero is treated as one second.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// The per-request deadline.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for NdbcConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Data buoy page client.
///
/// Wraps a [`Transport`] with the response cache, and optionally an entity
/// archive for extracted stations and reports.
pub struct NdbcClient<T, S> {
    transport: T,
    cache: ResponseCache<S>,
    archive: Option<EntityArchive<S>>,
    base_url: String,
    deadline: Duration,
    semaphore: Arc<Semaphore>,
}

impl<T: Transport, S: KeyValueStore> NdbcClient<T, S> {
    /// Create a new client.
    pub fn new(transport: T, cache: ResponseCache<S>, config: &NdbcConfig) -> Self {
        Self {
            transport,
            cache,
            archive: None,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            deadline: config.timeout(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        }
    }

    /// Persist extracted records to `archive`, and serve stations from it.
    pub fn with_archive(mut self, archive: EntityArchive<S>) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Base URL with no trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a site-relative path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch a page, consulting the response cache first.
    ///
    /// Returns `None` for transport failures, timeouts and non-2xx statuses.
    /// A successful body is cached on a best-effort basis.
    pub async fn fetch(&self, url: &str, params: &[(&str, String)]) -> Option<String> {
        let signature = Signature::of(url, params);

        if let Some(body) = self.cache.get(&signature).await {
            return Some(body);
        }

        let response = {
            let Ok(_permit) = self.semaphore.acquire().await else {
                warn!(url, "request semaphore closed, treating as no data");
                return None;
            };

            timed("fetch", async {
                tokio::time::timeout(self.deadline, self.transport.get(url, params))
                    .await
                    .unwrap_or_else(|_| Err(TransportError::Timeout(self.deadline)))
            })
            .await
        };

        match response {
            Ok(response) if response.is_success() => {
                info!(url, ?params, status = response.status, "fetched");
                self.cache.put(&signature, &response.body).await;
                Some(response.body)
            }
            Ok(response) => {
                warn!(
                    url,
                    ?params,
                    status = response.status,
                    "non-success status, treating as no data"
                );
                None
            }
            Err(e) => {
                warn!(url, ?params, error = %e, "fetch failed, treating as no data");
                None
            }
        }
    }

    /// Fetch the station index page.
    pub async fn index_page(&self) -> Option<String> {
        self.fetch(&self.url(INDEX_PATH), &[]).await
    }

    /// Fetch a station's detail page.
    pub async fn station_page(&self, id: StationId) -> Option<String> {
        self.fetch(&self.url(STATION_PATH), &[("station", id.to_string())])
            .await
    }

    /// Fetch the radial search page around a point.
    ///
    /// `latitude` and `longitude` use the site's hemisphere-suffixed form,
    /// e.g. `"32.868N"` and `"117.267W"`. Distance is in statute miles.
    pub async fn radial_search(
        &self,
        latitude: &str,
        longitude: &str,
        distance: u32,
    ) -> Option<String> {
        let params = [
            ("lat1", latitude.to_string()),
            ("lon1", longitude.to_string()),
            ("dist", distance.to_string()),
            ("uom", "E".to_string()),
        ];
        self.fetch(&self.url(RADIAL_SEARCH_PATH), &params).await
    }

    /// Get a station descriptor, from the archive if present.
    pub async fn station(&self, id: StationId) -> Option<Station> {
        if let Some(archive) = &self.archive
            && let Some(station) = archive.load_station(id).await
        {
            debug!(station = %id, "station served from archive");
            return Some(station);
        }

        let body = self.station_page(id).await?;
        let station = timed_sync("extract_station", || {
            extract_station(&body, id, &self.base_url)
        });

        match &station {
            Some(station) => {
                if let Some(archive) = &self.archive {
                    archive.save_station(station).await;
                }
            }
            None => debug!(station = %id, "no station descriptor on page"),
        }

        station
    }

    /// Get the latest observation report for a station.
    ///
    /// A malformed report caption is an error; everything else that keeps a
    /// report from being read is `Ok(None)`.
    pub async fn station_report(
        &self,
        id: StationId,
    ) -> Result<Option<StationReport>, ExtractError> {
        let Some(body) = self.station_page(id).await else {
            return Ok(None);
        };

        let report = timed_sync("extract_report", || extract_report(&body, id))?;

        match &report {
            Some(report) => {
                if let Some(archive) = &self.archive {
                    archive.save_report(report).await;
                }
            }
            None => debug!(station = %id, "no report on page"),
        }

        Ok(report)
    }
}
