//! Driver configuration from environment variables.

use std::path::PathBuf;

use crate::ndbc::{DEFAULT_BASE_URL, NdbcConfig};

/// Error raised when a configured value cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value {value:?} for {var}: expected {expected}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Configuration for one ingest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Base URL of the remote page source.
    pub base_url: String,

    /// Root of the durable response cache.
    pub cache_dir: PathBuf,

    /// Root of the station/report archive.
    pub archive_dir: PathBuf,

    /// Root the batch results are exported to.
    pub output_dir: PathBuf,

    /// Per-request deadline in seconds.
    pub timeout_secs: u64,

    /// Maximum requests in flight at once.
    pub max_concurrent: usize,
}

impl IngestConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to read variables. Unset variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let timeout_secs =
            positive_var::<u64>(&lookup, "BUOY_TIMEOUT_SECS", "a positive number of seconds")?
                .unwrap_or(defaults.timeout_secs);

        let max_concurrent =
            positive_var::<usize>(&lookup, "BUOY_MAX_CONCURRENT", "a positive integer")?
                .unwrap_or(defaults.max_concurrent);

        Ok(Self {
            base_url: lookup("NDBC_BASE_URL").unwrap_or(defaults.base_url),
            cache_dir: lookup("BUOY_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            archive_dir: lookup("BUOY_ARCHIVE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.archive_dir),
            output_dir: lookup("BUOY_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            timeout_secs,
            max_concurrent,
        })
    }

    /// Fetch client settings derived from this configuration.
    pub fn ndbc(&self) -> NdbcConfig {
        NdbcConfig::new(&self.base_url)
            .with_timeout(self.timeout_secs)
            .with_max_concurrent(self.max_concurrent)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value.trim().parse().map(Some).map_err(|_| ConfigError {
            var,
            value,
            expected,
        }),
    }
}

/// Like [`parse_var`], but zero is rejected too.
fn positive_var<T: std::str::FromStr + Default + PartialEq>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match parse_var::<T>(lookup, var, expected)? {
        Some(n) if n == T::default() => Err(ConfigError {
            var,
            value: lookup(var).unwrap_or_default(),
            expected,
        }),
        parsed => Ok(parsed),
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: PathBuf::from("cache"),
            archive_dir: PathBuf::from("archive"),
            output_dir: PathBuf::from("output"),
            timeout_secs: 30,
            max_concurrent: 8,
        }
    }
}
