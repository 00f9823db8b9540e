//! HTTP transport for data buoy pages.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use super::client::NdbcConfig;
use super::error::TransportError;

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests. The seam between the fetch client and the network.
pub trait Transport: Send + Sync {
    /// Fetch `url` with the given query parameters.
    ///
    /// Any status code is a successful transport; only failures to obtain a
    /// response at all are errors.
    fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the configured timeout and user agent.
    pub fn new(config: &NdbcConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();

        let agent = HeaderValue::from_str(&config.user_agent).map_err(|_| {
            TransportError::InvalidHeader {
                name: "user-agent",
                value: config.user_agent.clone(),
            }
        })?;
        headers.insert(USER_AGENT, agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<RawResponse, TransportError> {
        let response = self.http.get(url).query(params).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}
