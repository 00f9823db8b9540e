//! Mock transport for testing without network access.
//!
//! Serves canned pages keyed by request signature and counts how often each
//! signature was requested, so tests can assert on cache behaviour.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::cache::Signature;

use super::error::TransportError;
use super::transport::{RawResponse, Transport};

#[derive(Debug, Clone)]
enum Reply {
    Respond(RawResponse),
    Fail,
    Hang,
}

/// In-memory [`Transport`] with canned replies.
///
/// Unknown requests get a 404 response, like a missing page on the live site.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: HashMap<Signature, Reply>,
    counts: Mutex<HashMap<Signature, usize>>,
    delay: Option<Duration>,
}

fn signature(url: &str, params: &[(&str, &str)]) -> Signature {
    let params: Vec<(&str, String)> = params.iter().map(|(k, v)| (*k, v.to_string())).collect();
    Signature::of(url, &params)
}

impl MockTransport {
    /// Create a transport with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with status 200 for this request.
    pub fn with_page(self, url: &str, params: &[(&str, &str)], body: &str) -> Self {
        self.with_response(url, params, 200, body)
    }

    /// Serve `body` with the given status for this request.
    pub fn with_response(
        mut self,
        url: &str,
        params: &[(&str, &str)],
        status: u16,
        body: &str,
    ) -> Self {
        let reply = Reply::Respond(RawResponse {
            status,
            body: body.to_string(),
        });
        self.replies.insert(signature(url, params), reply);
        self
    }

    /// Fail this request at the transport level.
    pub fn with_failure(mut self, url: &str, params: &[(&str, &str)]) -> Self {
        self.replies.insert(signature(url, params), Reply::Fail);
        self
    }

    /// Never answer this request.
    pub fn with_hang(mut self, url: &str, params: &[(&str, &str)]) -> Self {
        self.replies.insert(signature(url, params), Reply::Hang);
        self
    }

    /// Delay every reply by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times this request reached the transport.
    pub fn request_count(&self, url: &str, params: &[(&str, String)]) -> usize {
        let counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        counts.get(&Signature::of(url, params)).copied().unwrap_or(0)
    }

    /// Total requests that reached the transport.
    pub fn total_requests(&self) -> usize {
        let counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
        counts.values().sum()
    }
}

impl Transport for MockTransport {
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<RawResponse, TransportError> {
        let key = Signature::of(url, params);
        {
            let mut counts = self.counts.lock().unwrap_or_else(|e| e.into_inner());
            *counts.entry(key).or_insert(0) += 1;
        }

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.replies.get(&key).cloned() {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Fail) => Err(TransportError::Unavailable(format!(
                "mock failure for {url}"
            ))),
            Some(Reply::Hang) => std::future::pending().await,
            None => Ok(RawResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://ndbc.test/station_page.php";

    #[tokio::test]
    async fn serves_registered_page() {
        let mock = MockTransport::new().with_page(URL, &[("station", "46086")], "<html/>");
        let params = [("station", "46086".to_string())];

        let response = mock.get(URL, &params).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "<html/>");
        assert_eq!(mock.request_count(URL, &params), 1);
    }

    #[tokio::test]
    async fn unknown_request_is_404() {
        let mock = MockTransport::new();
        let response = mock.get(URL, &[]).await.unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn failure_is_transport_error() {
        let mock = MockTransport::new().with_failure(URL, &[("station", "1")]);
        let result = mock.get(URL, &[("station", "1".to_string())]).await;
        assert!(matches!(result, Err(TransportError::Unavailable(_))));
    }

    #[tokio::test]
    async fn counts_every_request() {
        let mock = MockTransport::new();
        mock.get(URL, &[]).await.unwrap();
        mock.get(URL, &[]).await.unwrap();
        mock.get(URL, &[("station", "1".to_string())]).await.unwrap();

        assert_eq!(mock.request_count(URL, &[]), 2);
        assert_eq!(mock.total_requests(), 3);
    }
}
