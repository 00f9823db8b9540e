//! Transport error types.

use std::fmt;
use std::time::Duration;

/// Errors from a page transport.
///
/// Request-time errors never escape the fetch client: each is logged and
/// turned into "no data" for the request that hit it. `InvalidHeader` is
/// raised only while building an [`HttpTransport`](super::HttpTransport).
#[derive(Debug)]
pub enum TransportError {
    /// HTTP request failed (connection error, body read, etc.)
    Http(reqwest::Error),

    /// Request exceeded its deadline
    Timeout(Duration),

    /// Transport refused to serve the request
    Unavailable(String),

    /// A configured header value is not a valid HTTP header
    InvalidHeader {
        name: &'static str,
        value: String,
    },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Http(e) => write!(f, "HTTP error: {e}"),
            TransportError::Timeout(after) => {
                write!(f, "request timed out after {}ms", after.as_millis())
            }
            TransportError::Unavailable(msg) => write!(f, "transport unavailable: {msg}"),
            TransportError::InvalidHeader { name, value } => {
                write!(f, "invalid {name} header value {value:?}")
            }
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Http(err)
    }
}
