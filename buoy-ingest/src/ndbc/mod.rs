//! Data buoy center page client.
//!
//! This module provides the fetch path for the data buoy center's HTML
//! pages: a [`Transport`] that performs GETs, and an [`NdbcClient`] that
//! puts the response cache, a concurrency ceiling and a deadline in front
//! of it.
//!
//! Key characteristics of the site:
//! - Every page is HTML; there is no structured API
//! - Station detail pages are `station_page.php?station={id}` and carry both
//!   the station descriptor and its latest observations
//! - Missing stations answer with a non-2xx status, which is "no data" here

mod client;
mod error;
mod mock;
mod transport;

pub use client::{DEFAULT_BASE_URL, NdbcClient, NdbcConfig};
pub use error::TransportError;
pub use mock::MockTransport;
pub use transport::{HttpTransport, RawResponse, Transport};
