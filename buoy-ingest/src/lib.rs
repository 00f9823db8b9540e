//! Data buoy observation ingest.
//!
//! Fetches station pages from the data buoy center, memoises every response
//! by request signature, and extracts station descriptors and observation
//! reports from the HTML, many stations at a time.

pub mod archive;
pub mod batch;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod export;
pub mod extract;
pub mod instrument;
pub mod ndbc;
pub mod store;
