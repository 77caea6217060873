//! Transfer module for FTP client
//!
//! Handles passive endpoint decoding and draining the data channel.

pub mod data_channel;
pub mod passive;
pub mod results;

// Re-export key types and functions
pub use data_channel::drain;
pub use passive::{PassiveEndpoint, parse_passive_reply};
pub use results::DownloadReport;
