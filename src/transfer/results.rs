//! Transfer result types
//!
//! Defines result structures returned by transfer operations.

use std::path::PathBuf;

/// Result of a complete download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub destination: PathBuf,
    pub bytes: u64,
    /// Code of the reply that followed the end of the data stream, 0 if none
    pub final_code: u16,
}
