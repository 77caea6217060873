//! Parsed URL data
//!
//! Holds the components extracted from an `ftp://` URL.

use std::net::IpAddr;

pub const DEFAULT_USER: &str = "anonymous";
pub const DEFAULT_PASSWORD: &str = "anonymous";
pub const DEFAULT_FILENAME: &str = "downloaded_file";

/// Components of an `ftp://[user[:password]@]host/path` URL.
///
/// Built once by the parser; the only later change is attaching the
/// resolved address, which consumes the value and returns a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlInfo {
    user: String,
    password: String,
    host: String,
    path: String,
    filename: String,
    address: Option<IpAddr>,
}

impl UrlInfo {
    pub(crate) fn new(
        user: String,
        password: String,
        host: String,
        path: String,
        filename: String,
    ) -> Self {
        Self {
            user,
            password,
            host,
            path,
            filename,
            address: None,
        }
    }

    /// Returns the same URL with its resolved host address attached.
    pub fn with_address(self, address: IpAddr) -> Self {
        Self {
            address: Some(address),
            ..self
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Path relative to the server's login directory, as sent with `RETR`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Local file name derived from the last path segment.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn address(&self) -> Option<IpAddr> {
        self.address
    }
}
