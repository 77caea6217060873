//! FTP URL handling
//!
//! Parses `ftp://` URLs into credentials, host, path and local filename.

pub mod info;
pub mod parser;

pub use info::UrlInfo;
pub use parser::{parse_url, parse_url_with_default};
