//! FTP URL parsing
//!
//! Decomposes `ftp://[<user>[:<password>]@]<host>/<path>` into a [`UrlInfo`].
//! No percent-decoding is performed.

use crate::error::UrlError;
use crate::url::info::{DEFAULT_FILENAME, DEFAULT_PASSWORD, DEFAULT_USER, UrlInfo};

const SCHEME: &str = "ftp://";

/// Parses an FTP URL using the built-in filename placeholder.
pub fn parse_url(url: &str) -> Result<UrlInfo, UrlError> {
    parse_url_with_default(url, DEFAULT_FILENAME)
}

/// Parses an FTP URL, substituting `default_filename` when the path ends in `/`.
pub fn parse_url_with_default(url: &str, default_filename: &str) -> Result<UrlInfo, UrlError> {
    let rest = url
        .strip_prefix(SCHEME)
        .ok_or_else(|| UrlError::Malformed(url.to_string()))?;

    // Credentials only count when '@' comes before the first '/'
    let first_slash = rest.find('/');
    let (user, password, location) = match rest.find('@') {
        Some(at) if first_slash.is_none_or(|slash| at < slash) => {
            let (user, password) = split_credentials(&rest[..at]);
            (user, password, &rest[at + 1..])
        }
        _ => (DEFAULT_USER, DEFAULT_PASSWORD, rest),
    };

    let (host, path) = match location.split_once('/') {
        Some((host, path)) => (host, path),
        None => (location, ""),
    };

    if host.is_empty() {
        return Err(UrlError::InvalidHost);
    }
    if path.is_empty() {
        return Err(UrlError::InvalidPath);
    }

    let filename = extract_filename(path, default_filename);

    Ok(UrlInfo::new(
        user.to_string(),
        password.to_string(),
        host.to_string(),
        path.to_string(),
        filename,
    ))
}

fn split_credentials(credentials: &str) -> (&str, &str) {
    match credentials.split_once(':') {
        Some((user, password)) => (user, password),
        None => (credentials, DEFAULT_PASSWORD),
    }
}

/// Returns the text after the last `/` of `path`, or `default_filename` if empty.
pub fn extract_filename(path: &str, default_filename: &str) -> String {
    let name = match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    };

    if name.is_empty() {
        default_filename.to_string()
    } else {
        name.to_string()
    }
}
