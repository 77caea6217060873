//! Error handlers
//!
//! Reports a failed download and maps it to a process exit code.

use crate::error::types::FtpClientError;
use log::error;

/// Log the failing step, the server reply code and the underlying cause.
pub fn report_error(err: &FtpClientError) {
    match err.reply_code() {
        Some(code) => error!("{} failed (server code {}): {}", err.step(), code, err),
        None => error!("{} failed: {}", err.step(), err),
    }
}

/// Convert error to process exit code
pub fn exit_code(_err: &FtpClientError) -> u8 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UrlError;

    #[test]
    fn test_every_failure_exits_with_one() {
        assert_eq!(exit_code(&FtpClientError::from(UrlError::InvalidHost)), 1);
        let err = FtpClientError::Resolution {
            host: "nowhere".into(),
            reason: "no address".into(),
        };
        assert_eq!(exit_code(&err), 1);
    }
}
