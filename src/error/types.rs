//! Error types
//!
//! Defines domain-specific error types for each stage of an FTP download.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// URL parsing errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("URL must start with ftp://: {0}")]
    Malformed(String),
    #[error("invalid host in URL")]
    InvalidHost,
    #[error("invalid path in URL")]
    InvalidPath,
}

/// Login step that rejected the credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStage {
    Greeting,
    User,
    Pass,
}

impl LoginStage {
    fn as_str(&self) -> &'static str {
        match self {
            LoginStage::Greeting => "greeting",
            LoginStage::User => "USER",
            LoginStage::Pass => "PASS",
        }
    }
}

impl std::fmt::Display for LoginStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Login sequence errors
#[derive(Debug, Error)]
#[error("login failed at {stage} (expected {expected}, got {code}: {text})")]
pub struct LoginError {
    pub stage: LoginStage,
    pub expected: u16,
    pub code: u16,
    pub text: String,
}

/// Control-channel and negotiation errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection closed before a complete reply (partial text: {partial:?})")]
    ConnectionClosed { partial: String },
    #[error("reply exceeds {limit} bytes")]
    ReplyTooLong { limit: usize },
    #[error("{step} failed: expected {expected}, got {code}: {text}")]
    UnexpectedReply {
        step: &'static str,
        expected: &'static str,
        code: u16,
        text: String,
    },
    #[error("malformed PASV reply: {0}")]
    MalformedPassive(String),
    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
}

/// General FTP client error that encompasses all error types
#[derive(Debug, Error)]
pub enum FtpClientError {
    #[error("URL error: {0}")]
    Url(#[from] UrlError),
    #[error("cannot resolve hostname '{host}': {reason}")]
    Resolution { host: String, reason: String },
    #[error("cannot connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
    #[error("{0}")]
    Login(#[from] LoginError),
    #[error("cannot create {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
    #[error("network error: {0}")]
    Network(#[source] io::Error),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl FtpClientError {
    /// Name of the download step the error belongs to, for user-facing reports.
    pub fn step(&self) -> &'static str {
        match self {
            FtpClientError::Url(_) => "parse URL",
            FtpClientError::Resolution { .. } => "resolve host",
            FtpClientError::Connect { .. } => "connect",
            FtpClientError::Protocol(ProtocolError::UnexpectedReply { step, .. }) => *step,
            FtpClientError::Protocol(ProtocolError::MalformedPassive(_)) => "enter passive mode",
            FtpClientError::Protocol(_) => "read reply",
            FtpClientError::Login(_) => "login",
            FtpClientError::CreateFile { .. } => "create destination",
            FtpClientError::Io(_) => "write",
            FtpClientError::Network(_) => "receive",
            FtpClientError::Config(_) => "load configuration",
        }
    }

    /// Server reply code carried by the error, if any.
    pub fn reply_code(&self) -> Option<u16> {
        match self {
            FtpClientError::Login(e) => Some(e.code),
            FtpClientError::Protocol(ProtocolError::UnexpectedReply { code, .. }) => Some(*code),
            _ => None,
        }
    }

    /// Whether the control stream can still carry a `QUIT` after this error.
    pub fn control_usable(&self) -> bool {
        !matches!(
            self,
            FtpClientError::Io(_)
                | FtpClientError::Network(_)
                | FtpClientError::Protocol(ProtocolError::ConnectionClosed { .. })
                | FtpClientError::Protocol(ProtocolError::ReplyTooLong { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_names_stage_and_code() {
        let err = FtpClientError::from(LoginError {
            stage: LoginStage::User,
            expected: 331,
            code: 530,
            text: "Not logged in".into(),
        });
        let msg = err.to_string();
        assert!(msg.contains("USER"));
        assert!(msg.contains("530"));
        assert_eq!(err.reply_code(), Some(530));
        assert_eq!(err.step(), "login");
    }

    #[test]
    fn test_unexpected_reply_step() {
        let err = FtpClientError::from(ProtocolError::UnexpectedReply {
            step: "RETR",
            expected: "150 or 125",
            code: 550,
            text: "No such file".into(),
        });
        assert_eq!(err.step(), "RETR");
        assert_eq!(err.reply_code(), Some(550));
        assert!(err.control_usable());
    }

    #[test]
    fn test_stream_failures_make_control_unusable() {
        let err = FtpClientError::Network(io::Error::from(io::ErrorKind::ConnectionReset));
        assert!(!err.control_usable());
        let err = FtpClientError::from(ProtocolError::ConnectionClosed {
            partial: String::new(),
        });
        assert!(!err.control_usable());
    }

    #[test]
    fn test_create_failure_is_its_own_step() {
        let err = FtpClientError::CreateFile {
            path: PathBuf::from("/missing/dir/f.bin"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.step(), "create destination");
        assert!(err.to_string().starts_with("cannot create /missing/dir/f.bin"));
        assert!(err.control_usable());
    }
}
