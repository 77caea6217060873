//! FTP session management
//!
//! Drives one control connection through login, negotiation and retrieval.

pub mod core;
pub mod state;

pub use self::core::FtpSession;
pub use state::SessionState;
