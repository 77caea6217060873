//! FTP client
//!
//! Runs one complete download: resolve, connect, negotiate, retrieve, quit.

pub mod core;

pub use self::core::FtpClient;
