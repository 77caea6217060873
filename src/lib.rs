pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod network;
pub mod protocol;
pub mod session;
pub mod transfer;
pub mod url;
pub mod utils;

pub use client::FtpClient;
pub use config::ClientConfig;
pub use error::FtpClientError;
