//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::Env;

/// Setup logging for the client.
///
/// Defaults to `info`; `RUST_LOG` overrides it (`RUST_LOG=debug` shows the
/// control-channel traffic).
pub fn setup_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .init();
}
