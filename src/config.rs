//! Configuration management for the RAX FTP client
//!
//! Settings come from serde defaults, then an optional TOML file, then
//! `RAX_FTP_CLIENT_*` environment variables.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::url::info::DEFAULT_FILENAME;

/// Config file looked up in the working directory when none is given
const DEFAULT_CONFIG_FILE: &str = "rax-ftp-client";
const ENV_PREFIX: &str = "RAX_FTP_CLIENT";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Port for the FTP control connection
    pub control_port: u16,

    /// Read buffer size for the data channel
    pub buffer_size: usize,

    /// Timeout for each TCP connect
    pub connect_timeout_secs: u64,

    /// Send `TYPE I` before negotiating passive mode
    pub binary_mode: bool,

    /// Local file name used when the URL path ends in `/`
    pub default_filename: String,

    /// Directory the downloaded file is written to
    pub output_dir: PathBuf,

    /// Upper bound on the size of one (possibly multi-line) reply
    pub max_reply_bytes: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            control_port: 21,
            buffer_size: 4096,
            connect_timeout_secs: 30,
            binary_mode: true,
            default_filename: DEFAULT_FILENAME.to_string(),
            output_dir: PathBuf::from("."),
            max_reply_bytes: 64 * 1024,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `path` (or `./rax-ftp-client.toml` if present)
    /// with environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = Config::builder().add_source(file).add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .try_parsing(true),
        );

        Self::from_builder(builder)
    }

    /// Deserialize and validate whatever sources `builder` carries.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, config::ConfigError> {
        let config: ClientConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.control_port == 0 {
            return Err(config::ConfigError::Message(
                "control_port cannot be 0".into(),
            ));
        }

        if self.buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        if self.connect_timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.default_filename.is_empty() {
            return Err(config::ConfigError::Message(
                "default_filename cannot be empty".into(),
            ));
        }

        if self.max_reply_bytes == 0 {
            return Err(config::ConfigError::Message(
                "max_reply_bytes must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get connect timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Where a file named `filename` is written
    pub fn destination(&self, filename: &str) -> PathBuf {
        self.output_dir.join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<ClientConfig, config::ConfigError> {
        ClientConfig::from_builder(
            Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.control_port, 21);
        assert!(config.binary_mode);
        assert_eq!(config.default_filename, "downloaded_file");
        assert_eq!(config.connect_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_toml_overrides() {
        let config = from_toml(
            r#"
            control_port = 2121
            binary_mode = false
            output_dir = "/tmp/downloads"
            "#,
        )
        .unwrap();
        assert_eq!(config.control_port, 2121);
        assert!(!config.binary_mode);
        assert_eq!(config.buffer_size, 4096);
        assert_eq!(
            config.destination("a.txt"),
            PathBuf::from("/tmp/downloads/a.txt")
        );
    }

    #[test]
    fn test_validation() {
        assert!(from_toml("control_port = 0").is_err());
        assert!(from_toml("buffer_size = 0").is_err());
        assert!(from_toml("connect_timeout_secs = 0").is_err());
        assert!(from_toml("default_filename = \"\"").is_err());
        assert!(from_toml("max_reply_bytes = 0").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(ClientConfig::load(Some(Path::new("/nonexistent/rax-ftp-client.toml"))).is_err());
    }

    #[test]
    fn test_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "buffer_size = 512\n").unwrap();
        let config = ClientConfig::load(Some(&path)).unwrap();
        assert_eq!(config.buffer_size, 512);
    }
}
