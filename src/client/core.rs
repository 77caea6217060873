//! Download orchestration
//!
//! Wires URL parsing, resolution, connections and the FTP session into one
//! download, and tears everything down on every exit path.

use std::net::SocketAddr;
use std::path::Path;

use log::info;
use tokio::fs::File;

use crate::config::ClientConfig;
use crate::error::FtpClientError;
use crate::network::{Connector, DnsResolver, Resolver, TcpConnector};
use crate::session::FtpSession;
use crate::transfer::{DownloadReport, drain};
use crate::url::{UrlInfo, parse_url_with_default};

pub struct FtpClient<R = DnsResolver, C = TcpConnector> {
    config: ClientConfig,
    resolver: R,
    connector: C,
}

impl FtpClient {
    /// Client using the system resolver and plain TCP connections.
    pub fn new(config: ClientConfig) -> Self {
        let connector = TcpConnector::new(config.connect_timeout());
        Self {
            config,
            resolver: DnsResolver,
            connector,
        }
    }
}

impl<R, C> FtpClient<R, C>
where
    R: Resolver,
    C: Connector,
{
    pub fn with_collaborators(config: ClientConfig, resolver: R, connector: C) -> Self {
        Self {
            config,
            resolver,
            connector,
        }
    }

    /// Downloads the file named by `url` into the configured output directory.
    ///
    /// Once the control connection is open, the data connection (if any) is
    /// closed first, then `QUIT` is attempted and the control connection
    /// closed, whether or not the download succeeded. A partially written
    /// file is left in place.
    pub async fn download(&self, url: &str) -> Result<DownloadReport, FtpClientError> {
        let info = parse_url_with_default(url, &self.config.default_filename)?;
        info!(
            "User: {}, Host: {}, Path: {}, Filename: {}",
            info.user(),
            info.host(),
            info.path(),
            info.filename()
        );

        let ip = self.resolver.resolve(info.host()).await?;
        let info = info.with_address(ip);

        let control = self.connect_control(&info).await?;
        let mut session = FtpSession::new(control, self.config.max_reply_bytes);

        let result = self.run_session(&mut session, &info).await;
        if result.is_err() {
            session.abort();
        }

        session.quit().await;
        self.connector.close(session.into_inner()).await;
        result
    }

    async fn connect_control(&self, info: &UrlInfo) -> Result<C::Stream, FtpClientError> {
        let ip = info.address().ok_or_else(|| FtpClientError::Resolution {
            host: info.host().to_string(),
            reason: "address not resolved".into(),
        })?;
        self.connector
            .connect(SocketAddr::new(ip, self.config.control_port))
            .await
    }

    async fn run_session(
        &self,
        session: &mut FtpSession<C::Stream>,
        info: &UrlInfo,
    ) -> Result<DownloadReport, FtpClientError> {
        session.login(info.user(), info.password()).await?;

        if self.config.binary_mode {
            session.set_binary_mode().await?;
        }

        let endpoint = session.enter_passive().await?;
        let mut data = self.connector.connect(endpoint.socket_addr()).await?;

        let destination = self.config.destination(info.filename());
        let received = self
            .receive(session, &mut data, info.path(), &destination)
            .await;
        self.connector.close(data).await;
        let bytes = received?;

        let final_code = session.finish_retrieval().await?;
        Ok(DownloadReport {
            destination,
            bytes,
            final_code,
        })
    }

    /// Requests the file and streams it into `destination`. The file is only
    /// created once the server has accepted `RETR`.
    async fn receive(
        &self,
        session: &mut FtpSession<C::Stream>,
        data: &mut C::Stream,
        path: &str,
        destination: &Path,
    ) -> Result<u64, FtpClientError> {
        session.start_retrieval(path).await?;

        let mut file = File::create(destination)
            .await
            .map_err(|source| FtpClientError::CreateFile {
                path: destination.to_path_buf(),
                source,
            })?;
        info!("Downloading file '{}'", destination.display());

        let bytes = drain(data, &mut file, self.config.buffer_size).await?;
        info!("Download complete! Total bytes: {bytes}");
        Ok(bytes)
    }
}
