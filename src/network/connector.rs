//! Connection factory
//!
//! Opens and closes the TCP streams used for the control and data channels.

use std::net::SocketAddr;
use std::time::Duration;

use log::{debug, info};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::error::FtpClientError;

/// Socket address → byte stream, plus orderly close.
#[allow(async_fn_in_trait)]
pub trait Connector {
    type Stream: AsyncRead + AsyncWrite + Unpin;

    async fn connect(&self, addr: SocketAddr) -> Result<Self::Stream, FtpClientError>;

    async fn close(&self, stream: Self::Stream);
}

/// Plain TCP connector with a connect timeout.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnector {
    connect_timeout: Duration,
}

impl TcpConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, addr: SocketAddr) -> Result<TcpStream, FtpClientError> {
        let stream = match timeout(self.connect_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(FtpClientError::Connect { addr, source }),
            Err(_) => {
                return Err(FtpClientError::Connect {
                    addr,
                    source: std::io::Error::new(
                        std::io::ErrorKind::TimedOut,
                        format!("no connection after {:?}", self.connect_timeout),
                    ),
                });
            }
        };

        info!("Connected to {addr}");
        Ok(stream)
    }

    async fn close(&self, mut stream: TcpStream) {
        let peer = stream.peer_addr().ok();
        if let Err(e) = stream.shutdown().await {
            debug!("Shutdown of {peer:?} failed: {e}");
        }
        debug!("Closed connection to {peer:?}");
    }
}
