//! Module `data_channel`
//!
//! Drains a data connection into a destination sink, counting bytes.

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::FtpClientError;

/// Reads `data` until EOF, writing every chunk to `sink`.
///
/// A read failure is a [`FtpClientError::Network`] error, a write failure an
/// [`FtpClientError::Io`] error. The sink is flushed on success and, best
/// effort, on failure so already received bytes reach the destination.
pub async fn drain<D, W>(
    data: &mut D,
    sink: &mut W,
    buffer_size: usize,
) -> Result<u64, FtpClientError>
where
    D: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; buffer_size.max(1)];
    let mut total_bytes = 0u64;

    let result = loop {
        let n = match data.read(&mut buffer).await {
            Ok(0) => break Ok(total_bytes),
            Ok(n) => n,
            Err(e) => break Err(FtpClientError::Network(e)),
        };

        if let Err(e) = sink.write_all(&buffer[..n]).await {
            break Err(FtpClientError::Io(e));
        }
        total_bytes += n as u64;
    };

    match result {
        Ok(total) => {
            sink.flush().await.map_err(FtpClientError::Io)?;
            debug!("Data channel drained: {total} bytes");
            Ok(total)
        }
        Err(e) => {
            if let Err(flush_err) = sink.flush().await {
                warn!("Failed to flush partial download after {total_bytes} bytes: {flush_err}");
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    /// Reader that yields its chunks and then fails.
    struct FailingReader {
        chunks: Vec<Vec<u8>>,
    }

    impl AsyncRead for FailingReader {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut tokio::io::ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            if self.chunks.is_empty() {
                return Poll::Ready(Err(io::Error::from(io::ErrorKind::ConnectionReset)));
            }
            let chunk = self.chunks.remove(0);
            buf.put_slice(&chunk);
            Poll::Ready(Ok(()))
        }
    }

    /// Writer that accepts at most `capacity` bytes in total.
    struct FullDisk {
        written: Vec<u8>,
        capacity: usize,
        flushed: bool,
    }

    impl AsyncWrite for FullDisk {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            let room = self.capacity - self.written.len();
            if room == 0 {
                return Poll::Ready(Err(io::Error::other("no space left")));
            }
            let n = room.min(buf.len());
            self.written.extend_from_slice(&buf[..n]);
            Poll::Ready(Ok(n))
        }

        fn poll_flush(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            self.flushed = true;
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_drain_copies_all_bytes_in_order() {
        let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let mut data = &payload[..];
        let mut sink = Vec::new();

        let total = drain(&mut data, &mut sink, 512).await.unwrap();
        assert_eq!(total, payload.len() as u64);
        assert_eq!(sink, payload);
    }

    #[tokio::test]
    async fn test_drain_empty_stream() {
        let mut data: &[u8] = b"";
        let mut sink = Vec::new();
        assert_eq!(drain(&mut data, &mut sink, 4096).await.unwrap(), 0);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_read_failure_is_network_error() {
        let mut data = FailingReader {
            chunks: vec![b"abc".to_vec(), b"def".to_vec()],
        };
        let mut sink = Vec::new();
        let err = drain(&mut data, &mut sink, 16).await.unwrap_err();
        assert!(matches!(err, FtpClientError::Network(_)));
        assert_eq!(sink, b"abcdef");
    }

    #[tokio::test]
    async fn test_write_failure_is_io_error_and_flushes() {
        let mut data: &[u8] = b"0123456789";
        let mut sink = FullDisk {
            written: Vec::new(),
            capacity: 4,
            flushed: false,
        };
        let err = drain(&mut data, &mut sink, 16).await.unwrap_err();
        assert!(matches!(err, FtpClientError::Io(_)));
        assert_eq!(sink.written, b"0123");
        assert!(sink.flushed);
    }
}
