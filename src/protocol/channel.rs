//! Module `channel`
//!
//! Line-oriented control channel: writes commands and reads complete
//! (possibly multi-line) replies over one byte stream.

use log::debug;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::FtpClientError;
use crate::protocol::commands::Command;
use crate::protocol::parser::ReplyBuilder;
use crate::protocol::responses::Reply;

/// Control connection wrapper.
pub struct ControlChannel<S> {
    stream: BufReader<S>,
    max_reply_bytes: usize,
}

impl<S> ControlChannel<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, max_reply_bytes: usize) -> Self {
        Self {
            stream: BufReader::new(stream),
            max_reply_bytes,
        }
    }

    /// Sends one command as a single CRLF-terminated write.
    pub async fn send_command(&mut self, command: &Command) -> Result<(), FtpClientError> {
        let line = command.to_line();
        debug!(">>> {}", command);

        let writer = self.stream.get_mut();
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(FtpClientError::Io)?;
        writer.flush().await.map_err(FtpClientError::Io)?;
        Ok(())
    }

    /// Reads lines until a complete reply has been received.
    pub async fn read_reply(&mut self) -> Result<Reply, FtpClientError> {
        let mut builder = ReplyBuilder::new(self.max_reply_bytes);
        let mut line = Vec::new();

        loop {
            line.clear();
            // One byte past the remaining budget so an overlong line is detected
            let budget = self.max_reply_bytes.saturating_sub(builder.len()) as u64 + 1;
            let n = (&mut self.stream)
                .take(budget)
                .read_until(b'\n', &mut line)
                .await
                .map_err(FtpClientError::Network)?;

            if n == 0 {
                return Err(builder.finish().into());
            }

            let text = String::from_utf8_lossy(&line);
            debug!("<<< {}", text.trim_end());

            if let Some(reply) = builder.push_line(&text)? {
                return Ok(reply);
            }
        }
    }

    /// Sends a command and reads its reply.
    pub async fn execute(&mut self, command: &Command) -> Result<Reply, FtpClientError> {
        self.send_command(command).await?;
        self.read_reply().await
    }

    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }
}
