//! FTP session
//!
//! Sequences login, binary mode, passive negotiation, retrieval and quit
//! over one control channel. Any unexpected reply moves the session to
//! [`SessionState::Failed`]; nothing is retried.

use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::{FtpClientError, LoginError, LoginStage, ProtocolError};
use crate::protocol::responses::{
    ALREADY_OPEN, ENTERING_PASSIVE, GOODBYE, LOGIN_SUCCESS, OK, OPENING_DATA, PASSWORD_REQUIRED,
    READY, TRANSFER_ABORTED, TRANSFER_COMPLETE,
};
use crate::protocol::{Command, ControlChannel, Reply, TransferType};
use crate::session::state::SessionState;
use crate::transfer::{PassiveEndpoint, parse_passive_reply};

pub struct FtpSession<S> {
    channel: ControlChannel<S>,
    state: SessionState,
    binary: bool,
    control_usable: bool,
    /// A `RETR` was accepted and its closing status has not been read yet
    status_pending: bool,
}

impl<S> FtpSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(control: S, max_reply_bytes: usize) -> Self {
        Self {
            channel: ControlChannel::new(control, max_reply_bytes),
            state: SessionState::Connected,
            binary: false,
            control_usable: true,
            status_pending: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.is_logged_in()
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Whether the control stream can still carry commands.
    pub fn control_usable(&self) -> bool {
        self.control_usable
    }

    /// Reads the greeting and authenticates with `USER`/`PASS`.
    pub async fn login(&mut self, user: &str, password: &str) -> Result<(), FtpClientError> {
        self.require(self.state.can_login(), "log in")?;

        let greeting = self.receive().await?;
        self.expect_login(LoginStage::Greeting, READY, greeting)?;

        let reply = self.exchange(&Command::USER(user.to_string())).await?;
        self.expect_login(LoginStage::User, PASSWORD_REQUIRED, reply)?;

        let reply = self.exchange(&Command::PASS(password.to_string())).await?;
        self.expect_login(LoginStage::Pass, LOGIN_SUCCESS, reply)?;

        self.state = SessionState::LoggedIn;
        info!("Login successful as {user}");
        Ok(())
    }

    /// Switches to image type. A refusal is fatal: an ASCII transfer would
    /// rewrite line endings in the downloaded file.
    pub async fn set_binary_mode(&mut self) -> Result<(), FtpClientError> {
        self.require(self.state.can_set_binary_mode(), "set binary mode")?;

        let reply = self.exchange(&Command::TYPE(TransferType::Image)).await?;
        if !reply.is(OK) {
            return self.unexpected("TYPE I", "200", reply);
        }

        self.binary = true;
        self.state = SessionState::BinaryMode;
        info!("Binary mode enabled");
        Ok(())
    }

    /// Sends `PASV` and decodes the advertised data endpoint.
    pub async fn enter_passive(&mut self) -> Result<PassiveEndpoint, FtpClientError> {
        self.require(self.state.can_enter_passive(), "enter passive mode")?;

        let reply = self.exchange(&Command::PASV).await?;
        if !reply.is(ENTERING_PASSIVE) {
            return self.unexpected("PASV", "227", reply);
        }

        let endpoint = match parse_passive_reply(&reply.text) {
            Ok(endpoint) => endpoint,
            Err(e) => return self.fail(e),
        };

        self.state = SessionState::PassiveNegotiated;
        info!("Passive mode: data endpoint {endpoint}");
        Ok(endpoint)
    }

    /// Sends `RETR` and waits for the server to start sending (150 or 125).
    pub async fn start_retrieval(&mut self, path: &str) -> Result<(), FtpClientError> {
        self.require(self.state.can_retrieve(), "retrieve")?;

        let reply = self.exchange(&Command::RETR(path.to_string())).await?;
        if !reply.is(OPENING_DATA) && !reply.is(ALREADY_OPEN) {
            return self.unexpected("RETR", "150 or 125", reply);
        }

        self.state = SessionState::Transferring;
        self.status_pending = true;
        info!("Retrieving '{path}'");
        Ok(())
    }

    /// Reads the status reply that follows the end of the data stream.
    ///
    /// The bytes already received are authoritative, so only 226 is logged as
    /// a clean completion and every other outcome is a warning. Returns the
    /// final reply code, or 0 if no reply could be read.
    pub async fn finish_retrieval(&mut self) -> Result<u16, FtpClientError> {
        self.require(self.state == SessionState::Transferring, "finish retrieval")?;
        self.status_pending = false;

        let code = match self.channel.read_reply().await {
            Ok(reply) if reply.is(TRANSFER_COMPLETE) => {
                info!("Transfer complete");
                reply.code
            }
            Ok(reply) if reply.is(TRANSFER_ABORTED) => {
                warn!("Server reported the data connection closed: {}", reply.summary());
                reply.code
            }
            Ok(reply) => {
                warn!("Unexpected reply after transfer: {} {}", reply.code, reply.summary());
                reply.code
            }
            Err(e) => {
                warn!("No status reply after transfer: {e}");
                if !e.control_usable() {
                    self.control_usable = false;
                }
                0
            }
        };

        self.state = if self.binary {
            SessionState::BinaryMode
        } else {
            SessionState::LoggedIn
        };
        Ok(code)
    }

    /// Marks a failure that happened outside the control channel, such as a
    /// data connection that could not be opened.
    pub fn abort(&mut self) {
        if self.state != SessionState::Closed {
            self.state = SessionState::Failed;
        }
    }

    /// Best-effort `QUIT`. Errors are logged, never returned.
    ///
    /// A transfer status still owed by the server (after a failed download)
    /// is read and discarded first. Returns the code of the reply to `QUIT`,
    /// if one was read.
    pub async fn quit(&mut self) -> Option<u16> {
        if self.state == SessionState::Closed {
            return None;
        }
        if self.status_pending && self.control_usable {
            self.status_pending = false;
            match self.channel.read_reply().await {
                Ok(reply) => debug!("Discarding transfer status: {} {}", reply.code, reply.summary()),
                Err(e) => {
                    warn!("No status reply after failed transfer: {e}");
                    if !e.control_usable() {
                        self.control_usable = false;
                    }
                }
            }
        }
        if !self.control_usable {
            debug!("Control connection unusable, skipping QUIT");
            self.state = SessionState::Closed;
            return None;
        }

        let code = match self.channel.execute(&Command::QUIT).await {
            Ok(reply) => {
                if reply.is(GOODBYE) {
                    info!("Connection closed");
                } else {
                    warn!("Unexpected reply to QUIT: {} {}", reply.code, reply.summary());
                }
                Some(reply.code)
            }
            Err(e) => {
                warn!("QUIT failed: {e}");
                None
            }
        };
        self.state = SessionState::Closed;
        code
    }

    /// Returns the control stream so the caller can close it.
    pub fn into_inner(self) -> S {
        self.channel.into_inner()
    }

    async fn receive(&mut self) -> Result<Reply, FtpClientError> {
        match self.channel.read_reply().await {
            Ok(reply) => Ok(reply),
            Err(e) => self.fail(e),
        }
    }

    async fn exchange(&mut self, command: &Command) -> Result<Reply, FtpClientError> {
        match self.channel.execute(command).await {
            Ok(reply) => Ok(reply),
            Err(e) => self.fail(e),
        }
    }

    fn require(&self, allowed: bool, operation: &'static str) -> Result<(), FtpClientError> {
        if allowed {
            Ok(())
        } else {
            Err(ProtocolError::InvalidState {
                operation,
                state: self.state.name(),
            }
            .into())
        }
    }

    fn expect_login(
        &mut self,
        stage: LoginStage,
        expected: u16,
        reply: Reply,
    ) -> Result<(), FtpClientError> {
        if reply.is(expected) {
            return Ok(());
        }
        self.fail(LoginError {
            stage,
            expected,
            code: reply.code,
            text: reply.summary(),
        })
    }

    fn unexpected<T>(
        &mut self,
        step: &'static str,
        expected: &'static str,
        reply: Reply,
    ) -> Result<T, FtpClientError> {
        self.fail(ProtocolError::UnexpectedReply {
            step,
            expected,
            code: reply.code,
            text: reply.summary(),
        })
    }

    fn fail<T>(&mut self, err: impl Into<FtpClientError>) -> Result<T, FtpClientError> {
        let err = err.into();
        if !err.control_usable() {
            self.control_usable = false;
        }
        self.state = SessionState::Failed;
        Err(err)
    }
}
