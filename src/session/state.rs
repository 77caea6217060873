//! Session state
//!
//! States of one FTP session and the operations each state permits.

/// Lifecycle of an FTP session.
///
/// `Connected → LoggedIn → [BinaryMode] → PassiveNegotiated → Transferring → Closed`,
/// with `Failed` reachable from any step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    LoggedIn,
    BinaryMode,
    PassiveNegotiated,
    Transferring,
    Closed,
    Failed,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Connected => "connected",
            SessionState::LoggedIn => "logged in",
            SessionState::BinaryMode => "in binary mode",
            SessionState::PassiveNegotiated => "passive",
            SessionState::Transferring => "transferring",
            SessionState::Closed => "closed",
            SessionState::Failed => "failed",
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(
            self,
            SessionState::LoggedIn
                | SessionState::BinaryMode
                | SessionState::PassiveNegotiated
                | SessionState::Transferring
        )
    }

    pub fn can_login(&self) -> bool {
        *self == SessionState::Connected
    }

    pub fn can_set_binary_mode(&self) -> bool {
        matches!(self, SessionState::LoggedIn | SessionState::BinaryMode)
    }

    pub fn can_enter_passive(&self) -> bool {
        matches!(self, SessionState::LoggedIn | SessionState::BinaryMode)
    }

    pub fn can_retrieve(&self) -> bool {
        *self == SessionState::PassiveNegotiated
    }
}
