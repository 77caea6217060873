//! FTP Response handling
//!
//! Defines the reply codes the client expects and the accumulated reply type.

/// Standard FTP response codes
pub const ALREADY_OPEN: u16 = 125;
pub const OPENING_DATA: u16 = 150;
pub const OK: u16 = 200;
pub const READY: u16 = 220;
pub const GOODBYE: u16 = 221;
pub const TRANSFER_COMPLETE: u16 = 226;
pub const ENTERING_PASSIVE: u16 = 227;
pub const LOGIN_SUCCESS: u16 = 230;
pub const PASSWORD_REQUIRED: u16 = 331;
pub const TRANSFER_ABORTED: u16 = 426;

/// A complete server reply: the code of its terminal line and all text received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub code: u16,
    pub text: String,
}

impl Reply {
    pub fn is(&self, code: u16) -> bool {
        self.code == code
    }

    /// Text with line breaks flattened, for single-line log output.
    pub fn summary(&self) -> String {
        self.text.lines().collect::<Vec<_>>().join(" | ")
    }
}
