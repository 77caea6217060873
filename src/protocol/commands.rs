//! Module `commands`
//!
//! Defines the FTP commands the client issues on the control channel
//! and their wire representation.

use std::fmt;

/// Representation type requested with `TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    Image,
}

impl TransferType {
    fn code(&self) -> &'static str {
        match self {
            TransferType::Image => "I",
        }
    }
}

/// Represents an FTP command sent by the client.
///
/// Commands that carry an argument store it as a `String`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    USER(String),       // Username for login
    PASS(String),       // Password for login
    TYPE(TransferType), // Representation type
    PASV,               // Ask the server for a data endpoint
    RETR(String),       // Retrieve/download file
    QUIT,
}

impl Command {
    pub fn verb(&self) -> &'static str {
        match self {
            Command::USER(_) => "USER",
            Command::PASS(_) => "PASS",
            Command::TYPE(_) => "TYPE",
            Command::PASV => "PASV",
            Command::RETR(_) => "RETR",
            Command::QUIT => "QUIT",
        }
    }

    fn argument(&self) -> Option<&str> {
        match self {
            Command::USER(arg) | Command::PASS(arg) | Command::RETR(arg) => Some(arg),
            Command::TYPE(kind) => Some(kind.code()),
            Command::PASV | Command::QUIT => None,
        }
    }

    /// Formats the command as a CRLF-terminated control line.
    ///
    /// An empty argument is omitted, so `USER` with no name becomes `"USER\r\n"`.
    pub fn to_line(&self) -> String {
        match self.argument() {
            Some(arg) if !arg.is_empty() => format!("{} {}\r\n", self.verb(), arg),
            _ => format!("{}\r\n", self.verb()),
        }
    }
}

/// Log-safe rendering; the `PASS` argument is masked.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::PASS(_) => write!(f, "PASS ****"),
            other => match other.argument() {
                Some(arg) if !arg.is_empty() => write!(f, "{} {}", other.verb(), arg),
                _ => f.write_str(other.verb()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lines() {
        assert_eq!(Command::USER("anonymous".into()).to_line(), "USER anonymous\r\n");
        assert_eq!(Command::PASS("pw".into()).to_line(), "PASS pw\r\n");
        assert_eq!(Command::TYPE(TransferType::Image).to_line(), "TYPE I\r\n");
        assert_eq!(Command::PASV.to_line(), "PASV\r\n");
        assert_eq!(Command::RETR("pub/a.txt".into()).to_line(), "RETR pub/a.txt\r\n");
        assert_eq!(Command::QUIT.to_line(), "QUIT\r\n");
    }

    #[test]
    fn test_empty_argument_is_omitted() {
        assert_eq!(Command::USER(String::new()).to_line(), "USER\r\n");
    }

    #[test]
    fn test_display_masks_password() {
        assert_eq!(Command::PASS("secret".into()).to_string(), "PASS ****");
        assert_eq!(Command::USER("bob".into()).to_string(), "USER bob");
        assert_eq!(Command::PASV.to_string(), "PASV");
    }
}
