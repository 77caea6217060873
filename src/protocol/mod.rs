//! FTP Protocol implementation
//!
//! Handles command formatting, reply framing and the control channel.

pub mod channel;
pub mod commands;
pub mod parser;
pub mod responses;

pub use channel::ControlChannel;
pub use commands::{Command, TransferType};
pub use parser::{ReplyBuilder, ReplyLine, parse_reply_line};
pub use responses::Reply;
