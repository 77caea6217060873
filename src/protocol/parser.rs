//! FTP reply parsing
//!
//! Tokenizes reply lines and accumulates them into complete replies.
//!
//! A reply line starting with three digits followed by a space is terminal;
//! three digits followed by `-` opens (or continues) a multi-line reply.
//! Once a multi-line reply is open, only a terminal line carrying the same
//! code closes it.

use crate::error::ProtocolError;
use crate::protocol::responses::Reply;

/// One control-channel line, classified.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplyLine<'a> {
    Terminal { code: u16, text: &'a str },
    Continuation { code: u16, text: &'a str },
    Text(&'a str),
}

/// Strips one trailing `\n` or `\r\n`.
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Classifies a single line (without its line ending).
pub fn parse_reply_line(line: &str) -> ReplyLine<'_> {
    let bytes = line.as_bytes();
    if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
        return ReplyLine::Text(line);
    }

    // Three ASCII digits always fit and always parse
    let code = bytes[..3]
        .iter()
        .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'));

    match bytes.get(3) {
        None => ReplyLine::Terminal { code, text: "" },
        Some(b' ') => ReplyLine::Terminal {
            code,
            text: &line[4..],
        },
        Some(b'-') => ReplyLine::Continuation {
            code,
            text: &line[4..],
        },
        Some(_) => ReplyLine::Text(line),
    }
}

/// Accumulates lines until a reply is complete.
#[derive(Debug)]
pub struct ReplyBuilder {
    code: u16,
    open_code: Option<u16>,
    text: String,
    limit: usize,
}

impl ReplyBuilder {
    pub fn new(limit: usize) -> Self {
        Self {
            code: 0,
            open_code: None,
            text: String::new(),
            limit,
        }
    }

    /// Bytes of reply text accumulated so far.
    pub(crate) fn len(&self) -> usize {
        self.text.len()
    }

    /// Adds one raw line. Returns the finished reply once a terminal line is seen.
    ///
    /// Inside an open `DDD-` reply only `DDD ` with the same code terminates;
    /// a terminal line with any other code is kept as body text.
    pub fn push_line(&mut self, raw: &str) -> Result<Option<Reply>, ProtocolError> {
        let line = strip_line_ending(raw);
        if self.text.len() + line.len() + 1 > self.limit {
            return Err(ProtocolError::ReplyTooLong { limit: self.limit });
        }

        self.text.push_str(line);
        self.text.push('\n');

        match (parse_reply_line(line), self.open_code) {
            (ReplyLine::Terminal { code, .. }, None) => {
                self.code = code;
                Ok(Some(self.take()))
            }
            (ReplyLine::Terminal { code, .. }, Some(open)) if code == open => {
                Ok(Some(self.take()))
            }
            (ReplyLine::Continuation { code, .. }, None) => {
                self.code = code;
                self.open_code = Some(code);
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Called when the stream ends before a terminal line.
    pub fn finish(self) -> ProtocolError {
        ProtocolError::ConnectionClosed { partial: self.text }
    }

    fn take(&mut self) -> Reply {
        Reply {
            code: self.code,
            text: std::mem::take(&mut self.text),
        }
    }
}
