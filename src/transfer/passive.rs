//! Passive mode endpoint decoding
//!
//! Extracts the data-channel address from a `227` reply.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use crate::error::ProtocolError;

/// Data-channel address advertised by the server in a PASV reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassiveEndpoint {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl PassiveEndpoint {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.ip, self.port))
    }
}

impl fmt::Display for PassiveEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ip, self.port)
    }
}

/// Parses `h1,h2,h3,h4,p1,p2` from inside the first parenthesis of `text`.
///
/// Each component must be an integer in `0..=255`; `port = p1 * 256 + p2`.
pub fn parse_passive_reply(text: &str) -> Result<PassiveEndpoint, ProtocolError> {
    let open = text
        .find('(')
        .ok_or_else(|| ProtocolError::MalformedPassive("missing '('".into()))?;
    let inner = &text[open + 1..];
    let close = inner
        .find(')')
        .ok_or_else(|| ProtocolError::MalformedPassive("missing ')'".into()))?;

    let fields = inner[..close]
        .split(',')
        .map(|field| field.trim().parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| ProtocolError::MalformedPassive(format!("{}: {e}", &inner[..close])))?;

    let &[h1, h2, h3, h4, p1, p2] = fields.as_slice() else {
        return Err(ProtocolError::MalformedPassive(format!(
            "expected 6 numbers, got {}",
            fields.len()
        )));
    };

    Ok(PassiveEndpoint {
        ip: Ipv4Addr::new(h1, h2, h3, h4),
        port: u16::from(p1) * 256 + u16::from(p2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loopback_tuple() {
        let endpoint =
            parse_passive_reply("227 Entering Passive Mode (127,0,0,1,200,10).").unwrap();
        assert_eq!(endpoint.ip, Ipv4Addr::LOCALHOST);
        assert_eq!(endpoint.port, 51210);
        assert_eq!(endpoint.to_string(), "127.0.0.1:51210");
        assert_eq!(endpoint.socket_addr(), "127.0.0.1:51210".parse().unwrap());
    }

    #[test]
    fn test_max_port() {
        let endpoint = parse_passive_reply("227 (10,1,2,3,255,255)").unwrap();
        assert_eq!(endpoint.port, 65535);
    }

    #[test]
    fn test_uses_first_parenthesis() {
        let endpoint = parse_passive_reply("227 ok (1,2,3,4,0,21) (9,9,9,9,9,9)").unwrap();
        assert_eq!(endpoint.ip, Ipv4Addr::new(1, 2, 3, 4));
        assert_eq!(endpoint.port, 21);
    }

    #[test]
    fn test_tolerates_spaces() {
        let endpoint = parse_passive_reply("227 ( 192, 168, 0, 9, 4, 1 )").unwrap();
        assert_eq!(endpoint.ip, Ipv4Addr::new(192, 168, 0, 9));
        assert_eq!(endpoint.port, 1025);
    }

    #[test]
    fn test_missing_parenthesis() {
        assert!(matches!(
            parse_passive_reply("227 Entering Passive Mode 127,0,0,1,200,10"),
            Err(ProtocolError::MalformedPassive(_))
        ));
        assert!(parse_passive_reply("227 (127,0,0,1,200,10").is_err());
    }

    #[test]
    fn test_malformed_tuples() {
        for text in [
            "227 (127,0,0,1,200)",
            "227 (127,0,0,1,200,10,5)",
            "227 (127,0,0,1,256,10)",
            "227 (127,0,0,one,200,10)",
            "227 ()",
            "227 (-1,0,0,1,2,3)",
        ] {
            assert!(
                matches!(
                    parse_passive_reply(text),
                    Err(ProtocolError::MalformedPassive(_))
                ),
                "{text} should be rejected"
            );
        }
    }
}
