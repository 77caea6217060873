//! Network collaborators
//!
//! Hostname resolution and TCP connection management behind traits, so the
//! session logic can be driven over any byte stream.

pub mod connector;
pub mod resolver;

pub use connector::{Connector, TcpConnector};
pub use resolver::{DnsResolver, Resolver};
