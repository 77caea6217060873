//! Hostname resolution
//!
//! Turns the URL host into the IPv4 address used for the control connection.

use std::net::IpAddr;

use log::info;
use tokio::net::lookup_host;

use crate::error::FtpClientError;

/// Hostname → address lookup.
#[allow(async_fn_in_trait)]
pub trait Resolver {
    async fn resolve(&self, host: &str) -> Result<IpAddr, FtpClientError>;
}

/// System resolver; picks the first IPv4 address returned.
#[derive(Debug, Default, Clone, Copy)]
pub struct DnsResolver;

impl Resolver for DnsResolver {
    async fn resolve(&self, host: &str) -> Result<IpAddr, FtpClientError> {
        let addrs = lookup_host((host, 0))
            .await
            .map_err(|e| FtpClientError::Resolution {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        let ip = addrs
            .map(|addr| addr.ip())
            .find(IpAddr::is_ipv4)
            .ok_or_else(|| FtpClientError::Resolution {
                host: host.to_string(),
                reason: "no IPv4 address".into(),
            })?;

        info!("Resolved {host} to {ip}");
        Ok(ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn test_resolve_ip_literal() {
        let ip = DnsResolver.resolve("127.0.0.1").await.unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[tokio::test]
    async fn test_ipv6_only_literal_is_rejected() {
        let err = DnsResolver.resolve("::1").await.unwrap_err();
        assert!(matches!(err, FtpClientError::Resolution { .. }));
    }
}
