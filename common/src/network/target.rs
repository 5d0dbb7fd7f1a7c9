//! # Scan Target Model
//!
//! A scan always points at exactly one host, given as a literal IPv4 or IPv6
//! address. Hostnames are not resolved.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::error::ScanError;

/// A validated host address to probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetAddr(IpAddr);

impl TargetAddr {
    pub fn new(ip: IpAddr) -> Self {
        Self(ip)
    }

    pub fn ip(&self) -> IpAddr {
        self.0
    }

    /// The socket address a probe connects to for `port`.
    pub fn socket_addr(&self, port: u16) -> SocketAddr {
        SocketAddr::new(self.0, port)
    }
}

impl FromStr for TargetAddr {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<IpAddr>()
            .map(TargetAddr)
            .map_err(|_| ScanError::InvalidAddress {
                input: s.to_string(),
            })
    }
}

impl From<IpAddr> for TargetAddr {
    fn from(ip: IpAddr) -> Self {
        Self(ip)
    }
}

impl fmt::Display for TargetAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
