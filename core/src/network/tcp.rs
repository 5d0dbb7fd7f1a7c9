use std::io::{self, ErrorKind};
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use knockr_common::network::outcome::{ClosedReason, ScanOutcome};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::scanner::Prober;

/// Full TCP handshake prober.
///
/// A completed handshake means the port is open. The stream is dropped right
/// away, so no data is ever sent.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnectProber {
    probe_timeout: Duration,
}

impl TcpConnectProber {
    pub fn new(probe_timeout: Duration) -> Self {
        Self { probe_timeout }
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, addr: SocketAddr) -> ScanOutcome {
        handshake_probe(addr, self.probe_timeout).await
    }
}

/// Attempts one connection to `addr`, giving up after `probe_timeout`.
pub async fn handshake_probe(addr: SocketAddr, probe_timeout: Duration) -> ScanOutcome {
    match timeout(probe_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => ScanOutcome::Open,
        Ok(Err(e)) => classify_connect_error(&e),
        Err(_elapsed) => ScanOutcome::Closed(ClosedReason::TimedOut),
    }
}

fn classify_connect_error(e: &io::Error) -> ScanOutcome {
    match e.kind() {
        ErrorKind::ConnectionRefused | ErrorKind::ConnectionReset => {
            ScanOutcome::Closed(ClosedReason::Refused)
        }
        ErrorKind::HostUnreachable | ErrorKind::NetworkUnreachable => {
            ScanOutcome::Closed(ClosedReason::Unreachable)
        }
        ErrorKind::TimedOut => ScanOutcome::Closed(ClosedReason::TimedOut),
        _ => ScanOutcome::Errored(e.to_string()),
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
