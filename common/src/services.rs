//! Well-known port to service name table.

pub const UNKNOWN_SERVICE: &str = "Unknown service";

/// Conventional service name for `port`, or [`UNKNOWN_SERVICE`].
pub fn service_name(port: u16) -> &'static str {
    match port {
        21 => "FTP",
        22 => "SSH",
        23 => "Telnet",
        25 => "SMTP",
        53 => "DNS",
        80 => "HTTP",
        110 => "POP3",
        143 => "IMAP",
        443 => "HTTPS",
        3306 => "MySQL",
        3389 => "RDP",
        5432 => "PostgreSQL",
        27017 => "MongoDB",
        _ => UNKNOWN_SERVICE,
    }
}

/// An open port with its resolved service name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OpenPort {
    pub port: u16,
    pub service: &'static str,
}

impl From<u16> for OpenPort {
    fn from(port: u16) -> Self {
        Self {
            port,
            service: service_name(port),
        }
    }
}
