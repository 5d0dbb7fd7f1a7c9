use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The target could not be parsed as an IPv4 or IPv6 address.
    #[error("invalid IP address: {input}")]
    InvalidAddress { input: String },

    /// The port specification failed grammar or range validation.
    #[error("invalid port specification '{token}': {reason}")]
    InvalidPortSpec { token: String, reason: String },

    /// A single probe failed for a reason other than refusal or timeout.
    #[error("error scanning port {port}: {reason}")]
    Probe { port: u16, reason: String },
}

impl ScanError {
    pub(crate) fn port_spec(token: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPortSpec {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
