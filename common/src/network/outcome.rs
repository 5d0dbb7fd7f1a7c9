use std::fmt;

/// Why a probe counted a port as not open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosedReason {
    /// The host answered with a reset.
    Refused,
    /// The host or network reported itself unreachable.
    Unreachable,
    /// Nothing came back before the probe timeout.
    TimedOut,
}

impl fmt::Display for ClosedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ClosedReason::Refused => "connection refused",
            ClosedReason::Unreachable => "unreachable",
            ClosedReason::TimedOut => "timed out",
        };
        f.write_str(text)
    }
}

/// Result of probing a single port.
///
/// Only [`ScanOutcome::Open`] ends up in a report. The reason carried by
/// `Closed` is diagnostic; refusal and timeout are reported the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Open,
    Closed(ClosedReason),
    Errored(String),
}

impl ScanOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, ScanOutcome::Open)
    }
}

/// A port paired with what its probe returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortOutcome {
    pub port: u16,
    pub outcome: ScanOutcome,
}

impl PortOutcome {
    pub fn new(port: u16, outcome: ScanOutcome) -> Self {
        Self { port, outcome }
    }
}
