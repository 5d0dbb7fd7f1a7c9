//! # Port Set
//!
//! Turns a user supplied port specification into the ordered list of ports a
//! scan will probe.
//!
//! Three forms are accepted, checked in this order:
//! * **List**: `"22,80,443"`, probed in the given order, duplicates dropped.
//! * **Range**: `"1-1024"`, both ends inclusive.
//! * **Single**: `"8080"`.
//!
//! Port 0 is not a connectable TCP port and is rejected along with anything
//! above 65535. A range whose end is below its start is an error rather than an
//! empty scan.

use std::collections::HashSet;
use std::str::FromStr;

use crate::error::ScanError;

pub const MIN_PORT: u16 = 1;
pub const MAX_PORT: u16 = u16::MAX;

/// A non-empty, duplicate free, ordered list of ports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSet {
    ports: Vec<u16>,
}

impl PortSet {
    /// Parses a port specification. See the module docs for the grammar.
    pub fn resolve(spec: &str) -> Result<Self, ScanError> {
        let spec = spec.trim();

        let ports: Vec<u16> = if spec.contains(',') {
            parse_list(spec)?
        } else if spec.contains('-') {
            parse_range(spec)?
        } else {
            vec![parse_port(spec)?]
        };

        Ok(Self { ports })
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Always false for a resolved set.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// The port if this set holds exactly one.
    pub fn single(&self) -> Option<u16> {
        match self.ports.as_slice() {
            [port] => Some(*port),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.ports.iter().copied()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.ports
    }
}

impl FromStr for PortSet {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl IntoIterator for PortSet {
    type Item = u16;
    type IntoIter = std::vec::IntoIter<u16>;

    fn into_iter(self) -> Self::IntoIter {
        self.ports.into_iter()
    }
}

/// Parses "p1,p2,..." keeping the first occurrence of each port.
fn parse_list(spec: &str) -> Result<Vec<u16>, ScanError> {
    let mut seen: HashSet<u16> = HashSet::new();
    let mut ports: Vec<u16> = Vec::new();

    for token in spec.split(',') {
        let port = parse_port(token)?;
        if seen.insert(port) {
            ports.push(port);
        }
    }

    Ok(ports)
}

/// Parses "start-end", both inclusive.
fn parse_range(spec: &str) -> Result<Vec<u16>, ScanError> {
    let Some((start_str, end_str)) = spec.split_once('-') else {
        return Err(ScanError::port_spec(spec, "expected a range like 1-1024"));
    };

    let start = parse_port(start_str)?;
    let end = parse_port(end_str)?;

    if end < start {
        return Err(ScanError::port_spec(
            spec,
            format!("range end {end} is lower than range start {start}"),
        ));
    }

    Ok((start..=end).collect())
}

/// Parses one port token, checking it lies within [`MIN_PORT`, `MAX_PORT`].
fn parse_port(token: &str) -> Result<u16, ScanError> {
    let trimmed = token.trim();

    if trimmed.is_empty() {
        return Err(ScanError::port_spec(token, "empty port"));
    }

    let value: u32 = trimmed
        .parse()
        .map_err(|_| ScanError::port_spec(trimmed, "not a valid port number"))?;

    if value < u32::from(MIN_PORT) || value > u32::from(MAX_PORT) {
        return Err(ScanError::port_spec(
            trimmed,
            format!("port must be between {MIN_PORT} and {MAX_PORT}"),
        ));
    }

    // Range checked above.
    Ok(value as u16)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
