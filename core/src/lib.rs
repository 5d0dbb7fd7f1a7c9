//! Probing engine for `knockr`.
//!
//! * [`scanner`] coordinates a scan: one task per port, bounded by a worker pool.
//! * [`network::tcp`] holds the TCP connect prober the coordinator dispatches.

pub mod network;
pub mod scanner;
