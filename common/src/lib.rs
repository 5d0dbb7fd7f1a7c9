//! Shared building blocks for the `knockr` workspace.
//!
//! Everything in here is free of network IO: the scan target and port set
//! models, per-port outcomes, the static service table, error kinds and the
//! logging macros used by the other crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod services;

#[doc(hidden)]
pub use tracing;
