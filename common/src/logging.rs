//! Thin wrappers over `tracing` so every crate logs under the `knockr::` targets.
//!
//! The terminal formatter in the CLI keys its prefix symbols off these targets.

pub const TARGET_INFO: &str = "knockr::info";
pub const TARGET_SUCCESS: &str = "knockr::success";
pub const TARGET_PRINT: &str = "knockr::print";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::logging::TARGET_INFO, $($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::logging::TARGET_SUCCESS, $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "knockr::warn", $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: "knockr::error", $($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!(target: "knockr::debug", $($arg)*)
    };
}
