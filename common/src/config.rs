use std::time::Duration;

/// Maximum number of probes allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 100;

/// How long a single connect attempt may take before the port counts as closed.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Port specification used when the user does not pass one.
pub const DEFAULT_PORT_SPEC: &str = "1-1024";

#[derive(Debug, Clone)]
pub struct Config {
    /// Size of the worker pool.
    ///
    /// Ports beyond this many wait for a free slot before connecting.
    pub concurrency: usize,
    pub probe_timeout: Duration,
    /// 0 prints everything, 1 hides headers and the live feed.
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            probe_timeout: PROBE_TIMEOUT,
            quiet: 0,
        }
    }
}
