//! The scan coordinator.
//!
//! Fans one probe task out per port onto the tokio runtime, with a semaphore
//! acting as the worker pool. At most `concurrency` probes hold a permit at
//! any moment; the rest wait for one to free up. Outcomes are consumed in the
//! order the probes finish and folded into a [`ScanReport`].
//!
//! **Architectural Note:**
//! The coordinator only knows about the [`Prober`] abstraction. The real
//! TCP connect probe lives in [`crate::network::tcp`], and tests drive the
//! coordinator with instrumented probers instead.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::ensure;
use async_trait::async_trait;
use knockr_common::{
    config::Config,
    debug, error,
    error::ScanError,
    network::{
        outcome::{PortOutcome, ScanOutcome},
        ports::PortSet,
        target::TargetAddr,
    },
    warn,
};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::network::tcp::TcpConnectProber;

/// Called on the coordinator for every finished probe, in completion order.
pub type OnOutcome = Box<dyn Fn(&PortOutcome) + Send + Sync>;

/// Defines the strategy for probing a single transport-layer port.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Never fails; every failure mode is folded into the returned outcome.
    async fn probe(&self, addr: SocketAddr) -> ScanOutcome;
}

/// What a finished scan found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Open ports, sorted ascending.
    pub open: Vec<u16>,
    pub probed: usize,
    pub closed: usize,
    pub errored: usize,
}

impl ScanReport {
    fn record(&mut self, result: &PortOutcome) {
        self.probed += 1;
        match result.outcome {
            ScanOutcome::Open => self.open.push(result.port),
            ScanOutcome::Closed(_) => self.closed += 1,
            ScanOutcome::Errored(_) => self.errored += 1,
        }
    }

    fn record_lost_task(&mut self) {
        self.probed += 1;
        self.errored += 1;
    }
}

/// Scans every port in `ports` on `target` with the TCP connect prober.
pub async fn perform_scan(
    target: TargetAddr,
    ports: PortSet,
    cfg: &Config,
    on_outcome: Option<OnOutcome>,
) -> anyhow::Result<ScanReport> {
    let prober = Arc::new(TcpConnectProber::new(cfg.probe_timeout));
    scan_with(target, ports, cfg.concurrency, prober, on_outcome).await
}

/// Runs `prober` against every port, keeping at most `concurrency` in flight.
pub async fn scan_with<P>(
    target: TargetAddr,
    ports: PortSet,
    concurrency: usize,
    prober: Arc<P>,
    on_outcome: Option<OnOutcome>,
) -> anyhow::Result<ScanReport>
where
    P: Prober + 'static,
{
    ensure!(concurrency > 0, "concurrency cap must be at least 1");

    let pool: Arc<Semaphore> = Arc::new(Semaphore::new(concurrency));
    let mut tasks: JoinSet<PortOutcome> = JoinSet::new();

    debug!(
        "Dispatching {} probes against {target} with {concurrency} workers",
        ports.len()
    );

    for port in ports {
        let pool = pool.clone();
        let prober = prober.clone();
        let addr: SocketAddr = target.socket_addr(port);

        tasks.spawn(async move {
            // Held until the task returns, whatever the outcome.
            let Ok(_permit) = pool.acquire_owned().await else {
                return PortOutcome::new(port, ScanOutcome::Errored("worker pool closed".into()));
            };
            PortOutcome::new(port, prober.probe(addr).await)
        });
    }

    let mut report = ScanReport::default();

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(result) => {
                log_outcome(&result);
                if let Some(callback) = &on_outcome {
                    callback(&result);
                }
                report.record(&result);
            }
            Err(e) => {
                error!("Probe task failed: {e}");
                report.record_lost_task();
            }
        }
    }

    report.open.sort_unstable();
    Ok(report)
}

fn log_outcome(result: &PortOutcome) {
    match &result.outcome {
        ScanOutcome::Open => {}
        ScanOutcome::Closed(reason) => debug!("Port {} closed: {reason}", result.port),
        ScanOutcome::Errored(reason) => {
            let err = ScanError::Probe {
                port: result.port,
                reason: reason.clone(),
            };
            warn!("{err}");
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use knockr_common::network::outcome::ClosedReason;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn localhost() -> TargetAddr {
        "127.0.0.1".parse().unwrap()
    }

    /// Tracks how many probes are running at the same time.
    #[derive(Default)]
    struct CountingProber {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Prober for CountingProber {
        async fn probe(&self, _addr: SocketAddr) -> ScanOutcome {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(5)).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            ScanOutcome::Closed(ClosedReason::TimedOut)
        }
    }

    /// Lower ports take longer, so they finish last.
    struct SlowLowPortsProber;

    #[async_trait]
    impl Prober for SlowLowPortsProber {
        async fn probe(&self, addr: SocketAddr) -> ScanOutcome {
            let delay = (4 - u64::from(addr.port())) * 100;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            ScanOutcome::Open
        }
    }

    /// Even ports fail, odd ports are open.
    struct FlakyProber;

    #[async_trait]
    impl Prober for FlakyProber {
        async fn probe(&self, addr: SocketAddr) -> ScanOutcome {
            if addr.port() % 2 == 0 {
                ScanOutcome::Errored("too many open files".into())
            } else {
                ScanOutcome::Open
            }
        }
    }

    #[tokio::test]
    async fn never_exceeds_concurrency_cap() {
        let prober = Arc::new(CountingProber::default());
        let ports = PortSet::resolve("1-1000").unwrap();

        let report = scan_with(localhost(), ports, 100, prober.clone(), None)
            .await
            .unwrap();

        let peak = prober.peak.load(Ordering::SeqCst);
        assert!(peak <= 100, "peak of {peak} probes in flight");
        assert!(peak > 1, "probes never ran in parallel");
        assert_eq!(prober.calls.load(Ordering::SeqCst), 1000);
        assert_eq!(prober.in_flight.load(Ordering::SeqCst), 0);
        assert_eq!(report.probed, 1000);
        assert_eq!(report.closed, 1000);
        assert!(report.open.is_empty());
    }

    #[tokio::test]
    async fn cap_of_one_serializes_probes() {
        let prober = Arc::new(CountingProber::default());
        let ports = PortSet::resolve("1-20").unwrap();

        scan_with(localhost(), ports, 1, prober.clone(), None)
            .await
            .unwrap();

        assert_eq!(prober.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_concurrency_is_rejected() {
        let prober = Arc::new(CountingProber::default());
        let ports = PortSet::resolve("80").unwrap();

        assert!(scan_with(localhost(), ports, 0, prober, None).await.is_err());
    }

    #[tokio::test]
    async fn feed_follows_completion_order_and_report_is_sorted() {
        let seen: Arc<Mutex<Vec<u16>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_ref = seen.clone();
        let on_outcome: OnOutcome = Box::new(move |result: &PortOutcome| {
            seen_ref.lock().unwrap().push(result.port);
        });

        let ports = PortSet::resolve("1,2,3").unwrap();
        let report = scan_with(
            localhost(),
            ports,
            10,
            Arc::new(SlowLowPortsProber),
            Some(on_outcome),
        )
        .await
        .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![3, 2, 1]);
        assert_eq!(report.open, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn probe_errors_do_not_abort_the_scan() {
        let ports = PortSet::resolve("1-10").unwrap();
        let report = scan_with(localhost(), ports, 4, Arc::new(FlakyProber), None)
            .await
            .unwrap();

        assert_eq!(report.open, vec![1, 3, 5, 7, 9]);
        assert_eq!(report.errored, 5);
        assert_eq!(report.probed, 10);
    }

    #[tokio::test]
    async fn open_set_matches_local_listeners() {
        let mut listeners = Vec::new();
        let mut expected = Vec::new();
        for _ in 0..3 {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            expected.push(listener.local_addr().unwrap().port());
            listeners.push(listener);
        }

        let mut closed = Vec::new();
        for _ in 0..2 {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            closed.push(listener.local_addr().unwrap().port());
        }

        let spec = expected
            .iter()
            .chain(closed.iter())
            .map(u16::to_string)
            .collect::<Vec<String>>()
            .join(",");
        let ports = PortSet::resolve(&spec).unwrap();

        let report = perform_scan(localhost(), ports, &Config::default(), None)
            .await
            .unwrap();

        expected.sort_unstable();
        assert_eq!(report.open, expected);
        assert_eq!(report.probed, 5);
        drop(listeners);
    }

    #[tokio::test]
    async fn single_port_runs_through_the_same_path() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let ports = PortSet::resolve(&port.to_string()).unwrap();

        let report = perform_scan(localhost(), ports, &Config::default(), None)
            .await
            .unwrap();

        assert_eq!(report.open, vec![port]);
        assert_eq!(report.probed, 1);
    }
}
