use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::Context;
use tracing::Instrument;

use crate::terminal::{report, spinner};
use knockr_common::{
    config::Config,
    info,
    network::{outcome::PortOutcome, ports::PortSet, target::TargetAddr},
    success,
};
use knockr_core::scanner::{self, OnOutcome};

/// Resolves `port_spec`, probes every port on `target` and prints the result.
///
/// `start_time` is taken before any input is resolved so the reported duration
/// covers the whole run.
pub async fn scan(
    target: TargetAddr,
    port_spec: &str,
    cfg: &Config,
    start_time: Instant,
) -> anyhow::Result<()> {
    let ports: PortSet = PortSet::resolve(port_spec)?;
    let single: Option<u16> = ports.single();

    let unit: &str = if single.is_some() { "port" } else { "ports" };
    info!("Scanning {} {unit} on {target}", ports.len());

    let span = spinner::scan_span(ports.len());
    let on_outcome: OnOutcome = progress_callback(span.clone(), single.is_none() && cfg.quiet == 0);

    let report = scanner::perform_scan(target, ports, cfg, Some(on_outcome))
        .instrument(span.clone())
        .await
        .with_context(|| format!("scan of {target} failed"))?;

    drop(span);

    report::print_report(target, single, &report, cfg);
    report::print_elapsed(&report, start_time.elapsed(), cfg);
    Ok(())
}

/// Advances the progress bar and, when `live_feed` is set, announces open
/// ports as they are found.
fn progress_callback(span: tracing::Span, live_feed: bool) -> OnOutcome {
    let open_count = AtomicUsize::new(0);

    Box::new(move |result: &PortOutcome| {
        spinner::report_progress(&span);

        if !result.outcome.is_open() {
            return;
        }

        let found: usize = open_count.fetch_add(1, Ordering::Relaxed) + 1;
        spinner::report_open_found(&span, found);

        if live_feed {
            success!("{}", report::live_feed_line(result.port));
        }
    })
}
