//! Renders a finished scan.
//!
//! The `*_line` helpers build plain text; the `print_*` functions add color and
//! write through [`print::print`].

use std::time::Duration;

use colored::*;
use knockr_common::{config::Config, network::target::TargetAddr, services::OpenPort};
use knockr_core::scanner::ScanReport;

use crate::mprint;
use crate::terminal::{colors, print};

pub const NO_OPEN_PORTS: &str = "No open ports detected.";

pub fn live_feed_line(port: u16) -> String {
    format!("Port {port} is open")
}

pub fn summary_row(record: &OpenPort) -> String {
    format!("{:>5}  |  {}", record.port, record.service)
}

/// One row per open port, or the single "nothing found" line.
pub fn summary_lines(open: &[u16]) -> Vec<String> {
    if open.is_empty() {
        return vec![NO_OPEN_PORTS.to_string()];
    }

    open.iter()
        .copied()
        .map(OpenPort::from)
        .map(|record| summary_row(&record))
        .collect()
}

pub fn single_port_line(target: TargetAddr, port: u16, is_open: bool) -> String {
    let state = if is_open { "open" } else { "closed" };
    format!("Port {port} is {state} on host {target}")
}

pub fn tally_line(report: &ScanReport) -> String {
    let unit = if report.probed == 1 { "port" } else { "ports" };
    format!(
        "{} {unit} probed: {} open, {} errored",
        report.probed,
        report.open.len(),
        report.errored
    )
}

pub fn elapsed_line(elapsed: Duration) -> String {
    format!("Scan completed in {:.2} seconds", elapsed.as_secs_f64())
}

/// Prints either the one-line verdict for a single port or the open port table.
pub fn print_report(target: TargetAddr, single: Option<u16>, report: &ScanReport, cfg: &Config) {
    match single {
        Some(port) => print_single_port(target, port, report),
        None => print_summary(report, cfg),
    }
}

fn print_single_port(target: TargetAddr, port: u16, report: &ScanReport) {
    let is_open: bool = report.open.contains(&port);
    let color: Color = if is_open { colors::OPEN } else { colors::CLOSED };
    print::print(&format!("{}", single_port_line(target, port, is_open).color(color)));
}

fn print_summary(report: &ScanReport, cfg: &Config) {
    if report.open.is_empty() {
        print::print(&format!("{}", NO_OPEN_PORTS.color(colors::CLOSED)));
        return;
    }

    if cfg.quiet == 0 {
        mprint!();
    }
    print::header("open ports summary", cfg.quiet);

    for row in summary_lines(&report.open) {
        let (port, service) = row.split_once('|').unwrap_or((row.as_str(), ""));
        print::print(&format!(
            "{}{}{}",
            port.color(colors::ACCENT),
            "|".color(colors::SEPARATOR),
            service.color(colors::PRIMARY)
        ));
    }
}

pub fn print_elapsed(report: &ScanReport, elapsed: Duration, cfg: &Config) {
    let tally: ColoredString = tally_line(report).color(colors::TEXT_DEFAULT);
    let elapsed: ColoredString = elapsed_line(elapsed).bold().yellow();

    if cfg.quiet == 0 {
        print::fat_separator();
        print::centerln(&tally.to_string());
        print::centerln(&elapsed.to_string());
    } else {
        mprint!(&elapsed.to_string());
    }
}
