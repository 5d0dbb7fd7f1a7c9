use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

const TEMPLATE: &str = "{spinner:.blue} {msg} {wide_bar:.cyan/blue} {pos}/{len}";

fn scan_style() -> ProgressStyle {
    ProgressStyle::with_template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICK_STRINGS)
}

/// Creates the span that carries the scan progress bar.
///
/// The bar is drawn while the span is entered and cleared once the last clone
/// of it is dropped.
pub fn scan_span(total: usize) -> Span {
    let span = info_span!("scan", indicatif.pb_show = true);
    span.pb_set_style(&scan_style());
    span.pb_set_length(total as u64);
    span.pb_set_message("Probing ports...");
    span
}

pub fn report_progress(span: &Span) {
    span.pb_inc(1);
}

pub fn report_open_found(span: &Span, count: usize) {
    let unit = if count == 1 { "port" } else { "ports" };
    span.pb_set_message(&format!("Identified {count} open {unit} so far..."));
}
