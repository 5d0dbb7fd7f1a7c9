use colored::*;
use knockr_common::logging::TARGET_PRINT;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

const DISCLAIMER: &str = "DISCLAIMER: Port scanning can be intrusive and impact network traffic. \
Do not execute this tool on a target without permission.";

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

/// Writes a line to the terminal through the logging pipeline, undecorated.
pub fn print(msg: &str) {
    info!(target: TARGET_PRINT, raw_msg = msg);
}

pub fn disclaimer() {
    print(&format!("{}", DISCLAIMER.yellow()));
    print("");
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    print(&header_line(msg));
}

fn header_line(msg: &str) -> String {
    let formatted: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let msg_len: usize = UnicodeWidthStr::width(formatted.as_str());

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    format!(
        "{}{}{}",
        "─".repeat(left).color(colors::SEPARATOR),
        formatted.bright_green(),
        "─".repeat(right).color(colors::SEPARATOR)
    )
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR);
    print(&format!("{}", sep));
}

pub fn centerln(msg: &str) {
    let width: usize = console::measure_text_width(msg);
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    print(&format!("{}{}", space, msg));
}
