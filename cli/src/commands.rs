pub mod scan;

use clap::{ArgAction, Parser};
use knockr_common::config::DEFAULT_PORT_SPEC;
use knockr_common::network::target::TargetAddr;

#[derive(Parser)]
#[command(name = "knockr", version)]
#[command(about = "A concurrent TCP port scanner.")]
pub struct CommandLine {
    /// IP address to scan (e.g. 192.168.1.2)
    #[arg(short = 'i', value_name = "ADDRESS")]
    pub target: TargetAddr,

    /// Individual port, list or range of ports to scan (e.g. 23; 80,443; 1-500)
    #[arg(short = 'p', value_name = "PORTS", default_value = DEFAULT_PORT_SPEC)]
    pub ports: String,

    /// Hide headers and the live feed of open ports
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Show per-port diagnostics (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
