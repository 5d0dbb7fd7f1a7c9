mod commands;
mod terminal;

use std::time::Instant;

use commands::{CommandLine, scan};
use knockr_common::config::Config;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_handle = logging::init_logging()?;
    print::disclaimer();

    let start_time: Instant = Instant::now();
    let commands = CommandLine::parse_args();
    log_handle.set_verbosity(commands.verbose)?;

    let cfg = Config {
        quiet: commands.quiet,
        ..Config::default()
    };

    print::header("starting scanner", cfg.quiet);
    scan::scan(commands.target, &commands.ports, &cfg, start_time).await
}
