//! `dotlink` binary entry point.
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use dotlink_cli::cli::Cli;
use dotlink_cli::commands;
use dotlink_cli::logging::{self, Log, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbosity(), args.log_file.as_deref());

    let logger = Arc::new(Logger::new());
    let log: Arc<dyn Log> = logger.clone();
    let result = commands::install::run(&args, &log);
    log.debug(&format!(
        "{} warning(s), {} error(s)",
        logger.warning_count(),
        logger.error_count()
    ));
    result
}
