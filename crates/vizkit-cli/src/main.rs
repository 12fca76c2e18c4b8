//! vizkit CLI entry point.

use std::process;

use clap::Parser;
use log::{LevelFilter, debug, error, warn};

use vizkit_cli::{Args, CliError, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args);
    debug!(args:?; "Parsed arguments");

    if let Err(err) = vizkit_cli::run(&args) {
        report(&err);
        process::exit(1);
    }
}

/// Installs `env_logger`, falling back to `warn` for an unknown `--log-level`.
fn init_logger(args: &Args) {
    let filter = args.log_filter();
    let level = match &filter {
        Ok(level) => *level,
        Err(_) => LevelFilter::Warn,
    };

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .format_timestamp(None)
        .init();

    if let Err(err) = filter {
        warn!(log_level:% = args.log_level, err:%; "Unknown log level, logging warnings only");
    }
}

fn report(err: &CliError) {
    let handler = miette::GraphicalReportHandler::new();

    for diagnostic in to_reportables(err) {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, &diagnostic) {
            Ok(()) => error!("{rendered}"),
            Err(_) => error!("{err}"),
        }
    }
}
