//! ftsmachine CLI binary.

use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use ftsmachine::cli::args::{Command, FtsArgs};
use ftsmachine::cli::commands::execute_command;

fn main() -> anyhow::Result<()> {
    let args = FtsArgs::parse();

    let level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let command = match &args.command {
        Command::Search(_) => "search",
        Command::Stats(_) => "stats",
    };
    execute_command(args).with_context(|| format!("{command} failed"))
}
