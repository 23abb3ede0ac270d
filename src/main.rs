mod analyze_cmd;
mod cli;
mod config;
mod convert;
mod download_cmd;
mod logging;
mod report;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Download(args) => download_cmd::run(args, &config),
        Command::Analyze(args) => analyze_cmd::run(args, &config),
    }
}
