#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Context as _;
use clap::Parser as _;
use timesheet_cli::{cli::Cli, configuration::get_configuration, runtime, Runner};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if let Err(e) = timesheet_cli::tracing::init(&args) {
        eprintln!("Failed to start tracing: {e}");
    }

    let configuration = get_configuration().context("failed to load configuration")?;

    let handle = runtime::start()?;
    // This guard must be held to call `tokio::spawn` anywhere in the program
    let _enter = handle.enter();

    Runner::new(&configuration)?.run(args.command)
}
