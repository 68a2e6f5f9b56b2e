//! # tabprep command line
//!
//! ```bash
//! tabprep info data.csv
//! tabprep clean data.csv -o clean.csv --normalize edad salario
//! tabprep run data.csv --plan plan.json -o clean.xlsx
//! ```
//!
//! Logging goes to stderr (set `RUST_LOG=debug` for detail); results go to stdout.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let settings = cli::load_settings(&cli)?;

    tabprep::logging::init(&settings.logging)?;

    cli::run_command(cli.command, &settings)
}
