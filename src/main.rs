//! Spartan CLI - stylesheet bundle builder
//!
//! Usage: spartan <COMMAND>
//!
//! Commands:
//!   build   Compile, concatenate and write the bundle once
//!   watch   Rebuild the bundle on every source change
//!   dev     Build once, then watch

mod cli;
mod commands;
mod logging;
mod render;

use anyhow::Result;
use clap::Parser;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    commands::run(cli)
}
