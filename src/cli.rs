//! CLI Argument Parsing
//!
//! Global flags (--config, --json, --verbose) are inherited by all
//! subcommands. Every flag is optional; the bare commands reproduce the
//! default `src/*.scss` -> `dist/spartan.scss` bundle.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spartan - stylesheet bundle builder
#[derive(Parser, Debug)]
#[command(name = "spartan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (missing file means defaults)
    #[arg(short, long, global = true, default_value = spartan::config::CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Output events as NDJSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Compile, concatenate and write the bundle once
    Build,

    /// Rebuild the bundle on every source change
    Watch,

    /// Build once, then watch
    Dev,
}
