//! Configuration module for Spartan
//!
//! Settings come from an optional `spartan.toml` in the invocation
//! directory. A missing file means built-in defaults, which reproduce the
//! plain `src/*.scss` -> `dist/spartan.scss` concatenation.

mod loader;
mod types;

pub use loader::ConfigWarning;
pub use types::{CompileConfig, Config, OutputConfig, OutputStyle, SourceConfig};

/// Default config file name, looked up relative to the invocation directory
pub const CONFIG_FILE_NAME: &str = "spartan.toml";
