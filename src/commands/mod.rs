//! Command dispatch

mod build;
mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use spartan::config::Config;
use spartan::BuildPipeline;

use crate::cli::{Cli, Commands};

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Invocation directory; the glob and output dir are relative to it
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub json: bool,
}

impl CommandContext {
    /// Load the config (warning about unknown keys) and set up the pipeline
    pub fn pipeline(&self) -> Result<BuildPipeline> {
        let (config, warnings) = Config::load_or_default(&self.config_path)?;
        for warning in &warnings {
            tracing::warn!("{warning}");
        }

        BuildPipeline::new(&self.root, config).with_context(|| {
            format!("cannot set up build from {}", self.config_path.display())
        })
    }

    pub fn emit(&self, event: &spartan::BuildEvent) {
        crate::render::emit(event, self.json, &self.root);
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let root = std::env::current_dir().context("cannot determine current directory")?;
    let ctx = CommandContext {
        config_path: resolve(&root, &cli.config),
        root,
        json: cli.json,
    };

    match cli.command {
        Commands::Build => build::cmd_build(&ctx),
        Commands::Watch => watch::cmd_watch(&ctx, false),
        Commands::Dev => watch::cmd_watch(&ctx, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_keeps_absolute_paths() {
        let root = Path::new("/project");
        assert_eq!(
            resolve(root, Path::new("/etc/spartan.toml")),
            PathBuf::from("/etc/spartan.toml")
        );
        assert_eq!(
            resolve(root, Path::new("spartan.toml")),
            PathBuf::from("/project/spartan.toml")
        );
    }
}
