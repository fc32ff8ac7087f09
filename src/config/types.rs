//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SpartanResult;

use super::loader::{self, ConfigWarning};

/// Which files make up the bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Glob pattern, relative to the invocation directory
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
        }
    }
}

fn default_pattern() -> String {
    "src/*.scss".to_string()
}

/// Where the bundle goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            name: default_name(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_name() -> String {
    "spartan.scss".to_string()
}

/// CSS emitted by the Sass compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Expanded,
    Compressed,
}

impl From<OutputStyle> for grass::OutputStyle {
    fn from(style: OutputStyle) -> Self {
        match style {
            OutputStyle::Expanded => grass::OutputStyle::Expanded,
            OutputStyle::Compressed => grass::OutputStyle::Compressed,
        }
    }
}

/// Preprocessing step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CompileConfig {
    /// Run each source through the Sass compiler before concatenation
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub style: OutputStyle,

    /// Extra directories searched by `@use` / `@import`
    #[serde(default)]
    pub load_paths: Vec<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub compile: CompileConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> SpartanResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SpartanResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> SpartanResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(path)
    }

    /// Destination path of the bundle, relative to `root`
    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output.dir).join(&self.output.name)
    }
}
