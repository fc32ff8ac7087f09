//! Spartan - stylesheet bundle builder
//!
//! Selects stylesheet sources with a glob, optionally runs each one through
//! the Sass compiler, concatenates the results in order and writes a single
//! bundle into a destination directory. The watcher re-runs that pipeline on
//! every source change.

pub mod compiler;
pub mod concat;
pub mod config;
pub mod error;
pub mod event;
pub mod pipeline;
pub mod source;
pub mod watcher;
pub mod writer;

// Re-exports for convenience
pub use compiler::{compile_sources, Passthrough, Preprocessor, SassPreprocessor};
pub use concat::{concatenate, OutputArtifact};
pub use config::{Config, OutputStyle};
pub use error::{SpartanError, SpartanResult};
pub use event::{BuildEvent, ChangeKind};
pub use pipeline::{BuildPipeline, BuildReport};
pub use source::{SourceFileSet, SourcePattern};
pub use watcher::watch;
pub use writer::write_artifact;
