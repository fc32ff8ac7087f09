//! Compile step
//!
//! Each source file is read and handed to a [`Preprocessor`]. A file the
//! preprocessor rejects is reported and left out; the rest still make it
//! into the bundle. A file that cannot be read aborts the step.

use std::path::{Path, PathBuf};

use crate::config::{CompileConfig, OutputStyle};
use crate::error::{SpartanError, SpartanResult};
use crate::source::SourceFileSet;

/// Translates one stylesheet into plain CSS
pub trait Preprocessor {
    /// `path` is the file the bytes came from; relative imports resolve
    /// against its directory.
    fn process(&self, path: &Path, source: Vec<u8>) -> SpartanResult<Vec<u8>>;
}

/// Hands content through untouched (compilation disabled)
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Preprocessor for Passthrough {
    fn process(&self, _path: &Path, source: Vec<u8>) -> SpartanResult<Vec<u8>> {
        Ok(source)
    }
}

/// Sass compiler backed by `grass`
#[derive(Debug, Clone, Default)]
pub struct SassPreprocessor {
    style: OutputStyle,
    load_paths: Vec<PathBuf>,
}

impl SassPreprocessor {
    pub fn new(style: OutputStyle, load_paths: Vec<PathBuf>) -> Self {
        Self { style, load_paths }
    }
}

impl Preprocessor for SassPreprocessor {
    /// Compiles from `path` rather than from `source`: grass resolves
    /// relative imports against the entry file's location, and a string
    /// input has none.
    fn process(&self, path: &Path, source: Vec<u8>) -> SpartanResult<Vec<u8>> {
        if let Err(e) = std::str::from_utf8(&source) {
            return Err(SpartanError::Preprocess {
                file: path.to_path_buf(),
                message: format!("source is not valid UTF-8: {e}"),
            });
        }

        let options = grass::Options::default()
            .style(self.style.into())
            .quiet(true)
            .load_paths(&self.load_paths);

        grass::from_path(path, &options)
            .map(String::into_bytes)
            .map_err(|e| SpartanError::Preprocess {
                file: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}

/// Pick the preprocessor for a compile configuration
pub fn preprocessor_for(config: &CompileConfig, root: &Path) -> Box<dyn Preprocessor> {
    if config.enabled {
        let load_paths = config.load_paths.iter().map(|p| root.join(p)).collect();
        Box::new(SassPreprocessor::new(config.style, load_paths))
    } else {
        Box::new(Passthrough)
    }
}

/// One source after the compile step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSource {
    pub path: PathBuf,
    pub content: Vec<u8>,
}

/// Result of compiling a whole source set
#[derive(Debug, Clone, Default)]
pub struct CompileOutcome {
    /// Successfully processed sources, in input order
    pub compiled: Vec<CompiledSource>,
    /// Sources the preprocessor rejected
    pub skipped: Vec<PathBuf>,
}

/// Run `preprocessor` over every source in order.
///
/// Preprocessing failures go to `on_failure` and the file is skipped.
/// Read failures are returned.
pub fn compile_sources<F>(
    sources: &SourceFileSet,
    preprocessor: &dyn Preprocessor,
    on_failure: F,
) -> SpartanResult<CompileOutcome>
where
    F: Fn(&SpartanError),
{
    let mut outcome = CompileOutcome::default();

    for path in sources {
        let raw = std::fs::read(path).map_err(|e| SpartanError::io(path, e))?;

        match preprocessor.process(path, raw) {
            Ok(content) => outcome.compiled.push(CompiledSource {
                path: path.clone(),
                content,
            }),
            Err(err) if err.is_preprocess() => {
                tracing::debug!(file = %path.display(), error = %err, "skipping source");
                on_failure(&err);
                outcome.skipped.push(path.clone());
            }
            Err(err) => return Err(err),
        }
    }

    Ok(outcome)
}
