//! Build pipeline
//!
//! ## Flow
//!
//! 1. Expand the source pattern into an ordered file set
//! 2. Compile each file (or pass it through when compilation is off)
//! 3. Concatenate the results in order
//! 4. Write the bundle into the destination directory
//!
//! Used by `build`, and by `watch` on every change event.

use std::path::PathBuf;

use crate::compiler::{compile_sources, preprocessor_for, Preprocessor};
use crate::concat::concatenate;
use crate::config::Config;
use crate::error::{SpartanError, SpartanResult};
use crate::event::BuildEvent;
use crate::source::SourcePattern;
use crate::writer::{is_temp_file, write_artifact};

/// Outcome of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Path the bundle was written to
    pub output: PathBuf,
    /// Bundle size in bytes
    pub bytes: usize,
    /// `sha256:<hex>` of the bundle
    pub digest: String,
    /// Sources included, in concatenation order
    pub included: Vec<PathBuf>,
    /// Sources dropped because preprocessing failed
    pub skipped: Vec<PathBuf>,
}

impl BuildReport {
    /// No source was dropped
    pub fn is_success(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// One configured compile + concatenate + write pipeline.
///
/// Stateless between runs: every call to [`BuildPipeline::run`] re-reads
/// the sources from disk.
pub struct BuildPipeline {
    root: PathBuf,
    config: Config,
    pattern: SourcePattern,
    preprocessor: Box<dyn Preprocessor>,
}

impl std::fmt::Debug for BuildPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildPipeline")
            .field("root", &self.root)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BuildPipeline {
    /// Create a pipeline rooted at `root` (the invocation directory).
    pub fn new(root: impl Into<PathBuf>, config: Config) -> SpartanResult<Self> {
        let root = root.into();
        let pattern = SourcePattern::new(&root, &config.source.pattern)?;
        let preprocessor = preprocessor_for(&config.compile, &root);
        Ok(Self {
            root,
            config,
            pattern,
            preprocessor,
        })
    }

    /// Replace the preprocessor chosen from the config.
    pub fn with_preprocessor(mut self, preprocessor: Box<dyn Preprocessor>) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn pattern(&self) -> &SourcePattern {
        &self.pattern
    }

    pub fn dest_dir(&self) -> PathBuf {
        self.root.join(&self.config.output.dir)
    }

    /// Where the bundle is written
    pub fn output_path(&self) -> PathBuf {
        self.config.output_path(&self.root)
    }

    /// Run once. Preprocessing failures go to `on_failure`; file-system
    /// failures end the run with an error.
    pub fn run<F>(&self, on_failure: F) -> SpartanResult<BuildReport>
    where
        F: Fn(&SpartanError),
    {
        let sources = self
            .pattern
            .expand()?
            .without(&self.output_path())
            .retain(|p| !is_temp_file(p));
        let outcome = compile_sources(&sources, self.preprocessor.as_ref(), on_failure)?;

        let included: Vec<PathBuf> = outcome.compiled.iter().map(|c| c.path.clone()).collect();
        let artifact = concatenate(
            outcome.compiled.iter().map(|c| c.content.as_slice()),
            self.config.output.name.as_str(),
        );
        let output = write_artifact(&artifact, &self.dest_dir())?;

        tracing::info!(
            output = %output.display(),
            bytes = artifact.len(),
            sources = included.len(),
            skipped = outcome.skipped.len(),
            "build complete"
        );

        Ok(BuildReport {
            output,
            bytes: artifact.len(),
            digest: artifact.digest(),
            included,
            skipped: outcome.skipped,
        })
    }

    /// Run once, reporting progress as [`BuildEvent`]s.
    pub fn run_with_events(&self, on_event: &impl Fn(BuildEvent)) -> SpartanResult<BuildReport> {
        on_event(BuildEvent::BuildStarted);

        let result = self.run(|err| {
            on_event(BuildEvent::Error {
                message: err.to_string(),
            });
        });

        match result {
            Ok(report) => {
                on_event(BuildEvent::BuildComplete {
                    output: report.output.display().to_string(),
                    bytes: report.bytes,
                    sources: report.included.len(),
                    skipped: report.skipped.len(),
                    digest: report.digest.clone(),
                });
                Ok(report)
            }
            Err(e) => {
                on_event(BuildEvent::Error {
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }
}
