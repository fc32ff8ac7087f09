//! Change detection on top of `notify`

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;

use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{SpartanError, SpartanResult};
use crate::event::ChangeKind;
use crate::source::SourcePattern;
use crate::writer::is_temp_file;

/// A relevant change to a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

/// Map a raw notify event onto a source change.
///
/// Returns the first path in the event that matches `pattern`. Access events,
/// in-flight bundle writes and paths in `ignored` never trigger a rebuild.
pub fn classify(event: &Event, pattern: &SourcePattern, ignored: &[PathBuf]) -> Option<Change> {
    let (index, path) = event.paths.iter().enumerate().find(|(_, path)| {
        !ignored.contains(path) && !is_temp_file(path) && pattern.matches(path)
    })?;

    let kind = match event.kind {
        EventKind::Create(_) => ChangeKind::Created,
        EventKind::Remove(_) => ChangeKind::Removed,
        EventKind::Modify(ModifyKind::Metadata(_)) => return None,
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => ChangeKind::Removed,
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => ChangeKind::Created,
        // `Both` lists the old name first
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if index == 0 => {
            ChangeKind::Removed
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => ChangeKind::Created,
        // Backends that cannot tell what happened report `Any`
        EventKind::Modify(_) | EventKind::Any => ChangeKind::Modified,
        EventKind::Access(_) | EventKind::Other => return None,
    };

    Some(Change {
        path: path.clone(),
        kind,
    })
}

/// Registered watch on a source pattern's directory.
///
/// The notify backend thread only forwards raw events into a channel; all
/// filtering happens on the thread calling [`ChangeWatcher::next_change`].
pub struct ChangeWatcher {
    // Dropping the watcher unregisters it
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    pattern: SourcePattern,
    ignored: Vec<PathBuf>,
}

impl ChangeWatcher {
    /// Start watching the directory `pattern` is anchored in.
    pub fn new(pattern: SourcePattern) -> SpartanResult<Self> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        let mode = if pattern.is_recursive() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        let dir = pattern.watch_dir();
        watcher.watch(&dir, mode)?;
        tracing::debug!(dir = %dir.display(), ?mode, "watching");

        Ok(Self {
            _watcher: watcher,
            rx,
            pattern,
            ignored: Vec::new(),
        })
    }

    /// Never report changes to these paths (e.g. the bundle itself)
    pub fn ignoring(mut self, paths: Vec<PathBuf>) -> Self {
        self.ignored = paths;
        self
    }

    /// Wait up to `timeout` for the next raw event.
    ///
    /// `None` on timeout or for an event that concerns no source file.
    pub fn next_change(&self, timeout: Duration) -> Option<SpartanResult<Change>> {
        match self.rx.recv_timeout(timeout) {
            Ok(Ok(event)) => {
                let change = classify(&event, &self.pattern, &self.ignored);
                if change.is_none() {
                    tracing::trace!(?event, "ignored event");
                }
                change.map(Ok)
            }
            Ok(Err(e)) => Some(Err(SpartanError::Watch(e))),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                Some(Err(SpartanError::Watch(notify::Error::generic(
                    "watcher channel closed",
                ))))
            }
        }
    }
}
