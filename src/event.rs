//! Build and watch events
//!
//! Progress is reported through a callback taking [`BuildEvent`]. The CLI
//! renders each event as a console line, or as NDJSON with `--json`.

use serde::Serialize;

/// Kind of file-system change that triggered a rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ChangeKind::Created => "created",
            ChangeKind::Modified => "modified",
            ChangeKind::Removed => "removed",
        };
        f.write_str(label)
    }
}

/// Event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BuildEvent {
    WatchStarted {
        pattern: String,
        dir: String,
    },
    FileChanged {
        path: String,
        kind: ChangeKind,
    },
    BuildStarted,
    BuildComplete {
        output: String,
        bytes: usize,
        sources: usize,
        skipped: usize,
        digest: String,
    },
    Error {
        message: String,
    },
    Shutdown,
}

impl BuildEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, BuildEvent::Error { .. })
    }
}
