//! Console rendering of build events

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use spartan::BuildEvent;

/// `HH:MM:SS` (UTC) for line prefixes
pub fn timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 86_400;
            let h = secs / 3600;
            let m = (secs % 3600) / 60;
            let s = secs % 60;
            format!("{:02}:{:02}:{:02}", h, m, s)
        })
        .unwrap_or_else(|_| "00:00:00".to_string())
}

fn relative<'a>(path: &'a str, root: &Path) -> &'a str {
    let root = root.to_string_lossy();
    path.strip_prefix(&*root)
        .and_then(|rest| rest.strip_prefix(std::path::MAIN_SEPARATOR))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(path)
}

/// One human-readable line (with trailing newline) for `event`
pub fn render_event(timestamp: &str, event: &BuildEvent, root: &Path) -> String {
    let prefix = format!("[{}]", timestamp);

    match event {
        BuildEvent::WatchStarted { pattern, dir } => format!(
            "{} 👀 Watching {} (in {}), press Ctrl+C to stop\n",
            prefix,
            pattern,
            relative(dir, root)
        ),
        BuildEvent::FileChanged { path, kind } => {
            format!("{} 📝 {}: {}\n", prefix, kind, relative(path, root))
        }
        BuildEvent::BuildStarted => format!("{} 🔄 Building...\n", prefix),
        BuildEvent::BuildComplete {
            output,
            bytes,
            sources,
            skipped,
            ..
        } => {
            if *skipped > 0 {
                format!(
                    "{} ⚠ Wrote {} ({} bytes, {} sources, {} skipped)\n",
                    prefix,
                    relative(output, root),
                    bytes,
                    sources,
                    skipped
                )
            } else {
                format!(
                    "{} ✓ Wrote {} ({} bytes, {} sources)\n",
                    prefix,
                    relative(output, root),
                    bytes,
                    sources
                )
            }
        }
        BuildEvent::Error { message } => format!("{} ✗ Error: {}\n", prefix, message),
        BuildEvent::Shutdown => format!("{} 👋 Shutting down...\n", prefix),
    }
}

/// Print `event` to stdout (errors to stderr), or as NDJSON
pub fn emit(event: &BuildEvent, json: bool, root: &Path) {
    if json {
        println!("{}", event.to_json());
        return;
    }

    let line = render_event(&timestamp(), event, root);
    if event.is_error() {
        eprint!("{line}");
    } else {
        print!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spartan::ChangeKind;

    #[test]
    fn timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), 8);
        assert_eq!(ts.as_bytes()[2], b':');
        assert_eq!(ts.as_bytes()[5], b':');
    }

    #[test]
    fn build_complete_is_relative_to_root() {
        let root = Path::new("/project");
        let event = BuildEvent::BuildComplete {
            output: "/project/dist/spartan.scss".to_string(),
            bytes: 25,
            sources: 2,
            skipped: 0,
            digest: "sha256:00".to_string(),
        };

        assert_eq!(
            render_event("12:00:00", &event, root),
            "[12:00:00] ✓ Wrote dist/spartan.scss (25 bytes, 2 sources)\n"
        );
    }

    #[test]
    fn build_complete_mentions_skipped_sources() {
        let event = BuildEvent::BuildComplete {
            output: "dist/app.css".to_string(),
            bytes: 10,
            sources: 2,
            skipped: 1,
            digest: "sha256:00".to_string(),
        };

        let line = render_event("12:00:00", &event, Path::new("/project"));
        assert!(line.contains("1 skipped"));
        assert!(line.contains("dist/app.css"));
    }

    #[test]
    fn file_changed_shows_kind() {
        let event = BuildEvent::FileChanged {
            path: "/project/src/a.scss".to_string(),
            kind: ChangeKind::Created,
        };

        assert_eq!(
            render_event("01:02:03", &event, Path::new("/project")),
            "[01:02:03] 📝 created: src/a.scss\n"
        );
    }

    #[test]
    fn error_line() {
        let event = BuildEvent::Error {
            message: "boom".to_string(),
        };
        assert_eq!(
            render_event("01:02:03", &event, Path::new("/")),
            "[01:02:03] ✗ Error: boom\n"
        );
    }
}
