//! Watch loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::SpartanResult;
use crate::event::BuildEvent;
use crate::pipeline::BuildPipeline;

use super::change::{Change, ChangeWatcher};

/// How often the loop re-checks the `running` flag while idle
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Watch the pipeline's sources and rebuild on every matching change.
///
/// Blocks until `running` is cleared. Only failing to register the watch is
/// an error; rebuild failures are reported through `on_event`.
pub fn watch(
    pipeline: &BuildPipeline,
    running: Arc<AtomicBool>,
    on_event: impl Fn(BuildEvent),
) -> SpartanResult<()> {
    let watcher = ChangeWatcher::new(pipeline.pattern().clone())?
        .ignoring(vec![pipeline.output_path()]);

    on_event(BuildEvent::WatchStarted {
        pattern: pipeline.pattern().as_str().to_string(),
        dir: pipeline.pattern().watch_dir().display().to_string(),
    });

    while running.load(Ordering::SeqCst) {
        match watcher.next_change(POLL_INTERVAL) {
            Some(Ok(change)) => rebuild(pipeline, &change, &on_event),
            Some(Err(e)) => on_event(BuildEvent::Error {
                message: e.to_string(),
            }),
            None => {}
        }
    }

    on_event(BuildEvent::Shutdown);
    Ok(())
}

/// Handle one change: report it, then run the pipeline to completion.
pub(crate) fn rebuild(pipeline: &BuildPipeline, change: &Change, on_event: &impl Fn(BuildEvent)) {
    on_event(BuildEvent::FileChanged {
        path: change.path.display().to_string(),
        kind: change.kind,
    });

    // Already reported as an error event
    if let Err(e) = pipeline.run_with_events(on_event) {
        tracing::debug!(error = %e, "rebuild failed, still watching");
    }
}
