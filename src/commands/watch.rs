use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use spartan::BuildEvent;

use super::CommandContext;

/// Watch sources and rebuild on change; `initial_build` runs one build first
/// (the `dev` command).
pub fn cmd_watch(ctx: &CommandContext, initial_build: bool) -> Result<()> {
    let pipeline = ctx.pipeline()?;

    if initial_build {
        // A failed first build is already reported; keep watching so the
        // next edit can fix it
        if let Err(e) = pipeline.run_with_events(&|event: BuildEvent| ctx.emit(&event)) {
            tracing::debug!(error = %e, "initial build failed");
        }
    }

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("cannot install Ctrl+C handler")?;

    spartan::watch(&pipeline, running, |event| ctx.emit(&event))?;

    Ok(())
}
