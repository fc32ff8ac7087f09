//! File watcher for continuous rebuilds
//!
//! Implements the `watch` command:
//! - One rebuild per matching create/modify/remove event, never merged
//! - Events are handled one at a time on the watching thread
//! - A failed rebuild is reported and watching continues
//! - Graceful Ctrl+C shutdown through a shared `running` flag

mod change;
mod run;

pub use change::{classify, Change, ChangeWatcher};
pub use run::{watch, POLL_INTERVAL};
