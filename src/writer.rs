//! Write step
//!
//! Writes go to a temp file in the destination directory which is then
//! renamed over the target, so readers never see a partial bundle.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::concat::OutputArtifact;
use crate::error::{SpartanError, SpartanResult};

/// File-name prefix of in-flight writes
pub const TEMP_PREFIX: &str = ".spartan-tmp";

/// Whether `path` is one of our in-flight temp files
pub fn is_temp_file(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(TEMP_PREFIX))
}

/// Write `content` to `path` atomically, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> SpartanResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| SpartanError::io(dir, e))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(dir)
        .map_err(|e| SpartanError::io(dir, e))?;
    tmp.write_all(content)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| SpartanError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| SpartanError::io(path, e.error))?;

    Ok(())
}

/// Persist `artifact` as `dest_dir/<name>`, overwriting any existing file.
pub fn write_artifact(artifact: &OutputArtifact, dest_dir: &Path) -> SpartanResult<PathBuf> {
    let target = dest_dir.join(artifact.name());
    atomic_write(&target, artifact.content())?;
    tracing::debug!(path = %target.display(), bytes = artifact.len(), "wrote artifact");
    Ok(target)
}
