//! Write-if-changed file output.

use crate::artifact::WriteOutcome;
use crate::error::CodegenError;
use std::path::Path;

/// Number of leading header lines ignored when comparing content.
///
/// Every template emits exactly this many header lines, the first of which
/// carries the generation timestamp.
pub const HEADER_LINES: usize = 3;

/// Writes `content` to `path` unless the file already holds the same content
/// after the first [`HEADER_LINES`] lines.
///
/// Unchanged files keep their modification time, so build systems do not
/// rebuild them. Parent directories are created as needed.
///
/// # Errors
/// Returns `CodegenError::Io` if the file cannot be read or written.
pub fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome, CodegenError> {
    if path.is_file() {
        let existing = std::fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))?;
        if body(&existing).eq(body(content)) {
            tracing::debug!(path = %path.display(), "unchanged, skipping write");
            return Ok(WriteOutcome::Unchanged);
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CodegenError::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| CodegenError::io(path, e))?;
    tracing::info!(path = %path.display(), "written");
    Ok(WriteOutcome::Written)
}

/// Writes a user-editable file only if it is absent or `overwrite` is set.
///
/// # Errors
/// Returns `CodegenError::Io` if the file cannot be written.
pub fn write_skeleton(
    path: &Path,
    content: &str,
    overwrite: bool,
) -> Result<WriteOutcome, CodegenError> {
    if path.exists() && !overwrite {
        tracing::debug!(path = %path.display(), "skeleton exists, preserving");
        return Ok(WriteOutcome::Preserved);
    }
    write_if_changed(path, content)
}

fn body(content: &str) -> impl Iterator<Item = &str> {
    content.split('\n').skip(HEADER_LINES)
}
