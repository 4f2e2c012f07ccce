//! Root directory preparation
//!
//! Verifies the parent directory and creates the private slot directory.

use std::io::Write;
use std::path::Path;

use tempfile::{Builder, TempDir};

use crate::error::{Result, SpillError};

/// Check that `root` is a writable directory and create a uniquely named
/// subdirectory under it.
///
/// Writability is verified with a probe file that is removed again before
/// returning. The returned `TempDir` removes the subdirectory recursively
/// when closed or dropped.
pub fn prepare_root(root: &Path, prefix: &str) -> Result<TempDir> {
    let meta = std::fs::metadata(root).map_err(|e| root_err(root, e.to_string()))?;
    if !meta.is_dir() {
        return Err(root_err(root, "not a directory".to_string()));
    }

    // Probe: dropped (and deleted) at the end of this block
    {
        let mut probe = Builder::new()
            .prefix("probe-")
            .tempfile_in(root)
            .map_err(|e| root_err(root, format!("not writable: {}", e)))?;
        probe
            .write_all(b"probe")
            .map_err(|e| root_err(root, format!("not writable: {}", e)))?;
    }

    let dir = Builder::new()
        .prefix(prefix)
        .tempdir_in(root)
        .map_err(|e| root_err(root, format!("cannot create private directory: {}", e)))?;

    tracing::debug!("Created slot directory {}", dir.path().display());
    Ok(dir)
}

fn root_err(path: &Path, reason: String) -> SpillError {
    SpillError::RootDir {
        path: path.to_path_buf(),
        reason,
    }
}
