//! Configuration for SpillSlice
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, SpillError};

/// Configuration for a `HybridSequence`
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Parent directory for slot files. Must exist and be writable.
    /// Internal structure:
    ///   {root_dir}/
    ///     └── {dir_prefix}XXXXXX/   (private, one per sequence)
    ///           ├── 1024            (slot file, named by slot id)
    ///           └── 1025
    pub root_dir: PathBuf,

    /// Prefix of the private per-sequence subdirectory
    pub dir_prefix: String,

    // -------------------------------------------------------------------------
    // Head Configuration
    // -------------------------------------------------------------------------
    /// Number of elements kept in memory before spilling to disk
    pub head_capacity: usize,

    // -------------------------------------------------------------------------
    // Reclamation Configuration
    // -------------------------------------------------------------------------
    /// Bound of the reclamation queue. A full queue blocks the enqueuing
    /// `delete` until the worker catches up; requests are never dropped.
    pub reclaim_queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: std::env::temp_dir(),
            dir_prefix: "spillslice-".to_string(),
            head_capacity: 1024,
            reclaim_queue_capacity: 1024,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the sequence cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.reclaim_queue_capacity == 0 {
            return Err(SpillError::Config(
                "reclaim_queue_capacity must be at least 1".to_string(),
            ));
        }
        if self.dir_prefix.contains(std::path::is_separator) {
            return Err(SpillError::Config(format!(
                "dir_prefix {:?} must not contain a path separator",
                self.dir_prefix
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the parent directory for slot files
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the prefix of the private subdirectory
    pub fn dir_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.dir_prefix = prefix.into();
        self
    }

    /// Set the in-memory head capacity (in elements)
    pub fn head_capacity(mut self, capacity: usize) -> Self {
        self.config.head_capacity = capacity;
        self
    }

    /// Set the reclamation queue bound
    pub fn reclaim_queue_capacity(mut self, capacity: usize) -> Self {
        self.config.reclaim_queue_capacity = capacity;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
