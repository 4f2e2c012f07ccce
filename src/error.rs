//! Error types for SpillSlice
//!
//! Provides a unified error type for all operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::{CodecError, SlotId};

/// Result type alias using SpillError
pub type Result<T> = std::result::Result<T, SpillError>;

/// Which slot operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOp {
    Persist,
    Load,
}

impl fmt::Display for SlotOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotOp::Persist => f.write_str("persist"),
            SlotOp::Load => f.write_str("load"),
        }
    }
}

/// Unified error type for SpillSlice operations
#[derive(Debug, Error)]
pub enum SpillError {
    // -------------------------------------------------------------------------
    // Usage Errors (returned before any mutation)
    // -------------------------------------------------------------------------
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("invalid range start={start}, end={end} for sequence of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("invalid parameters start={start}, count={count} for sequence of length {len}")]
    InvalidDelete { start: usize, count: usize, len: usize },

    #[error("invalid number of slice bounds: {0} (at most 2)")]
    TooManyBounds(usize),

    // -------------------------------------------------------------------------
    // Environment Errors
    // -------------------------------------------------------------------------
    #[error("unusable root directory {}: {reason}", .path.display())]
    RootDir { path: PathBuf, reason: String },

    // -------------------------------------------------------------------------
    // Slot Errors
    // -------------------------------------------------------------------------
    #[error("slot {id} {op} failed: {source}")]
    SlotIo {
        id: SlotId,
        op: SlotOp,
        #[source]
        source: std::io::Error,
    },

    #[error("slot {id} {op} failed: {source}")]
    SlotCodec {
        id: SlotId,
        op: SlotOp,
        #[source]
        source: CodecError,
    },

    // -------------------------------------------------------------------------
    // Reclamation Errors
    // -------------------------------------------------------------------------
    #[error("Reclaim worker error: {0}")]
    Reclaim(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
