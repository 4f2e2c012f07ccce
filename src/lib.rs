//! # SpillSlice
//!
//! A bounded-memory sequential container with:
//! - A fixed-capacity in-memory head
//! - A disk-resident tail of unbounded length, one file per element
//! - Slice-like operations (append, get, put, slice, ranged delete)
//! - Background reclamation of deleted slot files
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     HybridSequence<T>                        │
//! │          (append / get / put / slice / delete)               │
//! └───────┬─────────────────────┬───────────────────────┬───────┘
//!         │                     │                       │
//!         ▼                     ▼                       ▼
//!   ┌─────────────┐      ┌─────────────┐        ┌──────────────┐
//!   │ MemoryHead  │      │  DiskTail   │        │  Reclaimer   │
//!   │  (Vec<T>)   │      │ (slot ids)  │        │ (bounded q)  │
//!   └─────────────┘      └──────┬──────┘        └──────┬───────┘
//!                               │                      │
//!                               ▼                      ▼
//!                        ┌─────────────┐        ┌──────────────┐
//!                        │  SlotStore  │        │ worker thread│
//!                        │ (file/slot) │◄───────│ (deletes)    │
//!                        └─────────────┘        └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use spillslice::HybridSequence;
//!
//! # fn main() -> spillslice::Result<()> {
//! let mut seq = HybridSequence::new(Vec::with_capacity(4), std::env::temp_dir())?;
//! seq.append(0..10u32)?;
//! assert_eq!(seq.head_len(), 4);
//! assert_eq!(seq.get(7)?, 7);
//! seq.delete(2, 3)?;
//! assert_eq!(seq.get(2)?, 5);
//! seq.cleanup().wait()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod store;
pub mod sequence;
pub mod reclaim;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SlotOp, SpillError};
pub use config::Config;
pub use sequence::HybridSequence;
pub use store::{BincodeCodec, Codec, SlotId};
pub use reclaim::{CleanupHandle, ReclaimReport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of SpillSlice
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
