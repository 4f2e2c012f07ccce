//! Slot Store Module
//!
//! Persists single elements to disk, one file per slot.
//!
//! ## Responsibilities
//! - Encode/decode elements through a pluggable `Codec`
//! - Frame every slot with a checksum so corruption is detected on load
//! - Replace slot files atomically on overwrite
//! - Prepare the private per-sequence directory (see `root`)
//!
//! ## Slot File Format
//! ```text
//! ┌──────────┬─────────────┬───────────┬──────────────────┐
//! │Magic (4) │ Len (4, LE) │ CRC (4)   │ Payload (Len)    │
//! │ "SPSL"   │ payload len │ crc32(pl) │ codec output     │
//! └──────────┴─────────────┴───────────┴──────────────────┘
//! ```
//!
//! Slot files are named by their decimal id and live directly in the
//! private directory. The store never deletes slot files: that is the
//! reclaim worker's job.

mod codec;
mod slot;
pub mod root;

pub use codec::{BincodeCodec, Codec, CodecError};
pub use slot::{slot_path, SlotStore, FRAME_HEADER_SIZE, MAGIC};

/// Identifier of one persisted element
pub type SlotId = u64;
