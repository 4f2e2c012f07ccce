//! Sequence Module
//!
//! The container proper: a memory head followed by a disk tail.
//!
//! ## Index Mapping
//! ```text
//!  logical:  0 ........ h-1 │ h ............................ len-1
//!            ┌──────────────┼───────────────────────────────────┐
//!            │ MemoryHead   │ DiskTail: [id, id, id, ...]       │
//!            │ (Vec<T>)     │   └─► SlotStore file "<id>"       │
//!            └──────────────┴───────────────────────────────────┘
//!  h = head.len() = min(capacity, len)
//! ```
//!
//! Slot ids start at the head capacity and only grow.

mod head;
mod hybrid;
mod tail;

pub use head::MemoryHead;
pub use hybrid::{HybridSequence, Iter};
pub use tail::DiskTail;
