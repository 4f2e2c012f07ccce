//! Disk Tail
//!
//! Ordered slot ids naming the on-disk suffix of the sequence.

use std::collections::VecDeque;
use std::ops::Range;

use crate::store::SlotId;

/// Ordered list of slot ids plus the id allocator
///
/// Ids are handed out monotonically starting at the head capacity and are
/// never reused for the lifetime of the tail.
#[derive(Debug, Clone)]
pub struct DiskTail {
    ids: VecDeque<SlotId>,
    next_id: SlotId,
}

impl DiskTail {
    /// Create an empty tail whose first allocated id is `first_id`
    pub fn new(first_id: SlotId) -> Self {
        Self {
            ids: VecDeque::new(),
            next_id: first_id,
        }
    }

    /// Reserve the next id without appending it
    pub fn allocate(&mut self) -> SlotId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append an allocated id at the logical end
    pub fn push(&mut self, id: SlotId) {
        debug_assert!(id < self.next_id, "pushed id {} was never allocated", id);
        self.ids.push_back(id);
    }

    pub fn get(&self, position: usize) -> Option<SlotId> {
        self.ids.get(position).copied()
    }

    /// Ids at `range` without removing them
    pub fn ids_in(&self, range: Range<usize>) -> impl Iterator<Item = SlotId> + '_ {
        self.ids.range(range).copied()
    }

    /// Remove `range` and return the removed ids in order
    pub fn remove_range(&mut self, range: Range<usize>) -> Vec<SlotId> {
        self.ids.drain(range).collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The id the next spill will receive
    pub fn next_id(&self) -> SlotId {
        self.next_id
    }

    pub fn iter(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.ids.iter().copied()
    }
}
