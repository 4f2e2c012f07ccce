//! Hybrid Sequence
//!
//! One logical index space over the memory head and the disk tail.

use std::path::Path;

use crate::config::Config;
use crate::error::{Result, SpillError};
use crate::reclaim::{CleanupHandle, ReclaimReport, Reclaimer};
use crate::store::root::prepare_root;
use crate::store::{BincodeCodec, Codec, SlotId, SlotStore};

use super::{DiskTail, MemoryHead};

/// Slice-like container whose first `capacity` elements live in memory and
/// whose overflow lives on disk, one file per element.
///
/// ## Invariants
/// - `head.len() == min(capacity, len())` after every mutation
/// - every id in `tail` names a readable slot file
/// - ids removed from `tail` are queued for reclamation exactly once and
///   never reappear
///
/// ## Concurrency
/// One owner mutates the sequence (`&mut self`); deletions of slot files
/// happen on a background worker. `cleanup` consumes the sequence, so no
/// operation can follow it.
pub struct HybridSequence<T, C = BincodeCodec> {
    /// In-memory prefix
    head: MemoryHead<T>,

    /// Slot ids of the on-disk suffix
    tail: DiskTail,

    /// Slot persistence
    store: SlotStore<C>,

    /// Background deleter, owns the slot directory
    reclaimer: Reclaimer,
}

impl<T> HybridSequence<T, BincodeCodec>
where
    BincodeCodec: Codec<T>,
    T: Clone,
{
    /// Create a sequence whose head capacity is `initial.capacity()`
    ///
    /// `root` must be an existing writable directory; a private
    /// subdirectory is created under it for slot files.
    pub fn new(initial: Vec<T>, root: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder()
            .root_dir(root.as_ref())
            .head_capacity(initial.capacity())
            .build();
        Self::with_codec(config, initial, BincodeCodec)
    }

    /// Create an empty sequence from a config
    pub fn open(config: Config) -> Result<Self> {
        Self::with_codec(config, Vec::new(), BincodeCodec)
    }

    /// Create a sequence from a config and initial elements
    ///
    /// Elements beyond `config.head_capacity` spill to disk.
    pub fn with_initial(config: Config, initial: Vec<T>) -> Result<Self> {
        Self::with_codec(config, initial, BincodeCodec)
    }
}

impl<T, C> HybridSequence<T, C>
where
    C: Codec<T>,
    T: Clone,
{
    /// Create a sequence with an explicit codec
    ///
    /// Steps:
    /// 1. Validate config
    /// 2. Probe the root directory and create the private subdirectory
    /// 3. Start the reclaim worker (it owns the subdirectory from now on)
    /// 4. Place the initial elements
    pub fn with_codec(config: Config, initial: Vec<T>, codec: C) -> Result<Self> {
        config.validate()?;

        let dir = prepare_root(&config.root_dir, &config.dir_prefix)?;
        let store = SlotStore::new(dir.path(), codec);
        let reclaimer = Reclaimer::spawn(dir, config.reclaim_queue_capacity)?;

        let capacity = config.head_capacity;
        let mut sequence = Self {
            head: MemoryHead::with_capacity(capacity),
            tail: DiskTail::new(capacity as SlotId),
            store,
            reclaimer,
        };

        tracing::info!(
            "Opened sequence in {} (head capacity {})",
            sequence.slot_dir().display(),
            capacity
        );

        sequence.append(initial)?;
        Ok(sequence)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Number of elements (head + tail)
    pub fn len(&self) -> usize {
        self.head.len() + self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a copy of the element at `index`
    pub fn get(&self, index: usize) -> Result<T> {
        self.check_index(index)?;

        if let Some(value) = self.head.get(index) {
            return Ok(value.clone());
        }
        self.store.load(self.tail_id(index)?)
    }

    /// Copy `[start, end)` into a fresh vector
    ///
    /// `start` defaults to 0 and `end` to `len()`. Either bound past `len()`
    /// is an error; `end < start` yields an empty vector.
    pub fn slice(&self, start: Option<usize>, end: Option<usize>) -> Result<Vec<T>> {
        let len = self.len();
        let start = start.unwrap_or(0);
        let end = end.unwrap_or(len);

        if start > len || end > len {
            return Err(SpillError::InvalidRange { start, end, len });
        }
        if end <= start {
            return Ok(Vec::new());
        }

        let mut out = Vec::with_capacity(end - start);

        let head_len = self.head.len();
        if start < head_len {
            out.extend_from_slice(&self.head.as_slice()[start..end.min(head_len)]);
        }

        let tail_start = start.max(head_len) - head_len;
        let tail_end = end.max(head_len) - head_len;
        for id in self.tail.ids_in(tail_start..tail_end) {
            out.push(self.store.load(id)?);
        }

        Ok(out)
    }

    /// Variadic form of `slice`: no bounds, `[start]`, or `[start, end]`
    pub fn slice_bounds(&self, bounds: &[usize]) -> Result<Vec<T>> {
        match *bounds {
            [] => self.slice(None, None),
            [start] => self.slice(Some(start), None),
            [start, end] => self.slice(Some(start), Some(end)),
            _ => Err(SpillError::TooManyBounds(bounds.len())),
        }
    }

    /// Iterate over all elements in logical order, loading tail slots lazily
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            sequence: self,
            index: 0,
        }
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Append one element
    pub fn push(&mut self, value: T) -> Result<()> {
        let value = match self.head.push(value) {
            Ok(()) => return Ok(()),
            Err(value) => value,
        };

        let id = self.tail.allocate();
        self.store.persist(id, &value)?;
        self.tail.push(id);
        tracing::trace!("Spilled element {} to slot {}", self.len() - 1, id);
        Ok(())
    }

    /// Append elements in order
    ///
    /// Stops at the first failed spill; elements placed before it stay.
    pub fn append<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.push(value)?;
        }
        Ok(())
    }

    /// Overwrite the element at `index`
    ///
    /// Tail elements are rewritten in their existing slot.
    pub fn put(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;

        if index < self.head.len() {
            self.head.set(index, value);
            return Ok(());
        }
        self.store.persist(self.tail_id(index)?, &value)
    }

    /// Remove `count` elements starting at `start`
    ///
    /// Cases:
    /// 1. Range inside the head: shift the head left
    /// 2. Range spans head and tail: truncate the head, drop the tail front
    /// 3. Range inside the tail: drop tail ids, head untouched
    ///
    /// In cases 1 and 2 the head is refilled from the tail front. Refill
    /// slots are loaded before anything is mutated, so a failed load leaves
    /// the sequence unchanged.
    pub fn delete(&mut self, start: usize, count: usize) -> Result<()> {
        let len = self.len();
        match start.checked_add(count) {
            Some(end) if end <= len => {}
            _ => return Err(SpillError::InvalidDelete { start, count, len }),
        }
        if count == 0 {
            return Ok(());
        }

        let head_len = self.head.len();

        if start >= head_len {
            let offset = start - head_len;
            let removed = self.tail.remove_range(offset..offset + count);
            tracing::debug!(
                "Deleted {} tail elements at {} (tail now {})",
                removed.len(),
                start,
                self.tail.len()
            );
            self.reclaim_all(removed);
            return Ok(());
        }

        let from_head = count.min(head_len - start);
        let from_tail = count - from_head;
        let refill = (self.head.room() + from_head).min(self.tail.len() - from_tail);

        let mut loaded = Vec::with_capacity(refill);
        for id in self.tail.ids_in(from_tail..from_tail + refill) {
            loaded.push(self.store.load(id)?);
        }

        self.head.remove_range(start..start + from_head);
        let removed = self.tail.remove_range(0..from_tail + refill);
        self.head.extend(loaded);
        self.reclaim_all(removed);

        tracing::debug!(
            "Deleted {} elements at {} ({} from tail, {} refilled)",
            count,
            start,
            from_tail,
            refill
        );
        Ok(())
    }

    /// Stop the reclaim worker and remove the slot directory
    ///
    /// Returns without waiting; call `wait()` on the handle to join the
    /// worker. Consuming `self` rules out use after cleanup.
    pub fn cleanup(self) -> CleanupHandle {
        tracing::info!("Cleaning up sequence in {}", self.slot_dir().display());
        self.reclaimer.terminate()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Head capacity (elements kept in memory)
    pub fn capacity(&self) -> usize {
        self.head.capacity()
    }

    /// Number of elements currently in memory
    pub fn head_len(&self) -> usize {
        self.head.len()
    }

    /// Number of elements currently on disk
    pub fn tail_len(&self) -> usize {
        self.tail.len()
    }

    /// Id the next spilled element will get
    pub fn next_slot_id(&self) -> SlotId {
        self.tail.next_id()
    }

    /// Slot ids of the tail in logical order
    pub fn tail_ids(&self) -> Vec<SlotId> {
        self.tail.iter().collect()
    }

    /// Private directory holding slot files
    pub fn slot_dir(&self) -> &Path {
        self.store.dir()
    }

    /// Live reclamation counters
    pub fn reclaim_stats(&self) -> ReclaimReport {
        self.reclaimer.stats()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.len();
        if index >= len {
            return Err(SpillError::IndexOutOfBounds { index, len });
        }
        Ok(())
    }

    /// Slot id for a logical index known to be in the tail
    fn tail_id(&self, index: usize) -> Result<SlotId> {
        self.tail
            .get(index - self.head.len())
            .ok_or(SpillError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    fn reclaim_all(&self, ids: Vec<SlotId>) {
        for id in ids {
            self.reclaimer.reclaim(id);
        }
    }
}

/// Iterator returned by `HybridSequence::iter`
pub struct Iter<'a, T, C> {
    sequence: &'a HybridSequence<T, C>,
    index: usize,
}

impl<T, C> Iterator for Iter<'_, T, C>
where
    C: Codec<T>,
    T: Clone,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.sequence.len() {
            return None;
        }
        let item = self.sequence.get(self.index);
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}
