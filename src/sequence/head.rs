//! Memory Head
//!
//! Capacity-bounded in-memory prefix of the sequence.

use std::ops::Range;

/// Ordered buffer of at most `capacity` elements
#[derive(Debug, Clone)]
pub struct MemoryHead<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> MemoryHead<T> {
    /// Create an empty head holding at most `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a value, handing it back if the head is full
    pub fn push(&mut self, value: T) -> Result<(), T> {
        if self.is_full() {
            return Err(value);
        }
        self.items.push(value);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Overwrite the element at `index`; returns false if out of range
    pub fn set(&mut self, index: usize, value: T) -> bool {
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Remove `range`, shifting later elements left
    pub fn remove_range(&mut self, range: Range<usize>) {
        self.items.drain(range);
    }

    /// Free slots before the head is full
    pub fn room(&self) -> usize {
        self.capacity - self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Extend<T> for MemoryHead<T> {
    /// Callers must not exceed `room()`; the head is never grown past capacity.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            debug_assert!(!self.is_full(), "head extended past capacity");
            self.items.push(value);
        }
    }
}
