//! Reordering buffer for results that complete out of input order.
//!
//! Workers finish records in whatever order the scheduler allows; the emitting routine
//! inserts each result under its input index and releases results strictly in index
//! order, holding anything that arrives early until the gap before it is filled.
//!
//! # Example
//!
//! ```
//! use alncmp_lib::reorder_buffer::ReorderBuffer;
//!
//! let mut buffer: ReorderBuffer<&str> = ReorderBuffer::new();
//!
//! buffer.insert(2, "third");
//! buffer.insert(0, "first");
//! assert_eq!(buffer.drain_ready().collect::<Vec<_>>(), vec!["first"]);
//!
//! buffer.insert(1, "second");
//! assert_eq!(buffer.drain_ready().collect::<Vec<_>>(), vec!["second", "third"]);
//! assert!(buffer.is_empty());
//! ```

use std::collections::VecDeque;

/// A buffer that releases items in index order.
///
/// Slot `i` of the deque holds the item for index `next_index + i`, so both insert and
/// pop are O(1) amortized.
#[derive(Debug)]
pub struct ReorderBuffer<T> {
    slots: VecDeque<Option<T>>,
    next_index: u64,
    count: usize,
    /// Largest number of items held at once.
    high_water: usize,
}

impl<T> ReorderBuffer<T> {
    /// Creates an empty buffer expecting index 0 first.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Creates an empty buffer expecting `first` as the first index.
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self { slots: VecDeque::new(), next_index: first, count: 0, high_water: 0 }
    }

    /// Stores an item under its input index.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if the index was already released or is already buffered.
    #[allow(clippy::cast_possible_truncation)]
    pub fn insert(&mut self, index: u64, item: T) {
        debug_assert!(
            index >= self.next_index,
            "Index {index} was already released (next is {})",
            self.next_index
        );

        let offset = (index - self.next_index) as usize;
        if self.slots.len() <= offset {
            self.slots.resize_with(offset + 1, || None);
        }

        debug_assert!(self.slots[offset].is_none(), "Duplicate index: {index}");
        self.slots[offset] = Some(item);
        self.count += 1;
        self.high_water = self.high_water.max(self.count);
    }

    /// Releases the item for the next expected index, if it has arrived.
    #[must_use]
    pub fn try_pop_next(&mut self) -> Option<T> {
        let item = self.slots.front_mut()?.take()?;
        self.slots.pop_front();
        self.next_index += 1;
        self.count -= 1;
        Some(item)
    }

    /// Releases every item that is now contiguous with those already released.
    pub fn drain_ready(&mut self) -> DrainReady<'_, T> {
        DrainReady { buffer: self }
    }

    /// True when no items are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of items held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Index that must arrive before anything else can be released.
    #[must_use]
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Largest number of items that were held at the same time.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

impl<T> Default for ReorderBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator returned by [`ReorderBuffer::drain_ready`].
pub struct DrainReady<'a, T> {
    buffer: &'a mut ReorderBuffer<T>,
}

impl<T> Iterator for DrainReady<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.try_pop_next()
    }
}
