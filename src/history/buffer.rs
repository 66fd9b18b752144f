//! Fixed-capacity ring buffer used for both the past and future sides of an
//! [`EditHistory`](super::EditHistory).
//!
//! ```text
//!   slots: [Some(d), Some(b), Some(c)]   capacity = 3
//!   head = 1 (oldest), len = 3
//!
//!   push(e)  => evicts b, slots = [d, e, c], head = 2
//!   pop()    => returns e (newest), len = 2
//! ```
//!
//! Pushing into a full buffer overwrites the oldest entry and hands it back
//! to the caller. Popping always takes the newest entry, so the buffer is a
//! stack that forgets its bottom when it overflows.

#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Allocates all `capacity` slots up front. `capacity` must be non-zero.
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "ring buffer capacity must be non-zero");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Appends `item` as the newest entry, returning the oldest entry if it
    /// had to be evicted to make room.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.is_full() {
            let evicted = self.slots[self.head].replace(item);
            self.head = (self.head + 1) % self.capacity();
            evicted
        } else {
            let tail = self.slot_index(self.len);
            self.slots[tail] = Some(item);
            self.len += 1;
            None
        }
    }

    /// Removes and returns the newest entry.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let newest = self.slot_index(self.len - 1);
        self.len -= 1;
        self.slots[newest].take()
    }

    /// The newest entry, if any.
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.slot_index(self.len - 1)].as_ref()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }

    /// Iterates from the oldest entry to the newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |offset| self.slots[self.slot_index(offset)].as_ref())
    }

    fn slot_index(&self, offset: usize) -> usize {
        (self.head + offset) % self.capacity()
    }
}
