//! Bounded undo/redo history.
//!
//! An [`EditHistory`] holds three things: a ring of past values, the value the
//! user is currently looking at, and a stack of values that were undone.
//!
//! ```text
//! push(1) push(2) push(3)      past: [1, 2]   current: 3   future: []
//! pop()                        past: [1]      current: 2   future: [3]
//! edit(9)                      past: [1]      current: 9   future: []
//! ```
//!
//! `push` and `edit` both discard the future; only `push` moves the old
//! current value into the past. Once the past is full the oldest entry is
//! dropped without notice.

pub mod buffer;
pub mod error;

pub use buffer::RingBuffer;
pub use error::HistoryError;

use tracing::{debug, trace};

pub const DEFAULT_CAPACITY: usize = 100;

pub struct EditHistory<T> {
    past: RingBuffer<T>,
    current: Option<T>,
    future: RingBuffer<T>,
}

impl<T> EditHistory<T> {
    /// Creates an empty history that retains at most `capacity` past entries
    /// (and at most `capacity` redoable entries).
    pub fn new(capacity: usize) -> Result<Self, HistoryError> {
        if capacity == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        Ok(Self {
            past: RingBuffer::new(capacity),
            current: None,
            future: RingBuffer::new(capacity),
        })
    }

    pub fn with_default_capacity() -> Self {
        Self {
            past: RingBuffer::new(DEFAULT_CAPACITY),
            current: None,
            future: RingBuffer::new(DEFAULT_CAPACITY),
        }
    }

    /// Commits `item` as the new current value. The previous current value
    /// becomes the newest past entry and all redoable entries are dropped.
    pub fn push(&mut self, item: T) {
        if let Some(previous) = self.current.take() {
            if self.past.push(previous).is_some() {
                trace!(capacity = self.capacity(), "evicted oldest past entry");
            }
        }
        self.discard_future();
        self.current = Some(item);
        debug!(undo = self.undo_amount(), "pushed history entry");
    }

    /// Replaces the current value in place. The previous current value is
    /// discarded, not moved into the past.
    pub fn edit(&mut self, item: T) {
        self.discard_future();
        self.current = Some(item);
        debug!(undo = self.undo_amount(), "edited current entry");
    }

    /// The current value, if anything was ever pushed or edited.
    pub fn peek(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Steps back one entry. Returns the restored value, or `None` when
    /// there is nothing to undo, in which case nothing changes.
    pub fn pop(&mut self) -> Option<&T> {
        let restored = self.past.pop()?;
        if let Some(previous) = self.current.replace(restored) {
            if self.future.push(previous).is_some() {
                trace!(capacity = self.capacity(), "evicted oldest future entry");
            }
        }
        debug!(
            undo = self.undo_amount(),
            redo = self.redo_amount(),
            "undo"
        );
        self.current.as_ref()
    }

    pub fn undo(&mut self) -> Option<&T> {
        self.pop()
    }

    /// Steps forward to the most recently undone entry. Returns it, or `None`
    /// when there is nothing to redo. The remaining future is kept.
    pub fn unpop(&mut self) -> Option<&T> {
        let restored = self.future.pop()?;
        if let Some(previous) = self.current.replace(restored) {
            if self.past.push(previous).is_some() {
                trace!(capacity = self.capacity(), "evicted oldest past entry");
            }
        }
        debug!(
            undo = self.undo_amount(),
            redo = self.redo_amount(),
            "redo"
        );
        self.current.as_ref()
    }

    pub fn redo(&mut self) -> Option<&T> {
        self.unpop()
    }

    pub fn capacity(&self) -> usize {
        self.past.capacity()
    }

    /// Number of entries that can be undone.
    pub fn size(&self) -> usize {
        self.past.len()
    }

    pub fn undo_amount(&self) -> usize {
        self.size()
    }

    pub fn redo_amount(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// True until the first `push` or `edit`.
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Past entries, oldest first.
    pub fn past(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.past.iter()
    }

    /// Redoable entries, oldest undo first; the last one is what `redo`
    /// restores next.
    pub fn future(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.future.iter()
    }

    /// Drops every entry, keeping the capacity.
    pub fn clear(&mut self) {
        self.past.clear();
        self.current = None;
        self.future.clear();
    }

    fn discard_future(&mut self) {
        if !self.future.is_empty() {
            trace!(dropped = self.future.len(), "cleared redo entries");
            self.future.clear();
        }
    }
}

impl<T> Default for EditHistory<T> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for EditHistory<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditHistory")
            .field("capacity", &self.capacity())
            .field("undo_amount", &self.undo_amount())
            .field("current", &self.current)
            .field("redo_amount", &self.redo_amount())
            .finish()
    }
}
