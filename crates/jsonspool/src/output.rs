//! Bounded output buffer: the byte sink every writer commits into.
//!
//! The buffer is "bounded" in the soft sense: it has a configured soft
//! capacity that [`free_capacity`] is measured against, and the cooperative
//! driver flushes whenever free capacity runs low. A reservation that does
//! not fit is still honored — the buffer grows — but only by the requested
//! atomic encode unit rounded up to a small quantum, never by a whole value.
//! This keeps memory usage independent of the size of the values being
//! written: between two flushes the buffer holds at most the soft capacity
//! plus one atomic unit.
//!
//! [`free_capacity`]: OutputBuffer::free_capacity

use alloc::vec::Vec;

use crate::options::WriterOptions;

/// Growth quantum for reservations that exceed the remaining soft capacity.
const GROWTH_QUANTUM: usize = 64;

/// A growable byte sink with reserve/commit semantics and a soft capacity.
///
/// Writers obtain a writable region with [`reserve`], fill some prefix of it,
/// and record how much they wrote with [`commit`]. Only committed bytes are
/// visible through [`as_slice`] and survive a flush.
///
/// [`reserve`]: OutputBuffer::reserve
/// [`commit`]: OutputBuffer::commit
/// [`as_slice`]: OutputBuffer::as_slice
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
    committed: usize,
    soft_capacity: usize,
}

impl OutputBuffer {
    /// Creates an empty buffer with the soft capacity from `options`.
    #[must_use]
    pub fn new(options: &WriterOptions) -> Self {
        Self {
            data: Vec::with_capacity(options.buffer_capacity),
            committed: 0,
            soft_capacity: options.buffer_capacity,
        }
    }

    /// Returns a writable region of at least `min_bytes`.
    ///
    /// If the reservation exceeds the remaining soft capacity, the buffer
    /// grows by `max(min_bytes, GROWTH_QUANTUM)` beyond the committed length.
    /// Callers must only reserve one atomic encode unit at a time; the
    /// bounded-memory invariant depends on it.
    pub fn reserve(&mut self, min_bytes: usize) -> &mut [u8] {
        let end = self.committed + min_bytes;
        if end > self.data.len() {
            let grown = self.committed + min_bytes.max(GROWTH_QUANTUM);
            self.data.resize(grown, 0);
        }
        &mut self.data[self.committed..]
    }

    /// Marks `bytes_written` bytes of the most recent reservation as
    /// committed.
    pub fn commit(&mut self, bytes_written: usize) {
        debug_assert!(
            self.committed + bytes_written <= self.data.len(),
            "commit past reserved region"
        );
        self.committed += bytes_written;
        self.data.truncate(self.committed);
    }

    /// Remaining writable bytes before the buffer would have to grow past its
    /// soft capacity.
    #[must_use]
    pub fn free_capacity(&self) -> usize {
        self.soft_capacity.saturating_sub(self.committed)
    }

    /// The committed bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.committed]
    }

    /// Number of committed bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.committed
    }

    /// Whether no bytes have been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.committed == 0
    }

    /// Discards all committed bytes, restoring the full soft capacity.
    ///
    /// Called after the committed bytes have been handed to the transport.
    /// The underlying allocation is kept.
    pub fn clear(&mut self) {
        self.data.clear();
        self.committed = 0;
    }

    /// Drains the committed bytes, leaving the buffer empty.
    #[must_use]
    pub fn take(&mut self) -> Vec<u8> {
        self.data.truncate(self.committed);
        self.committed = 0;
        core::mem::take(&mut self.data)
    }
}
