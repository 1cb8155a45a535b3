//! Fixed-capacity byte FIFO backing each side of a peer connection.
//!
//! [`RingBuffer`] provides the bounded storage the framing adapter relies on
//! for structural backpressure: writes are all-or-nothing against the free
//! space, reads remove exactly the bytes a caller asked for, and
//! [`advance_read`](RingBuffer::advance_read) skips damaged record remainders
//! while keeping later records aligned. Capacity is fixed for the buffer's
//! lifetime and there is no internal synchronisation; one connection owns
//! each instance exclusively.

use std::num::NonZeroUsize;

use thiserror::Error;

/// Error returned when a write would exceed the buffer's free space.
///
/// The write is refused in full; no bytes are committed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("ring buffer write of {requested} bytes exceeds {available} free bytes")]
pub struct InsufficientSpace {
    /// Number of bytes the caller attempted to append.
    pub requested: usize,
    /// Free bytes available at the time of the write.
    pub available: usize,
}

/// Bounded byte queue with wrapping read/write cursors.
#[derive(Debug)]
pub struct RingBuffer {
    storage: Box<[u8]>,
    head: usize,
    len: usize,
}

impl RingBuffer {
    /// Create a buffer that can hold up to `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            storage: vec![0; capacity.get()].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Total number of bytes the buffer can hold.
    #[must_use]
    pub fn capacity(&self) -> usize { self.storage.len() }

    /// Free bytes available for writing.
    #[must_use]
    pub fn space_left(&self) -> usize { self.storage.len() - self.len }

    /// Buffered bytes available for reading.
    #[must_use]
    pub fn data_left(&self) -> usize { self.len }

    /// Append `data` at the write cursor.
    ///
    /// The append is all-or-nothing: when `data` does not fit in the free
    /// space the buffer is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`InsufficientSpace`] when `data.len() > space_left()`.
    pub fn write(&mut self, data: &[u8]) -> Result<(), InsufficientSpace> {
        let available = self.space_left();
        if data.len() > available {
            return Err(InsufficientSpace {
                requested: data.len(),
                available,
            });
        }

        let capacity = self.storage.len();
        let tail = (self.head + self.len) % capacity;
        let contiguous = data.len().min(capacity - tail);
        self.storage[tail..tail + contiguous].copy_from_slice(&data[..contiguous]);
        self.storage[..data.len() - contiguous].copy_from_slice(&data[contiguous..]);
        self.len += data.len();
        Ok(())
    }

    /// Remove the next `dst.len()` bytes from the front into `dst`.
    ///
    /// # Panics
    ///
    /// Panics when `dst.len() > data_left()`; callers check
    /// [`data_left`](Self::data_left) before reading.
    pub fn read_into(&mut self, dst: &mut [u8]) {
        assert!(
            dst.len() <= self.len,
            "ring buffer read of {} bytes exceeds {} buffered",
            dst.len(),
            self.len,
        );

        let capacity = self.storage.len();
        let len = dst.len();
        let contiguous = len.min(capacity - self.head);
        dst[..contiguous].copy_from_slice(&self.storage[self.head..self.head + contiguous]);
        dst[contiguous..].copy_from_slice(&self.storage[..len - contiguous]);
        self.head = (self.head + len) % capacity;
        self.len -= dst.len();
    }

    /// Remove and return exactly `n` bytes from the front.
    ///
    /// # Panics
    ///
    /// Panics when `n > data_left()`; callers check
    /// [`data_left`](Self::data_left) before reading.
    #[must_use]
    pub fn read(&mut self, n: usize) -> Vec<u8> {
        let mut out = vec![0; n];
        self.read_into(&mut out);
        out
    }

    /// Remove the next `N` bytes from the front as a fixed-size array.
    ///
    /// # Panics
    ///
    /// Panics when `N > data_left()`; callers check
    /// [`data_left`](Self::data_left) before reading.
    #[must_use]
    pub fn read_array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0; N];
        self.read_into(&mut out);
        out
    }

    /// Discard up to `n` bytes from the front without returning them.
    ///
    /// Used to skip the remainder of a damaged record so the next record
    /// starts at the read cursor. Returns the number of bytes discarded,
    /// clamped to [`data_left`](Self::data_left).
    pub fn advance_read(&mut self, n: usize) -> usize {
        let skipped = n.min(self.len);
        self.head = (self.head + skipped) % self.storage.len();
        self.len -= skipped;
        skipped
    }
}
