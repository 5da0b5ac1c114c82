//! Growable scratch buffer shared by searchers and snippet modifiers
//!
//! `SearcherBuf` tracks a logical capacity separately from the bytes written
//! so that growth is observable and deterministic: when an append of `n`
//! bytes does not fit in the remaining space, the capacity becomes
//! `capacity * 2 + n`.

use parking_lot::Mutex;
use std::sync::Arc;

/// Initial capacity of a default buffer
pub const DEFAULT_BUF_CAPACITY: usize = 32;

/// Buffer handle shared between a snippet modifier and its searcher
///
/// Only one scan writes to the buffer at a time; the lock is held for the
/// duration of a single value scan.
pub type SharedSearcherBuf = Arc<Mutex<SearcherBuf>>;

/// Growable byte buffer with explicit capacity
#[derive(Debug, Clone)]
pub struct SearcherBuf {
    data: Vec<u8>,
    capacity: usize,
}

impl Default for SearcherBuf {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BUF_CAPACITY)
    }
}

impl SearcherBuf {
    /// Create a buffer with the given initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        SearcherBuf {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a shared handle to a new buffer
    pub fn shared(capacity: usize) -> SharedSearcherBuf {
        Arc::new(Mutex::new(Self::with_capacity(capacity)))
    }

    /// Capacity after appending `n` bytes to a buffer of `capacity` holding `len`
    pub fn grown_capacity(capacity: usize, len: usize, n: usize) -> usize {
        if n > capacity.saturating_sub(len) {
            capacity * 2 + n
        } else {
            capacity
        }
    }

    /// Logical capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Space left before the next growth
    pub fn remaining(&self) -> usize {
        self.capacity - self.data.len()
    }

    /// Written bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Forget written bytes, keeping the capacity
    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Make sure at least `n` more bytes fit without growth
    pub fn reserve(&mut self, n: usize) {
        let capacity = Self::grown_capacity(self.capacity, self.data.len(), n);
        if capacity != self.capacity {
            self.data.reserve(capacity - self.data.len());
            self.capacity = capacity;
        }
    }

    /// Append bytes
    pub fn put(&mut self, bytes: &[u8]) {
        self.reserve(bytes.len());
        self.data.extend_from_slice(bytes);
    }

    /// Append a single byte
    pub fn put_byte(&mut self, b: u8) {
        self.reserve(1);
        self.data.push(b);
    }

    /// Append a char as UTF-8
    pub fn put_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.put(c.encode_utf8(&mut tmp).as_bytes());
    }
}
