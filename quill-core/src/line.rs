//! Growable, terminated line buffer

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

/// Capacity every new line starts with unless configured otherwise.
pub const DEFAULT_LINE_CAPACITY: usize = 256;

/// A single line of text stored as bytes.
///
/// `len` is the logical length and `capacity()` the allocated size. The
/// storage is always terminated: `len < capacity()` and the byte at `len` is
/// zero after every operation. Capacity only ever grows, by doubling.
#[derive(Clone, PartialEq, Eq)]
pub struct Line {
    text: Vec<u8>,
    len: usize,
}

impl Line {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LINE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: vec![0; capacity.max(1)],
            len: 0,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_bytes_with_capacity(bytes, DEFAULT_LINE_CAPACITY)
    }

    pub fn from_bytes_with_capacity(bytes: &[u8], capacity: usize) -> Self {
        let mut line = Self::with_capacity(capacity);
        line.set_text(bytes);
        line
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.text.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.text[..self.len]
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// True when the storage holds a zero byte right after the content.
    pub fn is_terminated(&self) -> bool {
        self.len < self.text.len() && self.text[self.len] == 0
    }

    /// Doubles capacity until `additional` bytes plus the terminator fit.
    fn reserve(&mut self, additional: usize) {
        let required = self.len + additional + 1;
        let mut size = self.text.len();
        if required <= size {
            return;
        }
        while size < required {
            size *= 2;
        }
        self.text.resize(size, 0);
    }

    fn terminate(&mut self) {
        self.text[self.len] = 0;
    }

    /// Inserts `bytes` at byte offset `at`, shifting the rest of the line right.
    ///
    /// # Panics
    ///
    /// Panics if `at` is past the end of the line.
    pub fn insert(&mut self, at: usize, bytes: &[u8]) {
        assert!(at <= self.len, "insert at {at} past line end {}", self.len);
        if bytes.is_empty() {
            return;
        }
        let count = bytes.len();
        self.reserve(count);
        self.text.copy_within(at..self.len, at + count);
        self.text[at..at + count].copy_from_slice(bytes);
        self.len += count;
        self.terminate();
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.insert(self.len, bytes);
    }

    /// Removes the bytes in `range`, shifting the remainder left.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or extends past the end of the line.
    pub fn remove_range(&mut self, range: Range<usize>) {
        assert!(
            range.start <= range.end && range.end <= self.len,
            "remove {range:?} out of line bounds 0..{}",
            self.len
        );
        let count = range.end - range.start;
        if count == 0 {
            return;
        }
        self.text.copy_within(range.end..self.len, range.start);
        self.len -= count;
        self.terminate();
    }

    pub fn truncate(&mut self, at: usize) {
        if at < self.len {
            self.len = at;
            self.terminate();
        }
    }

    /// Cuts the line at `at` and returns everything after it.
    pub fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = at.min(self.len);
        let tail = self.text[at..self.len].to_vec();
        self.truncate(at);
        tail
    }

    /// Replaces the whole content, keeping the allocation when it is big enough.
    pub fn set_text(&mut self, bytes: &[u8]) {
        self.len = 0;
        self.reserve(bytes.len());
        self.text[..bytes.len()].copy_from_slice(bytes);
        self.len = bytes.len();
        self.terminate();
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("text", &self.to_string_lossy())
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_line_is_empty_and_terminated() {
        let line = Line::new();
        assert_eq!(line.len(), 0);
        assert_eq!(line.capacity(), DEFAULT_LINE_CAPACITY);
        assert!(line.is_terminated());
    }

    #[test]
    fn capacity_doubles_when_full() {
        let mut line = Line::with_capacity(4);
        line.append(b"abc");
        assert_eq!(line.capacity(), 4);

        line.append(b"d");
        assert_eq!(line.capacity(), 8);
        assert_eq!(line.as_bytes(), b"abcd");
        assert!(line.is_terminated());

        line.append(&[b'x'; 20]);
        assert_eq!(line.capacity(), 32);
        assert_eq!(line.len(), 24);
        assert!(line.is_terminated());
    }

    #[test]
    fn insert_shifts_tail_right() {
        let mut line = Line::from_bytes(b"herld");
        line.insert(2, b"llo wo");
        assert_eq!(line.as_bytes(), b"hello world");
    }

    #[test]
    fn remove_range_shifts_tail_left() {
        let mut line = Line::from_bytes(b"hello world");
        line.remove_range(0..6);
        assert_eq!(line.as_bytes(), b"world");
        assert!(line.is_terminated());
    }

    #[test]
    fn split_off_returns_tail() {
        let mut line = Line::from_bytes(b"hello world");
        let tail = line.split_off(5);
        assert_eq!(line.as_bytes(), b"hello");
        assert_eq!(tail, b" world");
        assert!(line.is_terminated());
    }

    #[test]
    fn set_text_reuses_and_grows() {
        let mut line = Line::with_capacity(2);
        line.set_text(b"abcdef");
        assert_eq!(line.as_bytes(), b"abcdef");
        assert_eq!(line.capacity(), 8);

        line.set_text(b"x");
        assert_eq!(line.as_bytes(), b"x");
        assert_eq!(line.capacity(), 8);
        assert!(line.is_terminated());
    }
}
