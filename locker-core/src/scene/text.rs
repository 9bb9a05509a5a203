//! Bounded text buffer with password masking
//!
//! Storage is a fixed `heapless::String`; the buffer never grows past its
//! capacity and overflowing appends are silently dropped.

use heapless::String;

/// Largest text any label can hold
pub const MAX_TEXT_LEN: usize = 24;

/// Character stored in place of real input when masking
pub const MASK_CHAR: char = '*';

/// Mutable label text with a character capacity and optional masking
///
/// Invariant: `len() <= capacity() <= MAX_TEXT_LEN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    text: String<MAX_TEXT_LEN>,
    len: usize,
    capacity: usize,
    mask: bool,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(MAX_TEXT_LEN)
    }
}

impl TextBuffer {
    /// Create an empty buffer holding at most `capacity` characters
    ///
    /// Capacities above [`MAX_TEXT_LEN`] are clamped.
    pub fn new(capacity: usize) -> Self {
        Self {
            text: String::new(),
            len: 0,
            capacity: capacity.min(MAX_TEXT_LEN),
            mask: false,
        }
    }

    /// Create an empty buffer that stores [`MASK_CHAR`] for every character
    pub fn masked(capacity: usize) -> Self {
        let mut buffer = Self::new(capacity);
        buffer.mask = true;
        buffer
    }

    /// Create a buffer pre-filled with `text`, truncated to `MAX_TEXT_LEN`
    pub fn with_text(text: &str) -> Self {
        let mut buffer = Self::default();
        buffer.append(text);
        buffer
    }

    /// Append as much of `text` as fits
    pub fn append(&mut self, text: &str) {
        for ch in text.chars() {
            if self.is_full() {
                break;
            }
            self.push(ch);
        }
    }

    /// Append one character; no-op when full
    pub fn push(&mut self, ch: char) {
        if self.is_full() {
            return;
        }
        let stored = if self.mask { MASK_CHAR } else { ch };
        if self.text.push(stored).is_ok() {
            self.len += 1;
        }
    }

    /// Remove up to `n` trailing characters
    pub fn remove_last(&mut self, n: usize) {
        for _ in 0..n {
            if self.text.pop().is_none() {
                break;
            }
            self.len -= 1;
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.len = 0;
    }

    /// Replace the content with `text`
    pub fn set(&mut self, text: &str) {
        self.clear();
        self.append(text);
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Number of characters stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_append_truncates_at_capacity() {
        let mut buffer = TextBuffer::new(4);
        buffer.append("123456");
        assert_eq!(buffer.as_str(), "1234");
        assert_eq!(buffer.len(), 4);

        // Full buffer ignores further input
        buffer.push('9');
        assert_eq!(buffer.as_str(), "1234");
    }

    #[test]
    fn test_capacity_plus_one_appends() {
        let mut buffer = TextBuffer::new(6);
        for ch in "0123456".chars() {
            buffer.push(ch);
        }
        assert_eq!(buffer.len(), 6);
    }

    #[test]
    fn test_remove_last() {
        let mut buffer = TextBuffer::with_text("abcd");
        buffer.remove_last(1);
        assert_eq!(buffer.as_str(), "abc");
        buffer.remove_last(10);
        assert!(buffer.is_empty());

        // Removing from an empty buffer is a no-op
        buffer.remove_last(3);
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn test_clear() {
        let mut buffer = TextBuffer::with_text("PC 1");
        buffer.clear();
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn test_mask_never_stores_input() {
        let mut buffer = TextBuffer::masked(8);
        buffer.push('7');
        assert_eq!(buffer.as_str(), "*");
        assert!(!buffer.as_str().contains('7'));

        buffer.append("42");
        assert_eq!(buffer.as_str(), "***");
    }

    #[test]
    fn test_capacity_is_clamped() {
        let buffer = TextBuffer::new(MAX_TEXT_LEN + 10);
        assert_eq!(buffer.capacity(), MAX_TEXT_LEN);
    }

    proptest! {
        #[test]
        fn prop_len_never_exceeds_capacity(
            capacity in 0usize..=MAX_TEXT_LEN,
            ops in proptest::collection::vec((any::<bool>(), 0u8..10), 0..64),
        ) {
            let mut buffer = TextBuffer::new(capacity);
            for (append, n) in ops {
                if append {
                    buffer.push(char::from(b'0' + n));
                } else {
                    buffer.remove_last(n as usize);
                }
                prop_assert!(buffer.len() <= buffer.capacity());
                prop_assert_eq!(buffer.len(), buffer.as_str().chars().count());
            }
        }
    }
}
