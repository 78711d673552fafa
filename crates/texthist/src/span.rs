#![forbid(unsafe_code)]

//! Inline-first storage for one inserted or deleted run of text.
//!
//! Most edits recorded by the history are single keystrokes, so a
//! [`TextSpan`] keeps short text inline (no allocation) and only spills to
//! the heap once the run outgrows the inline capacity. The switch is not
//! observable through the API.
//!
//! # Invariants
//!
//! - `char_count()` always equals `as_str().chars().count()`
//! - `byte_len()` always equals `as_str().len()`

use std::fmt;

use compact_str::CompactString;

/// A run of text captured by an insert or delete action.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TextSpan {
    text: CompactString,
    chars: usize,
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSpan")
            .field("text", &self.text.as_str())
            .field("chars", &self.chars)
            .field("inline", &!self.text.is_heap_allocated())
            .finish()
    }
}

impl TextSpan {
    /// Create an empty span.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `text`.
    pub fn set(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.chars = text.chars().count();
    }

    /// Append another span to the end of this one.
    pub fn append(&mut self, other: &TextSpan) {
        self.text.push_str(other.as_str());
        self.chars += other.chars;
    }

    /// Insert another span in front of this one.
    pub fn prepend(&mut self, other: &TextSpan) {
        self.text.insert_str(0, other.as_str());
        self.chars += other.chars;
    }

    /// Remove all text, keeping any heap buffer for reuse.
    pub fn clear(&mut self) {
        self.text.clear();
        self.chars = 0;
    }

    /// The captured text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Length in bytes.
    #[inline]
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }

    /// Length in characters.
    #[inline]
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.chars
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    /// Whether the text is still stored inline.
    #[inline]
    #[must_use]
    pub fn is_inline(&self) -> bool {
        !self.text.is_heap_allocated()
    }

    #[must_use]
    pub fn starts_with_space(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_whitespace)
    }

    #[must_use]
    pub fn ends_with_space(&self) -> bool {
        self.text.chars().next_back().is_some_and(char::is_whitespace)
    }

    #[must_use]
    pub fn contains_space(&self) -> bool {
        self.text.chars().any(char::is_whitespace)
    }

    /// True when every character is whitespace. An empty span is not
    /// considered whitespace-only.
    #[must_use]
    pub fn only_space(&self) -> bool {
        !self.is_empty() && self.text.chars().all(char::is_whitespace)
    }

    #[must_use]
    pub fn contains_char(&self, c: char) -> bool {
        self.text.contains(c)
    }
}

impl From<&str> for TextSpan {
    fn from(text: &str) -> Self {
        Self {
            text: CompactString::new(text),
            chars: text.chars().count(),
        }
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_counts_chars_not_bytes() {
        let mut span = TextSpan::new();
        span.set("héllo");
        assert_eq!(span.char_count(), 5);
        assert_eq!(span.byte_len(), 6);
        assert_eq!(span.as_str(), "héllo");
    }

    #[test]
    fn test_append_and_prepend() {
        let mut span = TextSpan::from("is");
        span.prepend(&TextSpan::from("th"));
        span.append(&TextSpan::from(" text"));
        assert_eq!(span.as_str(), "this text");
        assert_eq!(span.char_count(), 9);
    }

    #[test]
    fn test_spills_to_heap_transparently() {
        let mut span = TextSpan::from("a");
        assert!(span.is_inline());
        for _ in 0..10 {
            span.append(&TextSpan::from("abcdefgh"));
        }
        assert!(!span.is_inline());
        assert_eq!(span.char_count(), 81);
        assert_eq!(span.as_str().len(), 81);
    }

    #[test]
    fn test_clear() {
        let mut span = TextSpan::from("some text");
        span.clear();
        assert!(span.is_empty());
        assert_eq!(span.byte_len(), 0);
        assert_eq!(span.as_str(), "");
    }

    #[test]
    fn test_space_predicates() {
        let word = TextSpan::from("word");
        assert!(!word.starts_with_space());
        assert!(!word.ends_with_space());
        assert!(!word.contains_space());
        assert!(!word.only_space());

        let padded = TextSpan::from(" word\t");
        assert!(padded.starts_with_space());
        assert!(padded.ends_with_space());
        assert!(padded.contains_space());
        assert!(!padded.only_space());

        let blank = TextSpan::from(" \t\t  ");
        assert!(blank.only_space());

        let empty = TextSpan::new();
        assert!(!empty.only_space());
        assert!(!empty.starts_with_space());
        assert!(!empty.ends_with_space());
    }

    #[test]
    fn test_contains_char() {
        let span = TextSpan::from("line\nnext");
        assert!(span.contains_char('\n'));
        assert!(!span.contains_char('\r'));
    }

    #[test]
    fn test_debug_shows_text() {
        let dbg = format!("{:?}", TextSpan::from("abc"));
        assert!(dbg.contains("TextSpan"));
        assert!(dbg.contains("abc"));
    }
}
