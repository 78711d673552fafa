#![forbid(unsafe_code)]

//! In-memory reference host.
//!
//! [`PlainTextHost`] is the smallest buffer that satisfies
//! [`HistoryHost`]: a `String` addressed by character offsets, a caret
//! with an optional selection bound, and the last flags the history
//! reported through `change_state`.

use texthist::HistoryHost;

/// A plain `String` buffer with a caret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlainTextHost {
    text: String,
    caret: usize,
    bound: Option<usize>,
    is_modified: bool,
    can_undo: bool,
    can_redo: bool,
    /// Number of `change_state` notifications received.
    state_changes: usize,
    /// `delete` calls whose expected text did not match the buffer.
    mismatched_deletes: usize,
}

impl PlainTextHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `text` already in the buffer and the caret at its end.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            caret: text.chars().count(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Buffer length in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret
    }

    #[must_use]
    pub fn bound(&self) -> Option<usize> {
        self.bound
    }

    /// The selected range as `(start, end)`, if anything is selected.
    #[must_use]
    pub fn selected_range(&self) -> Option<(usize, usize)> {
        self.bound
            .filter(|&bound| bound != self.caret)
            .map(|bound| (self.caret.min(bound), self.caret.max(bound)))
    }

    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.can_undo
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.can_redo
    }

    #[must_use]
    pub fn state_changes(&self) -> usize {
        self.state_changes
    }

    #[must_use]
    pub fn mismatched_deletes(&self) -> usize {
        self.mismatched_deletes
    }

    /// Characters in `[begin, end)`, clamped to the buffer.
    #[must_use]
    pub fn slice(&self, begin: usize, end: usize) -> &str {
        let (b, e) = (self.byte_offset(begin), self.byte_offset(end));
        &self.text[b.min(e)..e.max(b)]
    }

    /// Move the caret without notifying anyone.
    pub fn set_selection(&mut self, caret: usize, bound: Option<usize>) {
        let len = self.char_len();
        self.caret = caret.min(len);
        self.bound = bound.map(|b| b.min(len));
    }

    /// Insert `text` at character offset `pos`, clamped to the buffer.
    /// Returns the offset actually used.
    pub fn splice_insert(&mut self, pos: usize, text: &str) -> usize {
        let pos = pos.min(self.char_len());
        let at = self.byte_offset(pos);
        self.text.insert_str(at, text);
        pos
    }

    /// Remove `[begin, end)` (either order, clamped) and return it.
    pub fn splice_delete(&mut self, begin: usize, end: usize) -> String {
        let (b, e) = (self.byte_offset(begin), self.byte_offset(end));
        self.text.drain(b.min(e)..e.max(b)).collect()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(i, _)| i)
    }
}

impl HistoryHost for PlainTextHost {
    fn change_state(&mut self, is_modified: bool, can_undo: bool, can_redo: bool) {
        self.is_modified = is_modified;
        self.can_undo = can_undo;
        self.can_redo = can_redo;
        self.state_changes += 1;
    }

    fn insert(&mut self, begin: usize, _end: usize, text: &str) {
        self.splice_insert(begin, text);
    }

    fn delete(&mut self, begin: usize, end: usize, expected_text: &str) {
        let removed = self.splice_delete(begin, end);
        if removed != expected_text {
            self.mismatched_deletes += 1;
            tracing::warn!(
                begin,
                end,
                expected_len = expected_text.len(),
                removed_len = removed.len(),
                "history delete did not match buffer contents"
            );
        }
    }

    fn select(&mut self, insert: usize, bound: Option<usize>) {
        self.set_selection(insert, bound);
    }
}
