#![forbid(unsafe_code)]

//! A single-line editor driving a [`TextHistory`] the way an entry widget
//! does.
//!
//! Every edit is applied to the [`PlainTextHost`] buffer first and then
//! reported to the history. Before each deletion the editor reports its
//! caret and selection, so the history can tell a backspace from a
//! delete-key press or a selection removal.

use texthist::{HistoryConfig, TextHistory};

use crate::buffer::PlainTextHost;

/// Buffer plus history, wired together.
#[derive(Debug)]
pub struct Editor {
    history: TextHistory<PlainTextHost>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            history: TextHistory::with_config(PlainTextHost::new(), config),
        }
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Insert `text` at `pos` in one call, as a paste or program would.
    pub fn insert(&mut self, pos: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let pos = self.history.host_mut().splice_insert(pos, text);
        self.history.text_inserted(pos, text);
        self.move_caret(pos + text.chars().count());
        self.mark_dirty();
    }

    /// Type `text` one character at a time starting at `pos`.
    pub fn type_text(&mut self, pos: usize, text: &str) {
        let mut pos = pos;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            self.insert(pos, ch.encode_utf8(&mut buf));
            pos = self.caret();
        }
    }

    /// Delete the character before the caret, or the selection if there
    /// is one. Returns `false` if there was nothing to delete.
    pub fn backspace(&mut self) -> bool {
        if self.selected_range().is_some() {
            return self.delete_selection();
        }
        let caret = self.caret();
        if caret == 0 {
            return false;
        }
        self.report_selection();
        self.remove(caret - 1, caret);
        true
    }

    /// Delete the character after the caret, or the selection if there is
    /// one. Returns `false` if there was nothing to delete.
    pub fn delete_key(&mut self) -> bool {
        if self.selected_range().is_some() {
            return self.delete_selection();
        }
        let caret = self.caret();
        if caret >= self.history.host().char_len() {
            return false;
        }
        self.report_selection();
        self.remove(caret, caret + 1);
        true
    }

    /// Delete the selected range. Returns `false` if nothing is selected.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selected_range() else {
            return false;
        };
        self.report_selection();
        self.remove(start, end);
        true
    }

    /// Delete `[begin, end)` from code, without caret information.
    pub fn delete_range(&mut self, begin: usize, end: usize) {
        let len = self.history.host().char_len();
        let (begin, end) = (begin.min(end).min(len), begin.max(end).min(len));
        if begin == end {
            return;
        }
        self.history.selection_changed(None, None);
        self.remove(begin, end);
    }

    /// Replace the selection (if any) with `text` as one undo step.
    pub fn replace_selection(&mut self, text: &str) {
        self.history.begin_user_action();
        self.delete_selection();
        let caret = self.caret();
        self.insert(caret, text);
        self.history.end_user_action();
    }

    /// Move the caret, optionally selecting up to `bound`.
    pub fn select(&mut self, insert: usize, bound: Option<usize>) {
        self.history.host_mut().set_selection(insert, bound);
        self.report_selection();
    }

    // ========================================================================
    // History
    // ========================================================================

    pub fn undo(&mut self) {
        self.history.undo();
    }

    pub fn redo(&mut self) {
        self.history.redo();
    }

    pub fn begin_user_action(&mut self) {
        self.history.begin_user_action();
    }

    pub fn end_user_action(&mut self) {
        self.history.end_user_action();
    }

    pub fn begin_irreversible_action(&mut self) {
        self.history.begin_irreversible_action();
    }

    pub fn end_irreversible_action(&mut self) {
        self.history.end_irreversible_action();
    }

    pub fn set_max_undo_levels(&mut self, levels: usize) {
        self.history.set_max_undo_levels(levels);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.history.set_enabled(enabled);
    }

    /// Mark the current contents as saved.
    pub fn mark_saved(&mut self) {
        self.history.modified_changed(false);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn text(&self) -> &str {
        self.history.host().text()
    }

    #[must_use]
    pub fn caret(&self) -> usize {
        self.history.host().caret()
    }

    #[must_use]
    pub fn selected_range(&self) -> Option<(usize, usize)> {
        self.history.host().selected_range()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.history.is_modified()
    }

    #[must_use]
    pub fn host(&self) -> &PlainTextHost {
        self.history.host()
    }

    #[must_use]
    pub fn history(&self) -> &TextHistory<PlainTextHost> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut TextHistory<PlainTextHost> {
        &mut self.history
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn report_selection(&mut self) {
        let host = self.history.host();
        let bound = host.selected_range().and_then(|_| host.bound());
        let caret = host.caret();
        self.history.selection_changed(Some(caret), bound);
    }

    fn remove(&mut self, begin: usize, end: usize) {
        let removed = self.history.host_mut().splice_delete(begin, end);
        self.history.text_deleted(begin, end, &removed);
        self.move_caret(begin);
        self.mark_dirty();
    }

    fn move_caret(&mut self, caret: usize) {
        self.history.host_mut().set_selection(caret, None);
        self.history.selection_changed(Some(caret), None);
    }

    /// The first edit after a save flips the buffer to modified.
    fn mark_dirty(&mut self) {
        if !self.history.host().is_modified() {
            self.history.modified_changed(true);
        }
    }
}
