#![forbid(unsafe_code)]

//! The seam between the history engine and the text it tracks.
//!
//! The engine never sees the live buffer. Everything it needs to replay
//! an edit travels through these four calls, which the owning widget (or
//! any other editable buffer) implements.

/// Callbacks the history invokes to replay edits and report state.
///
/// All offsets are character offsets into the host buffer. Calls are made
/// synchronously from [`TextHistory::undo`](crate::TextHistory::undo),
/// [`TextHistory::redo`](crate::TextHistory::redo) and the recording
/// operations; they are never made concurrently.
pub trait HistoryHost {
    /// The modified/undo/redo flags changed (or may have changed).
    fn change_state(&mut self, is_modified: bool, can_undo: bool, can_redo: bool);

    /// Insert `text` so that it occupies `[begin, end)`.
    fn insert(&mut self, begin: usize, end: usize, text: &str);

    /// Delete `[min(begin, end), max(begin, end))`.
    ///
    /// `expected_text` is the text the history believes is in that range.
    /// It is informational; hosts may use it for validation.
    fn delete(&mut self, begin: usize, end: usize, expected_text: &str);

    /// Move the caret to `insert`, selecting up to `bound` when given.
    /// `None` means a plain caret with no selected range.
    fn select(&mut self, insert: usize, bound: Option<usize>);
}

impl<H: HistoryHost + ?Sized> HistoryHost for Box<H> {
    fn change_state(&mut self, is_modified: bool, can_undo: bool, can_redo: bool) {
        (**self).change_state(is_modified, can_undo, can_redo);
    }

    fn insert(&mut self, begin: usize, end: usize, text: &str) {
        (**self).insert(begin, end, text);
    }

    fn delete(&mut self, begin: usize, end: usize, expected_text: &str) {
        (**self).delete(begin, end, expected_text);
    }

    fn select(&mut self, insert: usize, bound: Option<usize>) {
        (**self).select(insert, bound);
    }
}

/// Caret and selection as last reported by the host.
///
/// Both ends are optional: a host that does not track the caret reports
/// neither, and a caret without a selected range has no `bound`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub insert: Option<usize>,
    pub bound: Option<usize>,
}

impl Selection {
    /// No caret information at all.
    pub const NONE: Self = Self {
        insert: None,
        bound: None,
    };

    /// A caret at `pos` with nothing selected.
    #[must_use]
    pub const fn caret(pos: usize) -> Self {
        Self {
            insert: Some(pos),
            bound: None,
        }
    }

    /// A selected range from `insert` to `bound`.
    #[must_use]
    pub const fn range(insert: usize, bound: usize) -> Self {
        Self {
            insert: Some(insert),
            bound: Some(bound),
        }
    }

    /// Whether nothing about the caret is known.
    #[must_use]
    pub const fn is_untracked(&self) -> bool {
        self.insert.is_none() && self.bound.is_none()
    }
}

/// A host that records every callback, for unit tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub(crate) calls: Vec<HostCall>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostCall {
    ChangeState {
        is_modified: bool,
        can_undo: bool,
        can_redo: bool,
    },
    Insert(usize, usize, String),
    Delete(usize, usize, String),
    Select(usize, Option<usize>),
}

#[cfg(test)]
impl RecordingHost {
    /// Calls other than `change_state`, which most tests do not care about.
    pub(crate) fn edits(&self) -> Vec<HostCall> {
        self.calls
            .iter()
            .filter(|c| !matches!(c, HostCall::ChangeState { .. }))
            .cloned()
            .collect()
    }

    pub(crate) fn last_state(&self) -> Option<(bool, bool, bool)> {
        self.calls.iter().rev().find_map(|c| match *c {
            HostCall::ChangeState {
                is_modified,
                can_undo,
                can_redo,
            } => Some((is_modified, can_undo, can_redo)),
            _ => None,
        })
    }
}

#[cfg(test)]
impl HistoryHost for RecordingHost {
    fn change_state(&mut self, is_modified: bool, can_undo: bool, can_redo: bool) {
        self.calls.push(HostCall::ChangeState {
            is_modified,
            can_undo,
            can_redo,
        });
    }

    fn insert(&mut self, begin: usize, end: usize, text: &str) {
        self.calls.push(HostCall::Insert(begin, end, text.to_string()));
    }

    fn delete(&mut self, begin: usize, end: usize, expected_text: &str) {
        self.calls
            .push(HostCall::Delete(begin, end, expected_text.to_string()));
    }

    fn select(&mut self, insert: usize, bound: Option<usize>) {
        self.calls.push(HostCall::Select(insert, bound));
    }
}
