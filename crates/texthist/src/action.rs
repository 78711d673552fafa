#![forbid(unsafe_code)]

//! Undoable units recorded by the text history.
//!
//! An [`Action`] is one entry in the undo or redo sequence: a single
//! insertion, a deletion, a transaction [`Group`](ActionKind::Group) of
//! further actions, or a [`Barrier`](ActionKind::Barrier) that stops
//! coalescing across a finished transaction.
//!
//! # Invariants
//!
//! - `apply()` followed by `reverse()` leaves the host as it was
//! - `reverse()` followed by `apply()` restores the applied state
//! - Insert and delete actions always carry non-empty text whose
//!   character count equals `end - begin`
//!
//! # Save point
//!
//! Each action may carry a `modified` stamp. Only one action in the whole
//! history holds it at a time: the action that was at the tail of the undo
//! sequence when the host last reported a change of its modified flag.
//! Replaying that action forward restores the stamped flag, replaying it
//! backward restores its negation.

use std::fmt;

use crate::host::{HistoryHost, Selection};
use crate::span::TextSpan;

/// How a deletion was performed, judged from the caret before the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteKind {
    /// Caret sat at the end of the deleted range (backspace).
    Backspace,
    /// Caret sat at the start of the deleted range (delete key).
    Key,
    /// No caret was tracked; the deletion came from code.
    Programmatic,
    /// A real range was selected and removed.
    Selection,
}

impl DeleteKind {
    /// Classify a deletion of `[begin, end)` from the caret state just
    /// before it happened.
    #[must_use]
    pub fn classify(selection: Selection, begin: usize, end: usize) -> Self {
        match (selection.insert, selection.bound) {
            (None, None) => Self::Programmatic,
            (Some(insert), None) if insert == end => Self::Backspace,
            (Some(insert), None) if insert == begin => Self::Key,
            _ => Self::Selection,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Backspace => "delete-backspace",
            Self::Key => "delete-key",
            Self::Programmatic => "delete-programmatic",
            Self::Selection => "delete-selection",
        }
    }
}

/// Payload of an [`Action`].
#[derive(Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Text inserted at `[begin, end)`.
    Insert {
        begin: usize,
        end: usize,
        text: TextSpan,
    },
    /// Text removed from `[begin, end)`.
    Delete {
        kind: DeleteKind,
        begin: usize,
        end: usize,
        text: TextSpan,
        /// Caret and selection before the deletion, restored on undo.
        selection: Selection,
    },
    /// A user transaction. `depth` counts begin calls not yet matched by
    /// an end; the group is open while it is non-zero.
    Group { children: Vec<Action>, depth: u32 },
    /// Marker placed after a closed transaction.
    Barrier,
}

/// One undoable and redoable entry.
#[derive(Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    /// Save-point stamp; see the module docs.
    pub modified: Option<bool>,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ActionKind::Insert { begin, end, text } => f
                .debug_struct("Insert")
                .field("begin", begin)
                .field("end", end)
                .field("text", &text.as_str())
                .field("modified", &self.modified)
                .finish(),
            ActionKind::Delete {
                kind,
                begin,
                end,
                text,
                selection,
            } => f
                .debug_struct("Delete")
                .field("kind", kind)
                .field("begin", begin)
                .field("end", end)
                .field("text", &text.as_str())
                .field("selection", selection)
                .field("modified", &self.modified)
                .finish(),
            ActionKind::Group { children, depth } => f
                .debug_struct("Group")
                .field("depth", depth)
                .field("children", children)
                .field("modified", &self.modified)
                .finish(),
            ActionKind::Barrier => f.write_str("Barrier"),
        }
    }
}

impl Action {
    fn from_kind(kind: ActionKind) -> Self {
        Self {
            kind,
            modified: None,
        }
    }

    /// An insertion of `text` starting at `begin`.
    #[must_use]
    pub fn insert(begin: usize, text: &str) -> Self {
        let text = TextSpan::from(text);
        Self::from_kind(ActionKind::Insert {
            begin,
            end: begin + text.char_count(),
            text,
        })
    }

    /// A deletion of `text` from `[begin, end)`.
    #[must_use]
    pub fn delete(
        kind: DeleteKind,
        begin: usize,
        end: usize,
        text: &str,
        selection: Selection,
    ) -> Self {
        Self::from_kind(ActionKind::Delete {
            kind,
            begin,
            end,
            text: TextSpan::from(text),
            selection,
        })
    }

    /// A freshly opened transaction group.
    #[must_use]
    pub fn group() -> Self {
        Self::from_kind(ActionKind::Group {
            children: Vec::new(),
            depth: 1,
        })
    }

    #[must_use]
    pub fn barrier() -> Self {
        Self::from_kind(ActionKind::Barrier)
    }

    #[must_use]
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, ActionKind::Barrier)
    }

    /// Whether this is a group still waiting for `end_user_action`.
    #[must_use]
    pub fn is_open_group(&self) -> bool {
        matches!(self.kind, ActionKind::Group { depth, .. } if depth > 0)
    }

    /// Whether this is a finished transaction. Closed groups are never
    /// extended by later edits.
    #[must_use]
    pub fn is_closed_group(&self) -> bool {
        matches!(self.kind, ActionKind::Group { depth: 0, .. })
    }

    /// Nesting counter of a group that is still open.
    pub(crate) fn open_depth_mut(&mut self) -> Option<&mut u32> {
        match &mut self.kind {
            ActionKind::Group { depth, .. } if *depth > 0 => Some(depth),
            _ => None,
        }
    }

    /// Whether undoing or redoing this action would change the buffer.
    ///
    /// Barriers never do; a group only does if some child does.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match &self.kind {
            ActionKind::Barrier => false,
            ActionKind::Group { children, .. } => children.iter().any(Action::is_actionable),
            ActionKind::Insert { .. } | ActionKind::Delete { .. } => true,
        }
    }

    /// Short name used in logs and diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ActionKind::Insert { .. } => "insert",
            ActionKind::Delete { kind, .. } => kind.name(),
            ActionKind::Group { .. } => "group",
            ActionKind::Barrier => "barrier",
        }
    }

    /// Drop the save-point stamp from this action and any children.
    pub(crate) fn clear_modified(&mut self) {
        self.modified = None;
        if let ActionKind::Group { children, .. } = &mut self.kind {
            children.iter_mut().for_each(Action::clear_modified);
        }
    }

    /// Replay the forward effect of this action on `host`.
    ///
    /// `lookahead` is the action that will be replayed next, if any. An
    /// insertion directly followed by a selection delete pre-selects the
    /// range that delete is about to remove.
    pub(crate) fn apply<H: HistoryHost + ?Sized>(
        &self,
        host: &mut H,
        lookahead: Option<&Action>,
        modified: &mut Option<bool>,
    ) {
        match &self.kind {
            ActionKind::Insert { begin, end, text } => {
                host.insert(*begin, *end, text.as_str());
                match lookahead.map(|a| &a.kind) {
                    Some(ActionKind::Delete {
                        kind: DeleteKind::Selection,
                        begin: next_begin,
                        end: next_end,
                        ..
                    }) => host.select(*next_begin, Some(*next_end)),
                    _ => host.select(*end, None),
                }
            }
            ActionKind::Delete {
                begin, end, text, ..
            } => {
                host.delete(*begin, *end, text.as_str());
                host.select(*begin, None);
            }
            ActionKind::Group { children, .. } => {
                for (i, child) in children.iter().enumerate() {
                    child.apply(host, children.get(i + 1), modified);
                }
            }
            ActionKind::Barrier => {}
        }

        if let Some(stamp) = self.modified {
            *modified = Some(stamp);
        }
    }

    /// Replay the inverse effect of this action on `host`.
    pub(crate) fn reverse<H: HistoryHost + ?Sized>(
        &self,
        host: &mut H,
        modified: &mut Option<bool>,
    ) {
        match &self.kind {
            ActionKind::Insert { begin, end, text } => {
                host.delete(*begin, *end, text.as_str());
                host.select(*begin, None);
            }
            ActionKind::Delete {
                begin,
                end,
                text,
                selection,
                ..
            } => {
                host.insert(*begin, *end, text.as_str());
                match (selection.insert, selection.bound) {
                    (Some(insert), Some(bound)) => host.select(insert, Some(bound)),
                    (Some(insert), None) => host.select(insert, None),
                    // Nothing was tracked, leave the host's selection alone.
                    (None, _) => {}
                }
            }
            ActionKind::Group { children, .. } => {
                for child in children.iter().rev() {
                    child.reverse(host, modified);
                }
            }
            ActionKind::Barrier => {}
        }

        if let Some(stamp) = self.modified {
            *modified = Some(!stamp);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
