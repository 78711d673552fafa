#![forbid(unsafe_code)]

//! The text history engine.
//!
//! [`TextHistory`] records the insertions and deletions a host reports,
//! coalesces them into undo steps, and replays them backward or forward
//! through the host's [`HistoryHost`] callbacks.
//!
//! # Invariants
//!
//! 1. The redo sequence is cleared before any newly recorded edit lands
//! 2. While a user or irreversible action is open, `can_undo()` and
//!    `can_redo()` are `false` regardless of the sequences
//! 3. While a user action is open, the tail of the undo sequence is its
//!    open group; nested begins deepen that group instead of adding one
//! 4. A transaction that recorded nothing leaves no entry behind
//! 5. `undo_depth() + redo_depth() <= max_undo_levels()` whenever no user
//!    action is open (and the limit is non-zero)
//!
//! # Memory Model
//!
//! Both sequences are `VecDeque`s: undo pops from the back and pushes the
//! action onto the front of redo; redo does the mirror image. Truncation
//! evicts from the front of undo, then from the back of redo.
//!
//! ```text
//! type "foo bar", undo once
//! ┌───────────────────────────────────────────────┐
//! │ Undo: [Insert "foo"]                           │
//! │ Redo: [Insert " bar"]                          │
//! └───────────────────────────────────────────────┘
//!
//! begin_user_action, type "!", end_user_action
//! ┌───────────────────────────────────────────────┐
//! │ Undo: [Insert "foo", Group[Insert "!"], Barrier]│
//! │ Redo: []                                       │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! A barrier travels with its group: undo moves it to the redo side first
//! and redo moves it back before replaying the next entry.

use std::collections::VecDeque;
use std::fmt;

use crate::action::{Action, DeleteKind};
use crate::coalesce::try_merge;
use crate::config::HistoryConfig;
use crate::error::UsageError;
use crate::host::{HistoryHost, Selection};

/// Whether the engine is currently replaying an action into the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ApplyState {
    #[default]
    Idle,
    Applying,
}

/// Undo/redo history for one editable text buffer.
pub struct TextHistory<H> {
    host: H,
    /// Entries available for undo (newest at back).
    undo_stack: VecDeque<Action>,
    /// Entries available for redo (next to redo at front).
    redo_stack: VecDeque<Action>,
    /// Caret and selection as last reported outside a user action.
    selection: Selection,
    irreversible_depth: u32,
    user_depth: u32,
    config: HistoryConfig,
    state: ApplyState,
    can_undo: bool,
    can_redo: bool,
    modified: Option<bool>,
}

impl<H> fmt::Debug for TextHistory<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextHistory")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("user_depth", &self.user_depth)
            .field("irreversible_depth", &self.irreversible_depth)
            .field("can_undo", &self.can_undo)
            .field("can_redo", &self.can_redo)
            .field("modified", &self.modified)
            .field("config", &self.config)
            .finish()
    }
}

impl<H: HistoryHost> TextHistory<H> {
    /// Create a history bound to `host` with the default configuration.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_config(host, HistoryConfig::default())
    }

    /// Create a history bound to `host` with the given configuration.
    #[must_use]
    pub fn with_config(host: H, config: HistoryConfig) -> Self {
        Self {
            host,
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            selection: Selection::NONE,
            irreversible_depth: 0,
            user_depth: 0,
            config,
            state: ApplyState::Idle,
            can_undo: false,
            can_redo: false,
            modified: None,
        }
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// The host inserted `text` at character offset `position`.
    pub fn text_inserted(&mut self, position: usize, text: &str) {
        if !self.recording() || text.is_empty() {
            return;
        }
        self.push(Action::insert(position, text));
    }

    /// The host deleted `text` from `[begin, end)`.
    ///
    /// The kind of deletion is inferred from the selection reported by the
    /// last [`selection_changed`](Self::selection_changed).
    pub fn text_deleted(&mut self, begin: usize, end: usize, text: &str) {
        if !self.recording() {
            return;
        }
        let (begin, end) = (begin.min(end), begin.max(end));
        if begin == end {
            return;
        }
        let kind = DeleteKind::classify(self.selection, begin, end);
        self.push(Action::delete(kind, begin, end, text, self.selection));
    }

    /// The host's caret or selection moved. `None` for `insert` means the
    /// caret is not tracked; `None` for `bound` means nothing is selected.
    pub fn selection_changed(&mut self, insert: Option<usize>, bound: Option<usize>) {
        if !self.recording() || self.user_depth > 0 {
            return;
        }
        self.selection = Selection { insert, bound };
    }

    /// The host's modified flag changed, typically because the buffer was
    /// saved (`false`) or first edited after a save (`true`).
    ///
    /// The current tail of the undo sequence becomes the save point.
    pub fn modified_changed(&mut self, is_modified: bool) {
        if !self.recording() {
            return;
        }

        // Only one save point is meaningful.
        for action in self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut()) {
            action.clear_modified();
        }

        let skip = usize::from(self.undo_stack.back().is_some_and(Action::is_barrier));
        if let Some(action) = self.undo_stack.iter_mut().rev().nth(skip) {
            action.modified = Some(is_modified);
        }

        self.modified = Some(is_modified);
        self.update_state();
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// Open a user action. Everything recorded until the matching
    /// [`end_user_action`](Self::end_user_action) becomes one undo step.
    /// Calls nest.
    pub fn begin_user_action(&mut self) {
        if !self.recording() {
            return;
        }

        self.user_depth += 1;

        if let Some(depth) = self.undo_stack.back_mut().and_then(Action::open_depth_mut) {
            *depth += 1;
            return;
        }

        self.push(Action::group());
    }

    /// Close the innermost user action.
    pub fn end_user_action(&mut self) {
        if !self.recording() {
            return;
        }
        if let Err(err) = self.close_user_action() {
            self.report(err);
        }
    }

    fn close_user_action(&mut self) -> Result<(), UsageError> {
        if self.user_depth == 0 {
            return Err(UsageError::UnmatchedEndUserAction);
        }
        let Some(depth) = self.undo_stack.back_mut().and_then(Action::open_depth_mut) else {
            return Err(UsageError::UnmatchedEndUserAction);
        };

        *depth -= 1;
        let closed = *depth == 0;
        self.user_depth -= 1;
        self.redo_stack.clear();

        if !closed {
            return Ok(());
        }

        if self.undo_stack.back().is_some_and(Action::is_actionable) {
            self.undo_stack.push_back(Action::barrier());
        } else {
            self.undo_stack.pop_back();
        }

        self.truncate();
        self.update_state();
        Ok(())
    }

    /// Start a section whose edits cannot be undone. Clears all history.
    pub fn begin_irreversible_action(&mut self) {
        if !self.accepting() {
            return;
        }
        if self.user_depth > 0 {
            self.report(UsageError::IrreversibleInUserAction);
            return;
        }

        self.irreversible_depth += 1;
        self.clear();
        self.update_state();
    }

    /// Leave an irreversible section. Clears all history again.
    pub fn end_irreversible_action(&mut self) {
        if !self.accepting() {
            return;
        }
        if self.user_depth > 0 {
            self.report(UsageError::EndIrreversibleInUserAction);
            return;
        }
        if self.irreversible_depth == 0 {
            self.report(UsageError::UnmatchedEndIrreversibleAction);
            return;
        }

        self.irreversible_depth -= 1;
        self.clear();
        self.update_state();
    }

    // ========================================================================
    // Undo / Redo
    // ========================================================================

    /// Undo the most recent step, replaying its inverse into the host.
    pub fn undo(&mut self) {
        if !self.recording() || !self.can_undo {
            return;
        }

        self.state = ApplyState::Applying;

        let mut action = self.undo_stack.pop_back();
        if let Some(barrier) = action.take_if(|a| a.is_barrier()) {
            self.redo_stack.push_front(barrier);
            action = self.undo_stack.pop_back();
        }

        if let Some(action) = action {
            tracing::debug!(
                kind = action.kind_name(),
                undo_depth = self.undo_stack.len(),
                redo_depth = self.redo_stack.len() + 1,
                "undo"
            );
            action.reverse(&mut self.host, &mut self.modified);
            self.redo_stack.push_front(action);
        }

        self.state = ApplyState::Idle;
        self.update_state();
    }

    /// Redo the most recently undone step.
    pub fn redo(&mut self) {
        if !self.recording() || !self.can_redo {
            return;
        }

        self.state = ApplyState::Applying;

        let mut action = self.redo_stack.pop_front();
        if let Some(barrier) = action.take_if(|a| a.is_barrier()) {
            self.undo_stack.push_back(barrier);
            action = self.redo_stack.pop_front();
        }

        if let Some(action) = action {
            tracing::debug!(
                kind = action.kind_name(),
                undo_depth = self.undo_stack.len() + 1,
                redo_depth = self.redo_stack.len(),
                "redo"
            );
            action.apply(&mut self.host, self.redo_stack.front(), &mut self.modified);
            self.undo_stack.push_back(action);
        }

        self.state = ApplyState::Idle;
        self.update_state();
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Limit the number of entries kept across undo and redo (0 = no
    /// limit). Oldest undo entries go first, then the furthest redo ones.
    pub fn set_max_undo_levels(&mut self, levels: usize) {
        if self.config.max_undo_levels == levels {
            return;
        }
        self.config.max_undo_levels = levels;
        if self.accepting() {
            self.truncate();
            self.update_state();
        }
    }

    /// Turn recording on or off. Either way the history starts empty.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.state == ApplyState::Applying || self.config.enabled == enabled {
            return;
        }

        tracing::debug!(enabled, "text history enabled changed");

        self.config.enabled = enabled;
        self.irreversible_depth = 0;
        self.user_depth = 0;
        self.selection = Selection::NONE;
        self.clear();
        self.update_state();
    }

    // ========================================================================
    // Info
    // ========================================================================

    /// Whether there is a step to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.can_undo
    }

    /// Whether there is a step to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.can_redo
    }

    /// Modified flag as last reported by the host or restored by replaying
    /// across the save point. `false` until the host reports one.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified.unwrap_or(false)
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    #[must_use]
    pub fn max_undo_levels(&self) -> usize {
        self.config.max_undo_levels
    }

    /// Number of entries on the undo side, barriers included.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of entries on the redo side, barriers included.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    #[must_use]
    pub fn in_user_action(&self) -> bool {
        self.user_depth > 0
    }

    #[must_use]
    pub fn in_irreversible_action(&self) -> bool {
        self.irreversible_depth > 0
    }

    /// Selection snapshot used to classify the next deletion.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Get the current configuration.
    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host. Edits made through this reference are
    /// not recorded unless reported back through `text_inserted` and
    /// `text_deleted`.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Operations other than enable/disable require this.
    fn accepting(&self) -> bool {
        self.config.enabled && self.state == ApplyState::Idle
    }

    /// Recording operations additionally stay silent inside an
    /// irreversible section.
    fn recording(&self) -> bool {
        self.accepting() && self.irreversible_depth == 0
    }

    fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Record a new action: drop the redo branch, coalesce or append,
    /// enforce limits, notify.
    fn push(&mut self, action: Action) {
        self.redo_stack.clear();

        let in_user_action = self.user_depth > 0;
        let kind = action.kind_name();
        let unmerged = match self.undo_stack.back_mut() {
            Some(tail) if !tail.is_closed_group() => {
                try_merge(tail, action, in_user_action, &self.config.merge).err()
            }
            _ => Some(action),
        };

        match unmerged {
            Some(action) => {
                tracing::trace!(kind, undo_depth = self.undo_stack.len() + 1, "pushed");
                self.undo_stack.push_back(action);
            }
            None => tracing::trace!(kind, "coalesced"),
        }

        self.truncate();
        self.update_state();
    }

    /// Evict the oldest entries until the limit holds. Deferred while a
    /// user action is open so its group is never evicted.
    fn truncate(&mut self) {
        let max = self.config.max_undo_levels;
        if max == 0 || self.user_depth > 0 {
            return;
        }

        while self.undo_stack.len() + self.redo_stack.len() > max {
            let Some(evicted) = self
                .undo_stack
                .pop_front()
                .or_else(|| self.redo_stack.pop_back())
            else {
                break;
            };
            tracing::debug!(kind = evicted.kind_name(), max, "evicted history entry");
        }
    }

    fn update_state(&mut self) {
        if self.irreversible_depth > 0 || self.user_depth > 0 {
            self.can_undo = false;
            self.can_redo = false;
        } else {
            self.can_undo = self.undo_stack.iter().any(Action::is_actionable);
            self.can_redo = self.redo_stack.iter().any(Action::is_actionable);
        }

        self.host
            .change_state(self.is_modified(), self.can_undo, self.can_redo);
    }

    fn report(&self, err: UsageError) {
        tracing::warn!(
            error = %err,
            user_depth = self.user_depth,
            irreversible_depth = self.irreversible_depth,
            "ignoring mismatched history call"
        );
    }
}

// ============================================================================
// Tests
// ============================================================================
