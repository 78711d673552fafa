#![forbid(unsafe_code)]

//! Folding new actions into the most recent history entry.
//!
//! Typing a word produces one insertion per keystroke, but the user
//! expects a single undo step for the word. [`try_merge`] decides whether
//! an incoming action can be absorbed by the entry at the tail of the undo
//! sequence.
//!
//! # Rules
//!
//! - An open group absorbs everything (barriers are dropped), first
//!   offering the action to its own last child.
//! - Actions of different kinds never merge.
//! - Insertions merge when contiguous. Outside a user transaction, word
//!   and line heuristics also apply (see [`insert_chains`]).
//! - Backspaces merge when the new deletion ends where the previous one
//!   began; delete-key deletions merge when both start at the same place
//!   and the new text does not cross into another word.
//! - Programmatic and selection deletions never merge.
//! - Two barriers collapse into one.

use crate::action::{Action, ActionKind, DeleteKind};
use crate::config::MergeConfig;
use crate::span::TextSpan;

/// Try to fold `incoming` into `existing`.
///
/// Returns `Ok(())` if `existing` absorbed it, `Err(incoming)` if the two
/// must stay separate entries.
pub fn try_merge(
    existing: &mut Action,
    incoming: Action,
    in_user_action: bool,
    config: &MergeConfig,
) -> Result<(), Action> {
    if let ActionKind::Group { children, .. } = &mut existing.kind {
        // A transaction is replayed as one unit; it never needs a barrier.
        if incoming.is_barrier() {
            return Ok(());
        }
        let incoming = match children.last_mut() {
            Some(tail) => match try_merge(tail, incoming, in_user_action, config) {
                Ok(()) => return Ok(()),
                Err(incoming) => incoming,
            },
            None => incoming,
        };
        children.push(incoming);
        return Ok(());
    }

    let merged = match (&mut existing.kind, &incoming.kind) {
        (ActionKind::Barrier, ActionKind::Barrier) => true,
        (
            ActionKind::Insert { end, text, .. },
            ActionKind::Insert {
                begin: new_begin,
                end: new_end,
                text: new_text,
            },
        ) => {
            let chains = *new_begin == *end
                && (in_user_action || insert_chains(text, new_text, config));
            if chains {
                text.append(new_text);
                *end = *new_end;
            }
            chains
        }
        (
            ActionKind::Delete {
                kind,
                begin,
                end,
                text,
                ..
            },
            ActionKind::Delete {
                kind: new_kind,
                begin: new_begin,
                end: new_end,
                text: new_text,
                ..
            },
        ) if *kind == *new_kind => match kind {
            DeleteKind::Backspace if *new_end == *begin => {
                text.prepend(new_text);
                *begin = *new_begin;
                true
            }
            DeleteKind::Key
                if *new_begin == *begin
                    && (!new_text.contains_space() || text.only_space()) =>
            {
                text.append(new_text);
                *end += new_text.char_count();
                true
            }
            _ => false,
        },
        _ => false,
    };

    if merged { Ok(()) } else { Err(incoming) }
}

/// Keystroke heuristics for two contiguous insertions outside a user
/// transaction.
///
/// Leading whitespace accumulates onto the following word, so typing
/// `"  foo bar"` yields the steps `"  foo"` and `" bar"`. Newlines, pastes
/// containing whitespace and runs longer than
/// [`MergeConfig::max_merged_chars`] always start a new step.
#[must_use]
pub fn insert_chains(existing: &TextSpan, incoming: &TextSpan, config: &MergeConfig) -> bool {
    if existing.char_count() + incoming.char_count() > config.max_merged_chars {
        return false;
    }

    if existing.contains_char('\n') || incoming.contains_char('\n') {
        return false;
    }

    if incoming.only_space() && (existing.is_empty() || existing.ends_with_space()) {
        return true;
    }

    // New word.
    if incoming.starts_with_space() && !existing.ends_with_space() {
        return false;
    }

    !(incoming.char_count() > 1 && incoming.contains_space())
}

// ============================================================================
// Tests
// ============================================================================
