#![forbid(unsafe_code)]

//! Table-driven editor scripts.
//!
//! A script is a list of [`Step`]s. Each step performs one [`Op`] on an
//! [`Editor`] and then checks the buffer text and the undo/redo flags.
//! [`run_script`] stops at the first step whose expectations fail.
//!
//! ```
//! use texthist_harness::{Editor, Op, Step, run_script};
//!
//! let mut editor = Editor::new();
//! run_script(&mut editor, &[
//!     Step::new(Op::Insert { pos: 0, text: "test" }, "test", true, false),
//!     Step::new(Op::Undo, "", false, true),
//!     Step::new(Op::Redo, "test", true, false),
//! ])
//! .unwrap();
//! ```

use thiserror::Error;

use crate::editor::Editor;

/// One editor operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op<'a> {
    /// Insert text in one call.
    Insert { pos: usize, text: &'a str },
    /// Type text one character at a time.
    Type { pos: usize, text: &'a str },
    Backspace,
    DeleteKey,
    DeleteSelection,
    /// Delete a range from code, with no caret information.
    DeleteRange { begin: usize, end: usize },
    Select { insert: usize, bound: Option<usize> },
    ReplaceSelection(&'a str),
    BeginUserAction,
    EndUserAction,
    BeginIrreversibleAction,
    EndIrreversibleAction,
    Undo,
    Redo,
    SetMaxUndoLevels(usize),
    SetEnabled(bool),
    MarkSaved,
}

impl Editor {
    /// Perform `op` on this editor.
    pub fn perform(&mut self, op: &Op<'_>) {
        match *op {
            Op::Insert { pos, text } => self.insert(pos, text),
            Op::Type { pos, text } => self.type_text(pos, text),
            Op::Backspace => {
                self.backspace();
            }
            Op::DeleteKey => {
                self.delete_key();
            }
            Op::DeleteSelection => {
                self.delete_selection();
            }
            Op::DeleteRange { begin, end } => self.delete_range(begin, end),
            Op::Select { insert, bound } => self.select(insert, bound),
            Op::ReplaceSelection(text) => self.replace_selection(text),
            Op::BeginUserAction => self.begin_user_action(),
            Op::EndUserAction => self.end_user_action(),
            Op::BeginIrreversibleAction => self.begin_irreversible_action(),
            Op::EndIrreversibleAction => self.end_irreversible_action(),
            Op::Undo => self.undo(),
            Op::Redo => self.redo(),
            Op::SetMaxUndoLevels(levels) => self.set_max_undo_levels(levels),
            Op::SetEnabled(enabled) => self.set_enabled(enabled),
            Op::MarkSaved => self.mark_saved(),
        }
    }
}

/// An operation and the state expected right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    pub op: Op<'a>,
    pub text: &'a str,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl<'a> Step<'a> {
    #[must_use]
    pub const fn new(op: Op<'a>, text: &'a str, can_undo: bool, can_redo: bool) -> Self {
        Self {
            op,
            text,
            can_undo,
            can_redo,
        }
    }
}

/// The first step whose outcome differed from what the script expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("step {step} ({op}): expected text {expected:?}, found {actual:?}")]
    Text {
        step: usize,
        op: String,
        expected: String,
        actual: String,
    },
    #[error("step {step} ({op}): expected {flag} = {expected}, found {actual}")]
    Flag {
        step: usize,
        op: String,
        flag: &'static str,
        expected: bool,
        actual: bool,
    },
    /// The host was told something different from what the history reports.
    #[error("step {step} ({op}): host saw {flag} = {host}, history reports {history}")]
    Desync {
        step: usize,
        op: String,
        flag: &'static str,
        host: bool,
        history: bool,
    },
}

/// Check that the host's last `change_state` agrees with the history.
pub fn check_consistency(editor: &Editor, step: usize, op: &Op<'_>) -> Result<(), ScriptError> {
    let host = editor.host();
    let pairs = [
        ("can_undo", host.can_undo(), editor.can_undo()),
        ("can_redo", host.can_redo(), editor.can_redo()),
        ("is_modified", host.is_modified(), editor.is_modified()),
    ];
    // Before the first notification the host holds its defaults.
    if host.state_changes() == 0 {
        return Ok(());
    }
    for (flag, host, history) in pairs {
        if host != history {
            return Err(ScriptError::Desync {
                step,
                op: format!("{op:?}"),
                flag,
                host,
                history,
            });
        }
    }
    Ok(())
}

/// Run `steps` against `editor`, checking every expectation.
pub fn run_script(editor: &mut Editor, steps: &[Step<'_>]) -> Result<(), ScriptError> {
    for (i, step) in steps.iter().enumerate() {
        editor.perform(&step.op);
        tracing::trace!(step = i, op = ?step.op, text = editor.text(), "script step");

        if editor.text() != step.text {
            return Err(ScriptError::Text {
                step: i,
                op: format!("{:?}", step.op),
                expected: step.text.to_owned(),
                actual: editor.text().to_owned(),
            });
        }

        for (flag, expected, actual) in [
            ("can_undo", step.can_undo, editor.can_undo()),
            ("can_redo", step.can_redo, editor.can_redo()),
        ] {
            if expected != actual {
                return Err(ScriptError::Flag {
                    step: i,
                    op: format!("{:?}", step.op),
                    flag,
                    expected,
                    actual,
                });
            }
        }

        check_consistency(editor, i, &step.op)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_passes() {
        let mut editor = Editor::new();
        let steps = [
            Step::new(Op::Type { pos: 0, text: "ab" }, "ab", true, false),
            Step::new(Op::Backspace, "a", true, false),
            Step::new(Op::Undo, "ab", true, true),
        ];
        assert_eq!(run_script(&mut editor, &steps), Ok(()));
    }

    #[test]
    fn test_script_reports_text_mismatch() {
        let mut editor = Editor::new();
        let steps = [Step::new(Op::Insert { pos: 0, text: "x" }, "y", true, false)];
        let err = run_script(&mut editor, &steps).unwrap_err();
        assert!(matches!(err, ScriptError::Text { step: 0, .. }));
        assert!(err.to_string().contains("\"y\""));
    }

    #[test]
    fn test_script_reports_flag_mismatch() {
        let mut editor = Editor::new();
        let steps = [Step::new(Op::Insert { pos: 0, text: "x" }, "x", false, false)];
        let err = run_script(&mut editor, &steps).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Flag {
                flag: "can_undo",
                expected: false,
                actual: true,
                ..
            }
        ));
    }
}
