#![forbid(unsafe_code)]

//! Table-driven editing sessions.
//!
//! Every row performs one operation and then pins the buffer text and the
//! undo/redo flags. The runner also verifies that the flags the host was
//! last notified of match what the history reports.

use texthist::HistoryConfig;
use texthist_harness::{Editor, Op, Step, run_script};

fn run(steps: &[Step<'_>]) {
    run_in(&mut Editor::new(), steps);
}

fn run_in(editor: &mut Editor, steps: &[Step<'_>]) {
    if let Err(err) = run_script(editor, steps) {
        panic!("{err}");
    }
}

const fn s<'a>(op: Op<'a>, text: &'a str, can_undo: bool, can_redo: bool) -> Step<'a> {
    Step::new(op, text, can_undo, can_redo)
}

#[test]
fn insert_undo_redo() {
    run(&[
        s(Op::Insert { pos: 0, text: "test" }, "test", true, false),
        s(Op::Undo, "", false, true),
        s(Op::Redo, "test", true, false),
        s(Op::Redo, "test", true, false),
        s(Op::Undo, "", false, true),
        s(Op::Undo, "", false, true),
    ]);
}

#[test]
fn insert_into_middle() {
    run(&[
        s(Op::Insert { pos: 0, text: "test" }, "test", true, false),
        s(Op::Insert { pos: 2, text: "s" }, "tesst", true, false),
        s(Op::Insert { pos: 3, text: "ss" }, "tesssst", true, false),
        s(Op::DeleteRange { begin: 2, end: 5 }, "test", true, false),
        s(Op::Undo, "tesssst", true, true),
        s(Op::Redo, "test", true, false),
        s(Op::Undo, "tesssst", true, true),
        s(Op::Undo, "test", true, true),
        s(Op::Undo, "", false, true),
    ]);
}

#[test]
fn typed_words() {
    run(&[
        s(Op::Type { pos: 0, text: "this is" }, "this is", true, false),
        s(Op::Type { pos: 7, text: " some" }, "this is some", true, false),
        s(Op::Undo, "this is", true, true),
        s(Op::Undo, "this", true, true),
        s(Op::Redo, "this is", true, true),
        // Joins the word it touches.
        s(Op::Type { pos: 7, text: "!" }, "this is!", true, false),
        s(Op::Undo, "this", true, true),
        s(Op::Undo, "", false, true),
    ]);
}

#[test]
fn grouped_edits() {
    run(&[
        s(Op::BeginUserAction, "", false, false),
        s(Op::Insert { pos: 0, text: "a" }, "a", false, false),
        s(Op::BeginUserAction, "a", false, false),
        s(Op::Insert { pos: 1, text: "\n" }, "a\n", false, false),
        s(Op::EndUserAction, "a\n", false, false),
        s(Op::Insert { pos: 2, text: "b" }, "a\nb", false, false),
        s(Op::EndUserAction, "a\nb", true, false),
        s(Op::Type { pos: 3, text: "c" }, "a\nbc", true, false),
        s(Op::Undo, "a\nb", true, true),
        s(Op::Undo, "", false, true),
        s(Op::Redo, "a\nb", true, true),
        s(Op::Redo, "a\nbc", true, false),
    ]);
}

#[test]
fn replace_selection_in_one_step() {
    run(&[
        s(Op::Insert { pos: 0, text: "hello world" }, "hello world", true, false),
        s(Op::Select { insert: 6, bound: Some(11) }, "hello world", true, false),
        s(Op::ReplaceSelection("there"), "hello there", true, false),
        s(Op::Undo, "hello world", true, true),
        s(Op::Redo, "hello there", true, false),
    ]);
}

#[test]
fn mixed_deletions() {
    run(&[
        s(Op::Insert { pos: 0, text: "abcdef" }, "abcdef", true, false),
        s(Op::Select { insert: 3, bound: None }, "abcdef", true, false),
        s(Op::Backspace, "abdef", true, false),
        s(Op::Backspace, "adef", true, false),
        s(Op::DeleteKey, "aef", true, false),
        s(Op::DeleteKey, "af", true, false),
        s(Op::Undo, "adef", true, true),
        s(Op::Undo, "abcdef", true, true),
        s(Op::Undo, "", false, true),
    ]);
}

#[test]
fn new_edit_discards_redo() {
    run(&[
        s(Op::Type { pos: 0, text: "one two" }, "one two", true, false),
        s(Op::Undo, "one", true, true),
        s(Op::Type { pos: 3, text: "!" }, "one!", true, false),
        s(Op::Redo, "one!", true, false),
        s(Op::Undo, "", false, true),
    ]);
}

#[test]
fn irreversible_section() {
    run(&[
        s(Op::Type { pos: 0, text: "abc" }, "abc", true, false),
        s(Op::BeginIrreversibleAction, "abc", false, false),
        s(Op::Insert { pos: 0, text: "x" }, "xabc", false, false),
        s(Op::Undo, "xabc", false, false),
        s(Op::EndIrreversibleAction, "xabc", false, false),
        s(Op::Insert { pos: 4, text: "d" }, "xabcd", true, false),
        s(Op::Undo, "xabc", false, true),
    ]);
}

#[test]
fn misuse_is_ignored() {
    run(&[
        s(Op::EndUserAction, "", false, false),
        s(Op::EndIrreversibleAction, "", false, false),
        s(Op::Insert { pos: 0, text: "a" }, "a", true, false),
        s(Op::BeginUserAction, "a", false, false),
        s(Op::BeginIrreversibleAction, "a", false, false),
        s(Op::Insert { pos: 1, text: "b" }, "ab", false, false),
        s(Op::EndIrreversibleAction, "ab", false, false),
        s(Op::EndUserAction, "ab", true, false),
        s(Op::Undo, "a", true, true),
    ]);
}

#[test]
fn toggling_enabled() {
    run(&[
        s(Op::Insert { pos: 0, text: "a" }, "a", true, false),
        s(Op::SetEnabled(false), "a", false, false),
        s(Op::Insert { pos: 1, text: "b" }, "ab", false, false),
        s(Op::SetEnabled(true), "ab", false, false),
        s(Op::Insert { pos: 2, text: "\n" }, "ab\n", true, false),
        s(Op::Undo, "ab", false, true),
    ]);
}

#[test]
fn limit_changes_mid_session() {
    let mut editor = Editor::with_config(HistoryConfig::unlimited());
    run_in(
        &mut editor,
        &[
            s(Op::Type { pos: 0, text: "a b c d" }, "a b c d", true, false),
            s(Op::Undo, "a b c", true, true),
            s(Op::SetMaxUndoLevels(2), "a b c", true, true),
            s(Op::Undo, "a b", false, true),
            s(Op::Redo, "a b c", true, true),
            s(Op::Redo, "a b c d", true, false),
        ],
    );
    assert_eq!(editor.history().max_undo_levels(), 2);
}

#[test]
fn save_point_survives_undo_redo() {
    let mut editor = Editor::new();
    run_in(
        &mut editor,
        &[
            s(Op::Type { pos: 0, text: "draft" }, "draft", true, false),
            s(Op::MarkSaved, "draft", true, false),
        ],
    );
    assert!(!editor.is_modified());

    run_in(&mut editor, &[s(Op::Type { pos: 5, text: " two" }, "draft two", true, false)]);
    assert!(editor.is_modified());

    run_in(&mut editor, &[s(Op::Undo, "draft", true, true)]);
    assert!(!editor.is_modified());
}
