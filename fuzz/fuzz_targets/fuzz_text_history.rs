#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use texthist::HistoryConfig;
use texthist_harness::{Editor, Op, check_consistency};

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    Insert(u8, String),
    Type(u8, String),
    Backspace,
    DeleteKey,
    DeleteSelection,
    DeleteRange(u8, u8),
    Select(u8, Option<u8>),
    ReplaceSelection(String),
    BeginUserAction,
    EndUserAction,
    BeginIrreversibleAction,
    EndIrreversibleAction,
    Undo,
    Redo,
    SetMaxUndoLevels(u8),
    SetEnabled(bool),
    MarkSaved,
}

impl FuzzOp {
    fn as_op(&self) -> Op<'_> {
        match self {
            Self::Insert(pos, text) => Op::Insert {
                pos: usize::from(*pos),
                text,
            },
            Self::Type(pos, text) => Op::Type {
                pos: usize::from(*pos),
                text,
            },
            Self::Backspace => Op::Backspace,
            Self::DeleteKey => Op::DeleteKey,
            Self::DeleteSelection => Op::DeleteSelection,
            Self::DeleteRange(begin, end) => Op::DeleteRange {
                begin: usize::from(*begin),
                end: usize::from(*end),
            },
            Self::Select(insert, bound) => Op::Select {
                insert: usize::from(*insert),
                bound: bound.map(usize::from),
            },
            Self::ReplaceSelection(text) => Op::ReplaceSelection(text),
            Self::BeginUserAction => Op::BeginUserAction,
            Self::EndUserAction => Op::EndUserAction,
            Self::BeginIrreversibleAction => Op::BeginIrreversibleAction,
            Self::EndIrreversibleAction => Op::EndIrreversibleAction,
            Self::Undo => Op::Undo,
            Self::Redo => Op::Redo,
            Self::SetMaxUndoLevels(levels) => Op::SetMaxUndoLevels(usize::from(*levels % 16)),
            Self::SetEnabled(enabled) => Op::SetEnabled(*enabled),
            Self::MarkSaved => Op::MarkSaved,
        }
    }
}

fuzz_target!(|ops: Vec<FuzzOp>| {
    // Keep each run short.
    if ops.len() > 256 {
        return;
    }

    let mut editor = Editor::with_config(HistoryConfig::new(32));
    for (i, op) in ops.iter().enumerate() {
        let op = op.as_op();
        editor.perform(&op);

        if let Err(err) = check_consistency(&editor, i, &op) {
            panic!("{err}");
        }
        let history = editor.history();
        if history.in_user_action() || history.in_irreversible_action() {
            assert!(!history.can_undo() && !history.can_redo());
        }
    }

    while editor.history().in_user_action() {
        editor.end_user_action();
    }
    while editor.history().in_irreversible_action() {
        editor.end_irreversible_action();
    }
    while editor.can_redo() {
        editor.redo();
    }

    // Undo then redo everything must land on the same text.
    let text = editor.text().to_owned();
    let mut steps = 0;
    while editor.can_undo() {
        editor.undo();
        steps += 1;
        assert!(steps <= 10_000, "undo never exhausts");
    }
    while editor.can_redo() {
        editor.redo();
    }
    assert_eq!(editor.text(), text);
    assert_eq!(editor.host().mismatched_deletes(), 0);
});
