#![forbid(unsafe_code)]

//! Undo/redo history for editable text.
//!
//! A [`TextHistory`] sits next to a text buffer. The buffer reports every
//! insertion, deletion and caret move; the history records them, folds
//! keystrokes into word-sized steps, and replays steps backward or forward
//! through the [`HistoryHost`] callbacks when asked to undo or redo.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  text_inserted / text_deleted  ┌────────────────────┐
//! │              │  selection_changed             │    TextHistory     │
//! │    Buffer    │ ─────────────────────────────► │  ┌──────────────┐  │
//! │ (HistoryHost)│                                │  │ Undo: [A][B] │  │
//! │              │ ◄───────────────────────────── │  │ Redo: [C]    │  │
//! └──────────────┘  insert / delete / select      │  └──────────────┘  │
//!                   change_state                  └────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use texthist::{HistoryHost, TextHistory};
//!
//! #[derive(Default)]
//! struct Buffer(String);
//!
//! impl HistoryHost for Buffer {
//!     fn change_state(&mut self, _: bool, _: bool, _: bool) {}
//!     fn insert(&mut self, begin: usize, _end: usize, text: &str) {
//!         self.0.insert_str(begin, text);
//!     }
//!     fn delete(&mut self, begin: usize, end: usize, _expected: &str) {
//!         self.0.replace_range(begin..end, "");
//!     }
//!     fn select(&mut self, _: usize, _: Option<usize>) {}
//! }
//!
//! let mut history = TextHistory::new(Buffer::default());
//!
//! history.host_mut().0.push_str("hello");
//! history.text_inserted(0, "hello");
//! assert!(history.can_undo());
//!
//! history.undo();
//! assert_eq!(history.host().0, "");
//!
//! history.redo();
//! assert_eq!(history.host().0, "hello");
//! ```
//!
//! # Feature flags
//!
//! - `history-config`: load [`HistoryConfig`] from TOML or JSON.

pub mod action;
pub mod coalesce;
pub mod config;
pub mod error;
pub mod history;
pub mod host;
pub mod span;

pub use action::{Action, ActionKind, DeleteKind};
pub use coalesce::try_merge;
pub use config::{HistoryConfig, MergeConfig};
pub use error::{ConfigError, UsageError};
pub use history::TextHistory;
pub use host::{HistoryHost, Selection};
pub use span::TextSpan;
