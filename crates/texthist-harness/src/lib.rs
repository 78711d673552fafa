#![forbid(unsafe_code)]

//! Reference host and scripted editor for `texthist`.
//!
//! - [`PlainTextHost`]: an in-memory buffer implementing
//!   [`HistoryHost`](texthist::HistoryHost)
//! - [`Editor`]: drives a history the way an entry widget reports edits
//! - [`run_script`]: table-driven checks over [`Step`]s

pub mod buffer;
pub mod editor;
pub mod script;

pub use buffer::PlainTextHost;
pub use editor::Editor;
pub use script::{Op, ScriptError, Step, check_consistency, run_script};
