#![forbid(unsafe_code)]

//! Error types.
//!
//! History operations never fail from the caller's point of view: misuse
//! is reported as a [`UsageError`], logged, and otherwise ignored.
//! Loading a configuration is the only fallible public path.

use thiserror::Error;

/// Misuse of the transaction API. Logged at `warn` and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("end_user_action called without a matching begin_user_action")]
    UnmatchedEndUserAction,
    #[error("cannot begin an irreversible action while in a user action")]
    IrreversibleInUserAction,
    #[error("cannot end an irreversible action while in a user action")]
    EndIrreversibleInUserAction,
    #[error("end_irreversible_action called while not in an irreversible action")]
    UnmatchedEndIrreversibleAction,
}

/// Errors that can occur when loading a history configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "history-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "history-config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// The parsed values are out of range.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_display() {
        let msg = UsageError::UnmatchedEndUserAction.to_string();
        assert!(msg.contains("end_user_action"));
    }

    #[test]
    fn test_validation_error_joins_messages() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
    }
}
