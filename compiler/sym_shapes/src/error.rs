//! Errors raised by shape environments.
//!
//! Failures to force a symbolic value are [`sym_int::GuardError`]s; this type
//! covers misuse of the environment itself.

/// Shape environment error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("symbol `{name}` already exists in this shape environment")]
    DuplicateSymbol { name: String },

    #[error("symbol `{name}` needs a non-negative size hint, got {hint}")]
    NegativeHint { name: String, hint: i64 },

    #[error("dispatch mode is already active on this thread")]
    ModeAlreadyActive,

    #[error("invalid value `{value}` for {key}: expected one of 1/0, true/false, yes/no, on/off")]
    InvalidConfig { key: &'static str, value: String },
}
