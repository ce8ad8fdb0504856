//! Failures surfaced when a symbolic value is forced to a concrete one.
//!
//! Precondition violations (asking a concrete scalar for its node, reading a
//! symbolic scalar as an integer) are programmer errors and panic instead.

use crate::arith::ArithError;
use crate::location::GuardLocation;

/// A symbolic value could not be resolved at a guard.
///
/// Every variant carries the [`GuardLocation`] that requested the value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum GuardError {
    /// The node has no known value at this point in execution.
    #[error("{location}: cannot resolve `{expr}` to a concrete value")]
    Unresolved {
        expr: String,
        location: GuardLocation,
    },

    /// A free symbol in the expression has no concrete hint.
    #[error("{location}: symbol `{name}` has no concrete hint")]
    UnboundSymbol {
        name: String,
        location: GuardLocation,
    },

    /// Concrete evaluation of the expression failed.
    #[error("{location}: {error} while evaluating `{expr}`")]
    Arith {
        expr: String,
        #[source]
        error: ArithError,
        location: GuardLocation,
    },

    /// A boolean was demanded from an integer-valued node, or vice versa.
    #[error("{location}: `{expr}` is not {expected}-valued")]
    KindMismatch {
        expr: String,
        expected: &'static str,
        location: GuardLocation,
    },
}

impl GuardError {
    /// The call site that requested the value.
    pub fn location(&self) -> GuardLocation {
        match self {
            GuardError::Unresolved { location, .. }
            | GuardError::UnboundSymbol { location, .. }
            | GuardError::Arith { location, .. }
            | GuardError::KindMismatch { location, .. } => *location,
        }
    }
}
