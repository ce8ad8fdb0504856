//! Source provenance for guards.

use std::fmt;
use std::panic::Location;

/// The call site that forced a symbolic value to become concrete.
///
/// Carried through `guard_int` so that a recorded guard (or a failure to
/// resolve one) can be traced back to the code that demanded it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GuardLocation {
    pub file: &'static str,
    pub line: u32,
}

impl GuardLocation {
    #[inline]
    pub const fn new(file: &'static str, line: u32) -> Self {
        GuardLocation { file, line }
    }

    /// The location of the caller, propagated through `#[track_caller]` frames.
    #[inline]
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        GuardLocation {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for GuardLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
