//! Stack growth for recursive expression walks.
//!
//! Shape expressions are trees built one operation at a time, so a long
//! accumulation (`numel` over many dimensions, a loop of `+=`) produces a
//! deep left spine. Walks that recurse along it go through
//! [`ensure_sufficient_stack`]; `Expr`'s drop is iterative instead.
//!
//! - **Native targets**: `stacker` grows the stack when less than
//!   [`RED_ZONE`] remains.
//! - **WASM targets**: passthrough; the engine manages its own stack.

/// Remaining stack below which a new segment is allocated (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment (1MB).
const SEGMENT_SIZE: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
