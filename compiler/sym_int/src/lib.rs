//! Symbolic integer scalars for shape computation.
//!
//! A [`SymInt`] is a size, stride, or offset that is either a concrete `i64`
//! or an owning handle to a symbol node whose value is only known later (for
//! example while tracing). Callers write ordinary arithmetic and comparisons
//! and the scalar routes each operation to the right implementation:
//!
//! ```text
//! let n = SymInt::from_int(6) + SymInt::from_int(4);  // concrete, 10
//! let m = sym_batch * 3;                              // symbolic, via node `wrap` + `mul`
//! let rows = m.guard_int()?;                          // forces a concrete value
//! ```
//!
//! # Crate layout
//!
//! - [`SymInt`]: the scalar and its operator protocol
//! - [`SymNode`], [`SymNodeImpl`]: the shared node handle and the contract a
//!   node implementation fulfils
//! - [`ArithOp`], [`CmpOp`], [`SymOp`]: operation vocabulary with floor
//!   division semantics
//! - [`GuardError`], [`GuardLocation`]: failures when forcing a node
//!
//! # Features
//!
//! - `symbolic` (default): scalars may hold nodes. Without it, scalars are
//!   always concrete and node entry points panic.

/// Compile-time assertion that a type has a specific size.
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arith;
mod error;
mod location;
mod node;
mod scalar;

#[cfg(all(test, feature = "symbolic"))]
mod test_helpers;

pub use arith::{checked_floor_div, checked_floor_mod, ArithError, ArithOp, CmpOp, SymOp};
pub use error::GuardError;
pub use location::GuardLocation;
pub use node::{SymNode, SymNodeImpl};
pub use scalar::SymInt;
