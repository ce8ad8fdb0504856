//! The symbolic scalar and its dispatch protocol.
//!
//! # Representation
//!
//! Two interchangeable representations are selected at compile time:
//!
//! - `full` (feature `symbolic`): a tagged sum of `Concrete(i64)` and
//!   `Symbolic(SymNode)`.
//! - `restricted`: a plain `i64`. `is_symbolic` is a constant `false`, so the
//!   optimizer removes every slow path, and the node entry points panic.
//!
//! Everything in this module is written against the shared surface
//! (`from_int`, `is_symbolic`, `as_int_unchecked`, `to_node`, `normalize`) and
//! compiles unchanged against either representation.
//!
//! # Protocol
//!
//! Every binary operation follows the same shape:
//!
//! 1. Both operands concrete: compute directly. `/` and `%` use floor
//!    semantics; overflow and division by zero panic like the built-in
//!    integer operators.
//! 2. Otherwise normalize: a concrete operand is wrapped by the symbolic
//!    operand's node.
//! 3. Delegate to the node operation. Arithmetic results are wrapped back into
//!    a scalar; comparison results are forced with `bool_`.

#[cfg(feature = "symbolic")]
mod full;
#[cfg(not(feature = "symbolic"))]
mod restricted;

mod ops;

#[cfg(feature = "symbolic")]
use full::normalize;
#[cfg(feature = "symbolic")]
pub use full::SymInt;
#[cfg(not(feature = "symbolic"))]
use restricted::normalize;
#[cfg(not(feature = "symbolic"))]
pub use restricted::SymInt;

use std::fmt;

use tracing::{debug, trace};

use crate::arith::{ArithOp, CmpOp};
use crate::error::GuardError;
use crate::location::GuardLocation;
use crate::node::SymNode;

#[cfg(not(feature = "symbolic"))]
static_assert_size!(SymInt, 8);

impl SymInt {
    /// Smallest concrete value.
    pub const MIN_CONCRETE: i64 = i64::MIN;

    /// Largest concrete value.
    pub const MAX_CONCRETE: i64 = i64::MAX;

    /// Force the scalar to a concrete value, recording the caller's location.
    ///
    /// Concrete scalars return immediately. Symbolic scalars ask their node,
    /// which may record a guard or fail if the value is not known yet.
    #[track_caller]
    pub fn guard_int(&self) -> Result<i64, GuardError> {
        self.guard_int_at(GuardLocation::caller())
    }

    /// [`guard_int`](Self::guard_int) with an explicit location.
    pub fn guard_int_at(&self, location: GuardLocation) -> Result<i64, GuardError> {
        if !self.is_symbolic() {
            return Ok(self.as_int_unchecked());
        }
        let node = self.to_node();
        debug!(file = location.file, line = location.line, node = %node, "guarding symbolic int");
        node.guard_int(&location)
    }

    /// Apply an arithmetic operation through the dispatch protocol.
    ///
    /// # Panics
    ///
    /// Panics on overflow or division by zero between concrete operands.
    #[track_caller]
    pub fn apply_arith(&self, op: ArithOp, rhs: &SymInt) -> SymInt {
        if !self.is_symbolic() && !rhs.is_symbolic() {
            let a = self.as_int_unchecked();
            let b = rhs.as_int_unchecked();
            return match op.checked_apply(a, b) {
                Ok(value) => SymInt::from_int(value),
                Err(err) => panic!("{err}: {a} {op} {b}"),
            };
        }
        let (lhs, rhs) = normalize(self, rhs);
        trace!(%op, %lhs, %rhs, "symbolic arithmetic");
        SymInt::from_node(lhs.apply_arith(op, &rhs))
    }

    /// Apply a comparison through the dispatch protocol, attributing any guard
    /// to `location`.
    pub fn apply_cmp_at(
        &self,
        op: CmpOp,
        rhs: &SymInt,
        location: GuardLocation,
    ) -> Result<bool, GuardError> {
        if !self.is_symbolic() && !rhs.is_symbolic() {
            return Ok(op.apply(self.as_int_unchecked(), rhs.as_int_unchecked()));
        }
        let (lhs, rhs) = normalize(self, rhs);
        trace!(%op, %lhs, %rhs, "symbolic comparison");
        lhs.apply_cmp(op, &rhs).bool_(&location)
    }

    /// `self == rhs`, or the guard error if a symbolic side cannot be resolved.
    #[track_caller]
    pub fn try_eq(&self, rhs: &SymInt) -> Result<bool, GuardError> {
        self.apply_cmp_at(CmpOp::Eq, rhs, GuardLocation::caller())
    }

    /// `self != rhs`. Symbolic operands record an `==` guard and negate it.
    #[track_caller]
    pub fn try_ne(&self, rhs: &SymInt) -> Result<bool, GuardError> {
        self.try_eq(rhs).map(|eq| !eq)
    }

    /// `self < rhs`, or the guard error.
    #[track_caller]
    pub fn try_lt(&self, rhs: &SymInt) -> Result<bool, GuardError> {
        self.apply_cmp_at(CmpOp::Lt, rhs, GuardLocation::caller())
    }

    /// `self <= rhs`, or the guard error.
    #[track_caller]
    pub fn try_le(&self, rhs: &SymInt) -> Result<bool, GuardError> {
        self.apply_cmp_at(CmpOp::Le, rhs, GuardLocation::caller())
    }

    /// `self > rhs`, or the guard error.
    #[track_caller]
    pub fn try_gt(&self, rhs: &SymInt) -> Result<bool, GuardError> {
        self.apply_cmp_at(CmpOp::Gt, rhs, GuardLocation::caller())
    }

    /// `self >= rhs`, or the guard error.
    #[track_caller]
    pub fn try_ge(&self, rhs: &SymInt) -> Result<bool, GuardError> {
        self.apply_cmp_at(CmpOp::Ge, rhs, GuardLocation::caller())
    }

    /// Comparison for the operator traits, which cannot return errors.
    #[track_caller]
    fn compare_or_panic(&self, op: CmpOp, rhs: &SymInt) -> bool {
        match self.apply_cmp_at(op, rhs, GuardLocation::caller()) {
            Ok(result) => result,
            Err(err) => panic!("{err}"),
        }
    }

    /// A temporary handle to the backing node, if any.
    fn node_for_display(&self) -> Option<SymNode> {
        self.is_symbolic().then(|| self.to_node())
    }
}

impl Default for SymInt {
    #[inline]
    fn default() -> Self {
        SymInt::from_int(0)
    }
}

impl From<i64> for SymInt {
    #[inline]
    fn from(value: i64) -> Self {
        SymInt::from_int(value)
    }
}

impl From<SymNode> for SymInt {
    #[inline]
    fn from(node: SymNode) -> Self {
        SymInt::from_node(node)
    }
}

impl fmt::Display for SymInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node_for_display() {
            Some(node) => write!(f, "{node}"),
            None => write!(f, "{}", self.as_int_unchecked()),
        }
    }
}

impl fmt::Debug for SymInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node_for_display() {
            Some(node) => write!(f, "SymInt({node})"),
            None => write!(f, "SymInt({})", self.as_int_unchecked()),
        }
    }
}
