//! Shared handles to symbol nodes.
//!
//! A symbol node is an opaque value produced by shape computations whose
//! concrete value may not be known yet. This crate never looks inside one; it
//! only calls the operations of [`SymNodeImpl`]. Nodes are immutable and
//! shared: every operation returns a fresh node.
//!
//! # Ownership
//!
//! [`SymNode`] wraps `Arc<dyn SymNodeImpl>`. Cloning a handle increments the
//! strong count, dropping it decrements the count, and the node is freed when
//! the last handle (in a `SymNode` or a `SymInt`) goes away. Counting is
//! atomic, so handles can be shared across threads.

use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::arith::{ArithOp, CmpOp, SymOp};
use crate::error::GuardError;
use crate::location::GuardLocation;

/// Operations a symbol node implementation must provide.
///
/// Binary operations receive the other operand as a [`SymNode`]. Callers
/// guarantee that both operands come from the same implementation (the
/// concrete side of a mixed operation is produced with [`wrap`](Self::wrap) on
/// the symbolic side); implementations may downcast through
/// [`SymNode::downcast_ref`] and panic on a foreign node.
pub trait SymNodeImpl: fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Produce a node of this implementation holding a concrete integer.
    fn wrap(&self, value: i64) -> SymNode;

    fn add(&self, other: &SymNode) -> SymNode;
    fn sub(&self, other: &SymNode) -> SymNode;
    fn mul(&self, other: &SymNode) -> SymNode;
    /// Floor division.
    fn floordiv(&self, other: &SymNode) -> SymNode;
    /// Floor modulo.
    fn modulo(&self, other: &SymNode) -> SymNode;

    // Boolean-valued results, read back with `bool_`.
    fn sym_eq(&self, other: &SymNode) -> SymNode;
    fn sym_lt(&self, other: &SymNode) -> SymNode;
    fn sym_le(&self, other: &SymNode) -> SymNode;
    fn sym_gt(&self, other: &SymNode) -> SymNode;
    fn sym_ge(&self, other: &SymNode) -> SymNode;

    /// Force an integer-valued node to a concrete value.
    fn guard_int(&self, location: &GuardLocation) -> Result<i64, GuardError>;

    /// Force a boolean-valued node to a concrete value.
    fn bool_(&self, location: &GuardLocation) -> Result<bool, GuardError>;

    /// Upcast for downcasting to the concrete implementation.
    fn as_any(&self) -> &dyn Any;
}

/// Owning, reference-counted handle to a symbol node.
#[repr(transparent)]
pub struct SymNode(Arc<dyn SymNodeImpl>);

impl SymNode {
    /// Allocate a node and return the first handle to it.
    pub fn new<N: SymNodeImpl>(node: N) -> Self {
        SymNode(Arc::new(node))
    }

    /// Adopt an existing shared allocation.
    pub fn from_arc(node: Arc<dyn SymNodeImpl>) -> Self {
        SymNode(node)
    }

    /// Number of live handles to this node.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Whether both handles refer to the same node.
    #[inline]
    pub fn ptr_eq(&self, other: &SymNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Borrow the node as its concrete implementation type.
    pub fn downcast_ref<N: SymNodeImpl>(&self) -> Option<&N> {
        self.0.as_any().downcast_ref::<N>()
    }

    /// Route `op` to the matching node operation.
    pub fn apply(&self, op: SymOp, other: &SymNode) -> SymNode {
        match op {
            SymOp::Arith(op) => self.apply_arith(op, other),
            SymOp::Compare(op) => self.apply_cmp(op, other),
        }
    }

    pub fn apply_arith(&self, op: ArithOp, other: &SymNode) -> SymNode {
        match op {
            ArithOp::Add => self.0.add(other),
            ArithOp::Sub => self.0.sub(other),
            ArithOp::Mul => self.0.mul(other),
            ArithOp::FloorDiv => self.0.floordiv(other),
            ArithOp::Mod => self.0.modulo(other),
        }
    }

    /// Comparison node; force it with [`SymNodeImpl::bool_`].
    pub fn apply_cmp(&self, op: CmpOp, other: &SymNode) -> SymNode {
        match op {
            CmpOp::Eq => self.0.sym_eq(other),
            CmpOp::Lt => self.0.sym_lt(other),
            CmpOp::Le => self.0.sym_le(other),
            CmpOp::Gt => self.0.sym_gt(other),
            CmpOp::Ge => self.0.sym_ge(other),
        }
    }
}

impl Deref for SymNode {
    type Target = dyn SymNodeImpl;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl Clone for SymNode {
    #[inline]
    fn clone(&self) -> Self {
        SymNode(Arc::clone(&self.0))
    }
}

impl fmt::Debug for SymNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for SymNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

#[cfg(all(test, feature = "symbolic"))]
mod tests;
