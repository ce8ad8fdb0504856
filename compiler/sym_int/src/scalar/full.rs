//! Representation used when symbol nodes are available.

use crate::node::SymNode;

#[derive(Clone)]
enum Repr {
    Concrete(i64),
    Symbolic(SymNode),
}

/// A shape integer that is either concrete or backed by a symbol node.
///
/// The symbolic variant owns one strong reference to its node: cloning the
/// scalar clones the handle, dropping it releases the handle. There is no way
/// to read the node out of a scalar without going through [`SymInt::to_node`]
/// or [`SymInt::into_node`], both of which keep the count consistent.
#[derive(Clone)]
pub struct SymInt(Repr);

impl SymInt {
    /// Wrap a concrete integer. The full `i64` range is representable.
    #[inline]
    pub const fn from_int(value: i64) -> Self {
        SymInt(Repr::Concrete(value))
    }

    /// Wrap a node, taking over the handle's reference.
    #[inline]
    pub fn from_node(node: SymNode) -> Self {
        SymInt(Repr::Symbolic(node))
    }

    #[inline]
    pub const fn is_symbolic(&self) -> bool {
        matches!(self.0, Repr::Symbolic(_))
    }

    /// The concrete value, or `None` for a symbolic scalar.
    #[inline]
    pub const fn maybe_as_int(&self) -> Option<i64> {
        match self.0 {
            Repr::Concrete(value) => Some(value),
            Repr::Symbolic(_) => None,
        }
    }

    /// The concrete value of a scalar already known to be concrete.
    ///
    /// # Panics
    ///
    /// Panics if the scalar is symbolic.
    #[inline]
    #[track_caller]
    pub fn as_int_unchecked(&self) -> i64 {
        match &self.0 {
            Repr::Concrete(value) => *value,
            Repr::Symbolic(node) => {
                panic!("as_int_unchecked called on symbolic scalar `{node}`")
            }
        }
    }

    /// A new handle to the backing node. The scalar keeps its own.
    ///
    /// # Panics
    ///
    /// Panics if the scalar is concrete.
    #[track_caller]
    pub fn to_node(&self) -> SymNode {
        match &self.0 {
            Repr::Symbolic(node) => node.clone(),
            Repr::Concrete(value) => panic!("to_node called on concrete scalar {value}"),
        }
    }

    /// Unwrap the backing node, handing the scalar's reference to the caller.
    ///
    /// # Panics
    ///
    /// Panics if the scalar is concrete.
    #[track_caller]
    pub fn into_node(self) -> SymNode {
        match self.0 {
            Repr::Symbolic(node) => node,
            Repr::Concrete(value) => panic!("into_node called on concrete scalar {value}"),
        }
    }
}

/// Bring both operands into node form for the slow path.
///
/// A concrete operand is wrapped by the symbolic operand's node, so both
/// results come from the same node implementation.
#[track_caller]
pub(super) fn normalize(a: &SymInt, b: &SymInt) -> (SymNode, SymNode) {
    match (&a.0, &b.0) {
        (Repr::Symbolic(x), Repr::Symbolic(y)) => (x.clone(), y.clone()),
        (Repr::Symbolic(x), Repr::Concrete(value)) => (x.clone(), x.wrap(*value)),
        (Repr::Concrete(value), Repr::Symbolic(y)) => (y.wrap(*value), y.clone()),
        (Repr::Concrete(_), Repr::Concrete(_)) => {
            panic!("normalize requires at least one symbolic operand")
        }
    }
}
