//! Representation for builds without symbol nodes.
//!
//! The API matches the full build so call sites compile unchanged, but
//! `is_symbolic` is constantly `false` and every entry point that would create
//! or consume a node panics. Those entry points are unreachable unless the
//! build configuration is wrong.

use crate::node::SymNode;

/// A shape integer. In this build it is always concrete.
#[derive(Clone)]
pub struct SymInt(i64);

#[cold]
#[track_caller]
fn unavailable(operation: &str) -> ! {
    panic!("{operation}: symbolic integers are not available in this build")
}

impl SymInt {
    #[inline]
    pub const fn from_int(value: i64) -> Self {
        SymInt(value)
    }

    /// # Panics
    ///
    /// Always.
    #[track_caller]
    pub fn from_node(node: SymNode) -> Self {
        drop(node);
        unavailable("from_node")
    }

    #[inline]
    pub const fn is_symbolic(&self) -> bool {
        false
    }

    #[inline]
    pub const fn maybe_as_int(&self) -> Option<i64> {
        Some(self.0)
    }

    #[inline]
    pub const fn as_int_unchecked(&self) -> i64 {
        self.0
    }

    /// # Panics
    ///
    /// Always.
    #[track_caller]
    pub fn to_node(&self) -> SymNode {
        unavailable("to_node")
    }

    /// # Panics
    ///
    /// Always.
    #[track_caller]
    pub fn into_node(self) -> SymNode {
        unavailable("into_node")
    }
}

#[track_caller]
pub(super) fn normalize(_a: &SymInt, _b: &SymInt) -> (SymNode, SymNode) {
    unavailable("normalize")
}
