//! Test doubles for node-path testing.
//!
//! `EchoNode` is the simplest possible node implementation: it computes every
//! operation eagerly on concrete values, so the node path can be compared
//! against the concrete fast path. A node built with [`EchoNode::opaque`] has
//! no value and fails every guard.

use std::any::Any;
use std::fmt;

use crate::{ArithOp, CmpOp, GuardError, GuardLocation, SymNode, SymNodeImpl};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Echo {
    Int(i64),
    Bool(bool),
    Unknown,
}

#[derive(Debug)]
pub struct EchoNode {
    value: Echo,
    label: String,
}

impl EchoNode {
    /// A node that resolves to `value`.
    pub fn resolved(value: i64) -> SymNode {
        SymNode::new(EchoNode {
            value: Echo::Int(value),
            label: value.to_string(),
        })
    }

    /// A node with no known value.
    pub fn opaque(label: &str) -> SymNode {
        SymNode::new(EchoNode {
            value: Echo::Unknown,
            label: label.to_string(),
        })
    }

    fn peer(other: &SymNode) -> &EchoNode {
        match other.downcast_ref::<EchoNode>() {
            Some(node) => node,
            None => panic!("EchoNode combined with foreign node {other:?}"),
        }
    }

    fn arith(&self, op: ArithOp, other: &SymNode) -> SymNode {
        let other = Self::peer(other);
        let value = match (self.value, other.value) {
            (Echo::Int(a), Echo::Int(b)) => op.checked_apply(a, b).map_or(Echo::Unknown, Echo::Int),
            _ => Echo::Unknown,
        };
        SymNode::new(EchoNode {
            value,
            label: format!("({} {op} {})", self.label, other.label),
        })
    }

    fn compare(&self, op: CmpOp, other: &SymNode) -> SymNode {
        let other = Self::peer(other);
        let value = match (self.value, other.value) {
            (Echo::Int(a), Echo::Int(b)) => Echo::Bool(op.apply(a, b)),
            _ => Echo::Unknown,
        };
        SymNode::new(EchoNode {
            value,
            label: format!("({} {op} {})", self.label, other.label),
        })
    }
}

impl fmt::Display for EchoNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl SymNodeImpl for EchoNode {
    fn wrap(&self, value: i64) -> SymNode {
        EchoNode::resolved(value)
    }

    fn add(&self, other: &SymNode) -> SymNode {
        self.arith(ArithOp::Add, other)
    }

    fn sub(&self, other: &SymNode) -> SymNode {
        self.arith(ArithOp::Sub, other)
    }

    fn mul(&self, other: &SymNode) -> SymNode {
        self.arith(ArithOp::Mul, other)
    }

    fn floordiv(&self, other: &SymNode) -> SymNode {
        self.arith(ArithOp::FloorDiv, other)
    }

    fn modulo(&self, other: &SymNode) -> SymNode {
        self.arith(ArithOp::Mod, other)
    }

    fn sym_eq(&self, other: &SymNode) -> SymNode {
        self.compare(CmpOp::Eq, other)
    }

    fn sym_lt(&self, other: &SymNode) -> SymNode {
        self.compare(CmpOp::Lt, other)
    }

    fn sym_le(&self, other: &SymNode) -> SymNode {
        self.compare(CmpOp::Le, other)
    }

    fn sym_gt(&self, other: &SymNode) -> SymNode {
        self.compare(CmpOp::Gt, other)
    }

    fn sym_ge(&self, other: &SymNode) -> SymNode {
        self.compare(CmpOp::Ge, other)
    }

    fn guard_int(&self, location: &GuardLocation) -> Result<i64, GuardError> {
        match self.value {
            Echo::Int(value) => Ok(value),
            Echo::Bool(_) => Err(GuardError::KindMismatch {
                expr: self.label.clone(),
                expected: "integer",
                location: *location,
            }),
            Echo::Unknown => Err(GuardError::Unresolved {
                expr: self.label.clone(),
                location: *location,
            }),
        }
    }

    fn bool_(&self, location: &GuardLocation) -> Result<bool, GuardError> {
        match self.value {
            Echo::Bool(value) => Ok(value),
            Echo::Int(_) => Err(GuardError::KindMismatch {
                expr: self.label.clone(),
                expected: "boolean",
                location: *location,
            }),
            Echo::Unknown => Err(GuardError::Unresolved {
                expr: self.label.clone(),
                location: *location,
            }),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
