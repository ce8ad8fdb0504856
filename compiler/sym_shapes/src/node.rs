//! Expression-backed symbol nodes.

use std::any::Any;
use std::fmt;

use sym_int::{ArithOp, CmpOp, GuardError, GuardLocation, SymNode, SymNodeImpl, SymOp};

use crate::expr::Expr;
use crate::mode;
use crate::ShapeEnv;

/// A symbol node whose value is an [`Expr`] over the symbols of a
/// [`ShapeEnv`].
///
/// Operations build larger expressions. Forcing a node evaluates its
/// expression against the environment's hints and records a guard, except
/// for constants produced by [`wrap`](SymNodeImpl::wrap), which are returned
/// directly.
pub struct ExprNode {
    expr: Expr,
    env: ShapeEnv,
    constant: Option<i64>,
}

impl ExprNode {
    pub(crate) fn new(expr: Expr, env: ShapeEnv, constant: Option<i64>) -> Self {
        ExprNode {
            expr,
            env,
            constant,
        }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn env(&self) -> &ShapeEnv {
        &self.env
    }

    /// The wrapped integer, for nodes produced by `wrap`.
    pub fn constant(&self) -> Option<i64> {
        self.constant
    }

    /// Result of `self op other`, routed through the active dispatch mode.
    ///
    /// # Panics
    ///
    /// Panics if the operands belong to different shape environments.
    pub fn apply(&self, op: SymOp, other: &ExprNode) -> SymNode {
        assert!(
            self.env.ptr_eq(&other.env),
            "cannot combine `{self}` and `{other}`: they belong to different shape environments"
        );
        if let Some(node) = mode::dispatch(op, self, other) {
            return node;
        }
        let expr = Expr::binary(op, self.expr.clone(), other.expr.clone());
        SymNode::new(ExprNode::new(expr, self.env.clone(), None))
    }

    fn binary(&self, op: impl Into<SymOp>, other: &SymNode) -> SymNode {
        let op = op.into();
        match other.downcast_ref::<ExprNode>() {
            Some(other) => self.apply(op, other),
            None => panic!("cannot apply {op} to `{self}` and foreign node `{other}`"),
        }
    }
}

impl SymNodeImpl for ExprNode {
    fn wrap(&self, value: i64) -> SymNode {
        SymNode::new(ExprNode::new(
            Expr::integer(value),
            self.env.clone(),
            Some(value),
        ))
    }

    fn add(&self, other: &SymNode) -> SymNode {
        self.binary(ArithOp::Add, other)
    }

    fn sub(&self, other: &SymNode) -> SymNode {
        self.binary(ArithOp::Sub, other)
    }

    fn mul(&self, other: &SymNode) -> SymNode {
        self.binary(ArithOp::Mul, other)
    }

    fn floordiv(&self, other: &SymNode) -> SymNode {
        self.binary(ArithOp::FloorDiv, other)
    }

    fn modulo(&self, other: &SymNode) -> SymNode {
        self.binary(ArithOp::Mod, other)
    }

    fn sym_eq(&self, other: &SymNode) -> SymNode {
        self.binary(CmpOp::Eq, other)
    }

    fn sym_lt(&self, other: &SymNode) -> SymNode {
        self.binary(CmpOp::Lt, other)
    }

    fn sym_le(&self, other: &SymNode) -> SymNode {
        self.binary(CmpOp::Le, other)
    }

    fn sym_gt(&self, other: &SymNode) -> SymNode {
        self.binary(CmpOp::Gt, other)
    }

    fn sym_ge(&self, other: &SymNode) -> SymNode {
        self.binary(CmpOp::Ge, other)
    }

    fn guard_int(&self, location: &GuardLocation) -> Result<i64, GuardError> {
        if let Some(value) = self.constant {
            return Ok(value);
        }
        self.env.evaluate_expr(&self.expr, location)
    }

    fn bool_(&self, location: &GuardLocation) -> Result<bool, GuardError> {
        self.env.evaluate_bool(&self.expr, location)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.expr, f)
    }
}

impl fmt::Debug for ExprNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprNode({})", self.expr)
    }
}
