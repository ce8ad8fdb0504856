//! Shape expressions.
//!
//! An [`Expr`] is an immutable, reference-counted tree of integer literals,
//! symbols, arithmetic, and comparisons. Trees are only ever built and
//! evaluated by substitution; there is no simplification.
//!
//! Comparisons are boolean-valued. They may appear only at the root of a
//! guard, never as an arithmetic operand.

use std::fmt;
use std::mem;
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;
use sym_int::{ArithError, ArithOp, CmpOp, SymOp};

use crate::stack::ensure_sufficient_stack;

/// A named size variable, compared by name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Self {
        Symbol(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Concrete values for symbols.
pub type Bindings = FxHashMap<Symbol, i64>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    Integer(i64),
    Symbol(Symbol),
    Arith { op: ArithOp, lhs: Expr, rhs: Expr },
    Compare { op: CmpOp, lhs: Expr, rhs: Expr },
}

/// Shared handle to an expression tree.
///
/// Equality and drop are iterative or stack-guarded, so trees with a long
/// spine can be compared and released like shallow ones.
#[derive(Clone, Eq)]
pub struct Expr(Arc<ExprKind>);

/// Result of evaluating an expression.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Evaluated {
    Int(i64),
    Bool(bool),
}

/// Why an expression could not be evaluated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("symbol `{0}` is unbound")]
    Unbound(Symbol),
    #[error(transparent)]
    Arith(#[from] ArithError),
    #[error("comparison used as an integer operand")]
    BooleanOperand,
}

impl Expr {
    pub fn integer(value: i64) -> Self {
        Expr(Arc::new(ExprKind::Integer(value)))
    }

    pub fn symbol(symbol: Symbol) -> Self {
        Expr(Arc::new(ExprKind::Symbol(symbol)))
    }

    pub fn arith(op: ArithOp, lhs: Expr, rhs: Expr) -> Self {
        Expr(Arc::new(ExprKind::Arith { op, lhs, rhs }))
    }

    pub fn compare(op: CmpOp, lhs: Expr, rhs: Expr) -> Self {
        Expr(Arc::new(ExprKind::Compare { op, lhs, rhs }))
    }

    /// Build the expression for `lhs op rhs`.
    pub fn binary(op: SymOp, lhs: Expr, rhs: Expr) -> Self {
        match op {
            SymOp::Arith(op) => Expr::arith(op, lhs, rhs),
            SymOp::Compare(op) => Expr::compare(op, lhs, rhs),
        }
    }

    #[inline]
    pub fn kind(&self) -> &ExprKind {
        &self.0
    }

    /// Literal value, if this is an integer leaf.
    pub fn as_integer(&self) -> Option<i64> {
        match *self.0 {
            ExprKind::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// Whether the root is a comparison.
    pub fn is_boolean(&self) -> bool {
        matches!(*self.0, ExprKind::Compare { .. })
    }

    /// Distinct symbols, in first-occurrence order (left to right).
    pub fn free_symbols(&self) -> Vec<Symbol> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut Vec<Symbol>) {
        ensure_sufficient_stack(|| match &*self.0 {
            ExprKind::Integer(_) => {}
            ExprKind::Symbol(symbol) => {
                if !out.contains(symbol) {
                    out.push(symbol.clone());
                }
            }
            ExprKind::Arith { lhs, rhs, .. } | ExprKind::Compare { lhs, rhs, .. } => {
                lhs.collect_symbols(out);
                rhs.collect_symbols(out);
            }
        });
    }

    /// Substitute `bindings` and evaluate.
    pub fn eval(&self, bindings: &Bindings) -> Result<Evaluated, EvalError> {
        match &*self.0 {
            ExprKind::Compare { op, lhs, rhs } => {
                let a = lhs.eval_int(bindings)?;
                let b = rhs.eval_int(bindings)?;
                Ok(Evaluated::Bool(op.apply(a, b)))
            }
            _ => self.eval_int(bindings).map(Evaluated::Int),
        }
    }

    /// Evaluate an integer-valued expression.
    pub fn eval_int(&self, bindings: &Bindings) -> Result<i64, EvalError> {
        ensure_sufficient_stack(|| match &*self.0 {
            ExprKind::Integer(value) => Ok(*value),
            ExprKind::Symbol(symbol) => bindings
                .get(symbol)
                .copied()
                .ok_or_else(|| EvalError::Unbound(symbol.clone())),
            ExprKind::Arith { op, lhs, rhs } => {
                let a = lhs.eval_int(bindings)?;
                let b = rhs.eval_int(bindings)?;
                Ok(op.checked_apply(a, b)?)
            }
            ExprKind::Compare { .. } => Err(EvalError::BooleanOperand),
        })
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match &*self.0 {
            ExprKind::Integer(value) => write!(f, "{value}"),
            ExprKind::Symbol(symbol) => write!(f, "{symbol}"),
            ExprKind::Arith {
                op: ArithOp::FloorDiv,
                lhs,
                rhs,
            } => {
                f.write_str("floor(")?;
                lhs.fmt_tree(f)?;
                f.write_str(" / ")?;
                rhs.fmt_tree(f)?;
                f.write_str(")")
            }
            ExprKind::Arith { op, lhs, rhs } => {
                f.write_str("(")?;
                lhs.fmt_tree(f)?;
                write!(f, " {op} ")?;
                rhs.fmt_tree(f)?;
                f.write_str(")")
            }
            ExprKind::Compare { op, lhs, rhs } => {
                f.write_str("(")?;
                lhs.fmt_tree(f)?;
                write!(f, " {op} ")?;
                rhs.fmt_tree(f)?;
                f.write_str(")")
            }
        })
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Expr) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || ensure_sufficient_stack(|| *self.0 == *other.0)
    }
}

/// Placeholder swapped into a handle while its subtree is being released.
fn detached_leaf() -> Arc<ExprKind> {
    static LEAF: OnceLock<Arc<ExprKind>> = OnceLock::new();
    Arc::clone(LEAF.get_or_init(|| Arc::new(ExprKind::Integer(0))))
}

impl Drop for Expr {
    fn drop(&mut self) {
        if !matches!(*self.0, ExprKind::Arith { .. } | ExprKind::Compare { .. }) {
            return;
        }
        // Unlink uniquely owned subtrees onto a worklist; the handles left
        // behind point at the leaf, so their own drops stop immediately.
        let mut pending = vec![mem::replace(&mut self.0, detached_leaf())];
        while let Some(node) = pending.pop() {
            if let Some(
                ExprKind::Arith {
                    mut lhs, mut rhs, ..
                }
                | ExprKind::Compare {
                    mut lhs, mut rhs, ..
                },
            ) = Arc::into_inner(node)
            {
                pending.push(mem::replace(&mut lhs.0, detached_leaf()));
                pending.push(mem::replace(&mut rhs.0, detached_leaf()));
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({self})")
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::integer(value)
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self {
        Expr::symbol(symbol)
    }
}
