//! Operator vocabulary shared by the concrete fast path and node implementations.
//!
//! `/` and `%` on shape integers use **floor** semantics, so the concrete path
//! and any node-level `floordiv`/`mod` must agree on every input. The helpers
//! here are the single source of that arithmetic.

use std::fmt;

/// Arithmetic failure on concrete operands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArithError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {0}")]
    Overflow(&'static str),
}

/// Integer-valued binary operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    /// Division rounding towards negative infinity.
    FloorDiv,
    /// Remainder whose sign follows the divisor.
    Mod,
}

impl ArithOp {
    /// Human-readable operation name, used in overflow messages.
    pub const fn name(self) -> &'static str {
        match self {
            ArithOp::Add => "addition",
            ArithOp::Sub => "subtraction",
            ArithOp::Mul => "multiplication",
            ArithOp::FloorDiv => "floor division",
            ArithOp::Mod => "modulo",
        }
    }

    /// Apply the operation to concrete operands.
    pub fn checked_apply(self, a: i64, b: i64) -> Result<i64, ArithError> {
        let overflow = ArithError::Overflow(self.name());
        match self {
            ArithOp::Add => a.checked_add(b).ok_or(overflow),
            ArithOp::Sub => a.checked_sub(b).ok_or(overflow),
            ArithOp::Mul => a.checked_mul(b).ok_or(overflow),
            ArithOp::FloorDiv => checked_floor_div(a, b),
            ArithOp::Mod => checked_floor_mod(a, b),
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::FloorDiv => "//",
            ArithOp::Mod => "%",
        })
    }
}

/// Boolean-valued comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    /// Apply the comparison to concrete operands.
    pub const fn apply(self, a: i64, b: i64) -> bool {
        match self {
            CmpOp::Eq => a == b,
            CmpOp::Lt => a < b,
            CmpOp::Le => a <= b,
            CmpOp::Gt => a > b,
            CmpOp::Ge => a >= b,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CmpOp::Eq => "==",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
        })
    }
}

static_assert_size!(ArithOp, 1);
static_assert_size!(CmpOp, 1);

/// Any operation a node can be asked to perform on a second node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymOp {
    Arith(ArithOp),
    Compare(CmpOp),
}

impl fmt::Display for SymOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymOp::Arith(op) => op.fmt(f),
            SymOp::Compare(op) => op.fmt(f),
        }
    }
}

impl From<ArithOp> for SymOp {
    fn from(op: ArithOp) -> Self {
        SymOp::Arith(op)
    }
}

impl From<CmpOp> for SymOp {
    fn from(op: CmpOp) -> Self {
        SymOp::Compare(op)
    }
}

/// Floor division: rounds towards negative infinity.
///
/// - `checked_floor_div(7, 2)` = `Ok(3)`
/// - `checked_floor_div(-7, 2)` = `Ok(-4)` (truncation would give -3)
pub fn checked_floor_div(a: i64, b: i64) -> Result<i64, ArithError> {
    if b == 0 {
        return Err(ArithError::DivisionByZero);
    }
    let overflow = ArithError::Overflow(ArithOp::FloorDiv.name());
    let div = a.checked_div(b).ok_or(overflow)?;
    let rem = a.checked_rem(b).ok_or(overflow)?;
    if rem != 0 && (a < 0) != (b < 0) {
        div.checked_sub(1).ok_or(overflow)
    } else {
        Ok(div)
    }
}

/// Floor modulo: the result takes the sign of the divisor.
///
/// Satisfies `a == b * floor_div(a, b) + floor_mod(a, b)` whenever the
/// division does not overflow.
pub fn checked_floor_mod(a: i64, b: i64) -> Result<i64, ArithError> {
    if b == 0 {
        return Err(ArithError::ModuloByZero);
    }
    // `i64::MIN % -1` overflows in hardware but is mathematically zero.
    if b == -1 {
        return Ok(0);
    }
    let rem = a % b;
    if rem != 0 && (rem < 0) != (b < 0) {
        Ok(rem + b)
    } else {
        Ok(rem)
    }
}
