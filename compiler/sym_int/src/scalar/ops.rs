//! Operator trait implementations.
//!
//! Every operator funnels into [`SymInt::apply_arith`] or the comparison
//! protocol. `i64` operands are wrapped with [`SymInt::from_int`] first.

use std::cmp::Ordering;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Sub, SubAssign};

use super::SymInt;
use crate::arith::{ArithOp, CmpOp};

/// Implement one arithmetic operator for every owned/borrowed operand pairing
/// plus `i64` on either side.
macro_rules! impl_arith_op {
    ($($trait:ident :: $method:ident => $op:expr),* $(,)?) => { $(
        impl $trait<&SymInt> for &SymInt {
            type Output = SymInt;

            #[track_caller]
            fn $method(self, rhs: &SymInt) -> SymInt {
                self.apply_arith($op, rhs)
            }
        }

        impl $trait<SymInt> for &SymInt {
            type Output = SymInt;

            #[track_caller]
            fn $method(self, rhs: SymInt) -> SymInt {
                self.apply_arith($op, &rhs)
            }
        }

        impl $trait<&SymInt> for SymInt {
            type Output = SymInt;

            #[track_caller]
            fn $method(self, rhs: &SymInt) -> SymInt {
                self.apply_arith($op, rhs)
            }
        }

        impl $trait<SymInt> for SymInt {
            type Output = SymInt;

            #[track_caller]
            fn $method(self, rhs: SymInt) -> SymInt {
                self.apply_arith($op, &rhs)
            }
        }

        impl $trait<i64> for &SymInt {
            type Output = SymInt;

            #[track_caller]
            fn $method(self, rhs: i64) -> SymInt {
                self.apply_arith($op, &SymInt::from_int(rhs))
            }
        }

        impl $trait<i64> for SymInt {
            type Output = SymInt;

            #[track_caller]
            fn $method(self, rhs: i64) -> SymInt {
                self.apply_arith($op, &SymInt::from_int(rhs))
            }
        }

        impl $trait<&SymInt> for i64 {
            type Output = SymInt;

            #[track_caller]
            fn $method(self, rhs: &SymInt) -> SymInt {
                SymInt::from_int(self).apply_arith($op, rhs)
            }
        }

        impl $trait<SymInt> for i64 {
            type Output = SymInt;

            #[track_caller]
            fn $method(self, rhs: SymInt) -> SymInt {
                SymInt::from_int(self).apply_arith($op, &rhs)
            }
        }
    )* };
}

impl_arith_op!(
    Add::add => ArithOp::Add,
    Sub::sub => ArithOp::Sub,
    Mul::mul => ArithOp::Mul,
    Div::div => ArithOp::FloorDiv,
    Rem::rem => ArithOp::Mod,
);

macro_rules! impl_assign_op {
    ($($trait:ident :: $method:ident => $op:expr),* $(,)?) => { $(
        impl $trait<&SymInt> for SymInt {
            #[track_caller]
            fn $method(&mut self, rhs: &SymInt) {
                *self = self.apply_arith($op, rhs);
            }
        }

        impl $trait<SymInt> for SymInt {
            #[track_caller]
            fn $method(&mut self, rhs: SymInt) {
                *self = self.apply_arith($op, &rhs);
            }
        }

        impl $trait<i64> for SymInt {
            #[track_caller]
            fn $method(&mut self, rhs: i64) {
                *self = self.apply_arith($op, &SymInt::from_int(rhs));
            }
        }
    )* };
}

impl_assign_op!(
    AddAssign::add_assign => ArithOp::Add,
    SubAssign::sub_assign => ArithOp::Sub,
    MulAssign::mul_assign => ArithOp::Mul,
    DivAssign::div_assign => ArithOp::FloorDiv,
    RemAssign::rem_assign => ArithOp::Mod,
);

// Comparisons. A symbolic comparison that cannot be resolved panics; use the
// `try_*` methods to observe the error instead.

impl PartialEq for SymInt {
    #[track_caller]
    fn eq(&self, other: &SymInt) -> bool {
        self.compare_or_panic(CmpOp::Eq, other)
    }
}

impl PartialEq<i64> for SymInt {
    #[track_caller]
    fn eq(&self, other: &i64) -> bool {
        self.compare_or_panic(CmpOp::Eq, &SymInt::from_int(*other))
    }
}

impl PartialOrd for SymInt {
    #[track_caller]
    fn partial_cmp(&self, other: &SymInt) -> Option<Ordering> {
        if let (Some(a), Some(b)) = (self.maybe_as_int(), other.maybe_as_int()) {
            return Some(a.cmp(&b));
        }
        if self.compare_or_panic(CmpOp::Lt, other) {
            Some(Ordering::Less)
        } else if self.compare_or_panic(CmpOp::Eq, other) {
            Some(Ordering::Equal)
        } else {
            Some(Ordering::Greater)
        }
    }

    #[track_caller]
    fn lt(&self, other: &SymInt) -> bool {
        self.compare_or_panic(CmpOp::Lt, other)
    }

    #[track_caller]
    fn le(&self, other: &SymInt) -> bool {
        self.compare_or_panic(CmpOp::Le, other)
    }

    #[track_caller]
    fn gt(&self, other: &SymInt) -> bool {
        self.compare_or_panic(CmpOp::Gt, other)
    }

    #[track_caller]
    fn ge(&self, other: &SymInt) -> bool {
        self.compare_or_panic(CmpOp::Ge, other)
    }
}

impl PartialOrd<i64> for SymInt {
    #[track_caller]
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.partial_cmp(&SymInt::from_int(*other))
    }

    #[track_caller]
    fn lt(&self, other: &i64) -> bool {
        self.compare_or_panic(CmpOp::Lt, &SymInt::from_int(*other))
    }

    #[track_caller]
    fn le(&self, other: &i64) -> bool {
        self.compare_or_panic(CmpOp::Le, &SymInt::from_int(*other))
    }

    #[track_caller]
    fn gt(&self, other: &i64) -> bool {
        self.compare_or_panic(CmpOp::Gt, &SymInt::from_int(*other))
    }

    #[track_caller]
    fn ge(&self, other: &i64) -> bool {
        self.compare_or_panic(CmpOp::Ge, &SymInt::from_int(*other))
    }
}

impl PartialEq<SymInt> for i64 {
    #[track_caller]
    fn eq(&self, other: &SymInt) -> bool {
        SymInt::from_int(*self).compare_or_panic(CmpOp::Eq, other)
    }
}

impl PartialOrd<SymInt> for i64 {
    #[track_caller]
    fn partial_cmp(&self, other: &SymInt) -> Option<Ordering> {
        SymInt::from_int(*self).partial_cmp(other)
    }

    #[track_caller]
    fn lt(&self, other: &SymInt) -> bool {
        SymInt::from_int(*self).compare_or_panic(CmpOp::Lt, other)
    }

    #[track_caller]
    fn le(&self, other: &SymInt) -> bool {
        SymInt::from_int(*self).compare_or_panic(CmpOp::Le, other)
    }

    #[track_caller]
    fn gt(&self, other: &SymInt) -> bool {
        SymInt::from_int(*self).compare_or_panic(CmpOp::Gt, other)
    }

    #[track_caller]
    fn ge(&self, other: &SymInt) -> bool {
        SymInt::from_int(*self).compare_or_panic(CmpOp::Ge, other)
    }
}

// Folds start from the concrete identity, so an all-concrete input never
// touches a node.

impl Sum for SymInt {
    fn sum<I: Iterator<Item = SymInt>>(iter: I) -> SymInt {
        iter.fold(SymInt::from_int(0), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a SymInt> for SymInt {
    fn sum<I: Iterator<Item = &'a SymInt>>(iter: I) -> SymInt {
        iter.fold(SymInt::from_int(0), |acc, x| acc + x)
    }
}

impl Product for SymInt {
    fn product<I: Iterator<Item = SymInt>>(iter: I) -> SymInt {
        iter.fold(SymInt::from_int(1), |acc, x| acc * x)
    }
}

impl<'a> Product<&'a SymInt> for SymInt {
    fn product<I: Iterator<Item = &'a SymInt>>(iter: I) -> SymInt {
        iter.fold(SymInt::from_int(1), |acc, x| acc * x)
    }
}
