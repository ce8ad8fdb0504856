#![allow(clippy::unwrap_used, reason = "tests panic on failure")]

use super::*;
use crate::test_helpers::EchoNode;

fn here() -> GuardLocation {
    GuardLocation::new("node_tests.rs", 1)
}

#[test]
fn clone_shares_allocation() {
    let a = EchoNode::resolved(3);
    assert_eq!(a.ref_count(), 1);
    let b = a.clone();
    assert!(a.ptr_eq(&b));
    assert_eq!(a.ref_count(), 2);
    drop(b);
    assert_eq!(a.ref_count(), 1);
}

#[test]
fn apply_routes_to_node_operations() {
    let a = EchoNode::resolved(7);
    let b = EchoNode::resolved(2);
    let cases = [
        (ArithOp::Add, 9),
        (ArithOp::Sub, 5),
        (ArithOp::Mul, 14),
        (ArithOp::FloorDiv, 3),
        (ArithOp::Mod, 1),
    ];
    for (op, expected) in cases {
        let node = a.apply(SymOp::Arith(op), &b);
        assert_eq!(node.guard_int(&here()).unwrap(), expected, "{op}");
    }
}

#[test]
fn apply_cmp_produces_boolean_nodes() {
    let a = EchoNode::resolved(2);
    let b = EchoNode::resolved(7);
    assert!(a.apply_cmp(CmpOp::Lt, &b).bool_(&here()).unwrap());
    assert!(!a.apply_cmp(CmpOp::Gt, &b).bool_(&here()).unwrap());
    assert!(a.apply_cmp(CmpOp::Le, &a).bool_(&here()).unwrap());
    assert!(a.apply_cmp(CmpOp::Eq, &a).bool_(&here()).unwrap());
    assert!(b.apply_cmp(CmpOp::Ge, &a).bool_(&here()).unwrap());
}

#[test]
fn downcast_to_implementation() {
    let a = EchoNode::resolved(1);
    assert!(a.downcast_ref::<EchoNode>().is_some());
}

#[test]
fn display_and_debug_forward_to_node() {
    let a = EchoNode::opaque("s0");
    let b = a.add(&a.wrap(3));
    assert_eq!(b.to_string(), "(s0 + 3)");
    assert!(format!("{b:?}").contains("EchoNode"));
}

#[test]
fn unresolved_guard_reports_location() {
    let a = EchoNode::opaque("s0");
    let err = a.guard_int(&here()).unwrap_err();
    assert_eq!(err.location(), here());
    assert_eq!(
        err.to_string(),
        "node_tests.rs:1: cannot resolve `s0` to a concrete value"
    );
}
