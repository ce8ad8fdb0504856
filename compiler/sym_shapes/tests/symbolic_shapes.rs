//! End-to-end behaviour of symbolic scalars backed by a shape environment.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "integration tests panic on failure"
)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use sym_int::{GuardError, SymInt, SymOp};
use sym_shapes::{
    contiguous_strides, init_tracing, numel, push_mode, Evaluated, ExprNode, ShapeConfig,
    ShapeEnv, SymDispatchMode,
};

/// A toy "view" kernel: flatten everything after the first dimension when the
/// trailing block is large enough, otherwise keep the shape.
fn flatten_trailing(sizes: &[SymInt]) -> Result<Vec<SymInt>, GuardError> {
    let (first, rest) = sizes.split_first().expect("at least one dimension");
    let block = numel(rest);
    if block.try_ge(&SymInt::from(16_i64))? {
        Ok(vec![first.clone(), block])
    } else {
        Ok(sizes.to_vec())
    }
}

#[test]
fn trace_records_guards_that_replay() {
    init_tracing();
    let env = ShapeEnv::new();
    let shapes = env.create_shapes_for_args(&[&[2, 4, 8]]).unwrap();

    let out = flatten_trailing(&shapes[0]).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].to_string(), "((1 * s0[1]) * s0[2])");

    let guards = env.guards();
    assert_eq!(guards.len(), 1);
    assert_eq!(guards[0].value, Evaluated::Bool(true));
    assert_eq!(guards[0].location.file, file!());

    assert!(env.evaluate_guards(&[&[2, 4, 8]]));
    assert!(env.evaluate_guards(&[&[9, 2, 8]]), "block of 16 still flattens");
    assert!(!env.evaluate_guards(&[&[2, 3, 5]]), "block of 15 takes the other branch");
}

#[test]
fn guard_errors_carry_the_call_site() {
    let env = ShapeEnv::new();
    let n = env.create_symint("n", 6).unwrap();
    let zero = env.create_symint("z", 2).unwrap() - 2;

    let (result, line) = ((&n / &zero).guard_int(), line!());
    let err = result.unwrap_err();
    assert_eq!(err.location().line, line);
    assert_eq!(
        err.to_string(),
        format!(
            "{}:{line}: division by zero while evaluating `floor(n / (z - 2))`",
            file!()
        )
    );
    assert_eq!(env.guard_count(), 0);
}

#[test]
fn specialized_sizes_never_become_symbols() {
    let env = ShapeEnv::with_config(ShapeConfig::from_lookup(|_| None).unwrap());
    let shapes = env.create_shapes_for_args(&[&[1, 0, 3]]).unwrap();
    let kinds: Vec<bool> = shapes[0].iter().map(SymInt::is_symbolic).collect();
    assert_eq!(kinds, vec![false, false, true]);

    let strides = contiguous_strides(&shapes[0]);
    assert_eq!(strides[2], 1);
    assert_eq!(numel(&shapes[0]).to_string(), "(0 * s0[2])");
}

#[test]
fn nodes_are_released_with_their_scalars() {
    let env = ShapeEnv::new();
    let n = env.create_symint("n", 4).unwrap();
    let node = n.to_node();
    assert_eq!(node.ref_count(), 2);
    {
        let copies: Vec<SymInt> = (0..10).map(|_| n.clone()).collect();
        assert_eq!(node.ref_count(), 12);
        drop(copies);
    }
    drop(n);
    assert_eq!(node.ref_count(), 1);
}

#[test]
fn scalars_cross_threads() {
    let env = ShapeEnv::new();
    let n = env.create_symint("n", 12).unwrap();

    let handles: Vec<_> = (1..=4_i64)
        .map(|k| {
            let n = n.clone();
            std::thread::spawn(move || (&n * k).guard_int().unwrap())
        })
        .collect();
    let results: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results, vec![12, 24, 36, 48]);
    assert_eq!(env.guard_count(), 4);
}

/// Counts operations by kind without changing results.
#[derive(Default)]
struct OpCounter {
    ops: parking_lot::Mutex<Vec<String>>,
}

impl SymDispatchMode for OpCounter {
    fn sym_dispatch(&self, op: SymOp, lhs: &ExprNode, rhs: &ExprNode) -> sym_int::SymNode {
        self.ops.lock().push(op.to_string());
        lhs.apply(op, rhs)
    }
}

#[test]
fn dispatch_mode_observes_scalar_operations() {
    let env = ShapeEnv::new();
    let shapes = env.create_shapes_for_args(&[&[3, 5]]).unwrap();
    let counter = Arc::new(OpCounter::default());

    let strides = {
        let _guard = push_mode(counter.clone()).unwrap();
        let strides = contiguous_strides(&shapes[0]);
        assert!(shapes[0][0] < shapes[0][1]);
        strides
    };

    assert_eq!(strides[0].to_string(), "(1 * s0[1])");
    assert_eq!(*counter.ops.lock(), vec!["*", "<"]);
}

#[test]
fn long_accumulation_guards_and_releases() {
    let env = ShapeEnv::new();
    let mut x = env.create_symint("n", 3).unwrap();
    for _ in 0..200_000 {
        x += 1;
    }
    assert_eq!(x.guard_int(), Ok(200_003));
    assert_eq!(env.guard_count(), 1);
    assert!(!env.evaluate_guards(&[]), "guard mentions unbound `n`");
    drop(x);
    drop(env);
}
