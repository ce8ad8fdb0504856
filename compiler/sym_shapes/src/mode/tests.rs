#![allow(clippy::unwrap_used, reason = "tests panic on failure")]

use parking_lot::Mutex;

use super::*;
use crate::ShapeEnv;
use pretty_assertions::assert_eq;
use sym_int::SymNodeImpl;

/// Records every operation it sees, then defers to the next mode.
struct Recorder {
    name: &'static str,
    seen: Mutex<Vec<String>>,
}

impl Recorder {
    fn named(name: &'static str) -> Arc<Self> {
        Arc::new(Recorder {
            name,
            seen: Mutex::default(),
        })
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

impl SymDispatchMode for Recorder {
    fn sym_dispatch(&self, op: SymOp, lhs: &ExprNode, rhs: &ExprNode) -> SymNode {
        self.seen.lock().push(format!("{}: {lhs} {op} {rhs}", self.name));
        lhs.apply(op, rhs)
    }
}

/// Replaces every result with the constant 42.
struct Constant;

impl SymDispatchMode for Constant {
    fn sym_dispatch(&self, _op: SymOp, lhs: &ExprNode, _rhs: &ExprNode) -> SymNode {
        lhs.wrap(42)
    }
}

#[test]
fn mode_sees_operations_until_guard_drops() {
    let env = ShapeEnv::new();
    let n = env.create_symint("n", 5).unwrap();
    let recorder = Recorder::named("rec");

    {
        let _guard = push_mode(recorder.clone()).unwrap();
        assert_eq!(active_mode_count(), 1);
        let m = &n + 2;
        assert_eq!(m.to_string(), "(n + 2)");
    }
    assert_eq!(active_mode_count(), 0);
    let _ = &n * 3;

    assert_eq!(recorder.seen(), vec!["rec: n + 2"]);
}

#[test]
fn mode_can_replace_results() {
    let env = ShapeEnv::new();
    let n = env.create_symint("n", 5).unwrap();
    let _guard = push_mode(Arc::new(Constant)).unwrap();

    let m = &n * &n;
    assert_eq!(m.to_string(), "42");
    assert_eq!(m.guard_int().unwrap(), 42);
    assert_eq!(env.guard_count(), 0);
}

#[test]
fn running_mode_defers_to_outer_mode() {
    let env = ShapeEnv::new();
    let n = env.create_symint("n", 5).unwrap();
    let outer = Recorder::named("outer");
    let inner = Recorder::named("inner");

    let _outer_guard = push_mode(outer.clone()).unwrap();
    let _inner_guard = push_mode(inner.clone()).unwrap();
    assert_eq!(active_mode_count(), 2);

    let m = &n - 1;
    assert_eq!(m.to_string(), "(n - 1)");
    assert_eq!(inner.seen(), vec!["inner: n - 1"]);
    assert_eq!(outer.seen(), vec!["outer: n - 1"]);
    assert_eq!(active_mode_count(), 2, "running mode reinstalled");
}

#[test]
fn pushing_an_active_mode_fails() {
    let mode = Recorder::named("twice");
    let _guard = push_mode(mode.clone()).unwrap();
    assert_eq!(
        push_mode(mode).err().map(|e| e.to_string()),
        Some("dispatch mode is already active on this thread".to_string())
    );
    assert_eq!(active_mode_count(), 1);
}

#[test]
fn modes_are_per_thread() {
    let _guard = push_mode(Recorder::named("main")).unwrap();
    let count = std::thread::spawn(active_mode_count).join().unwrap();
    assert_eq!(count, 0);
}
