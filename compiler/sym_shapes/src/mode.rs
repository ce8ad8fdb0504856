//! Dispatch modes: intercept operations on expression nodes.
//!
//! A mode sees every binary operation performed on an [`ExprNode`] on the
//! current thread and decides which node comes back. Modes form a per-thread
//! stack; the innermost one handles the operation. While it runs it is popped,
//! so node operations it performs itself reach the next outer mode, or the
//! plain expression-building implementation when the stack is empty.
//!
//! ```text
//! let _guard = push_mode(Arc::new(Tracer::default()))?;
//! let z = x * y;   // Tracer::sym_dispatch(Mul, x, y)
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use sym_int::{SymNode, SymOp};
use tracing::trace;

use crate::node::ExprNode;
use crate::ShapeError;

/// Handler for operations on expression nodes.
pub trait SymDispatchMode: 'static {
    /// Produce the result of `lhs op rhs`.
    ///
    /// Calling [`ExprNode::apply`] from here forwards to the next outer mode.
    fn sym_dispatch(&self, op: SymOp, lhs: &ExprNode, rhs: &ExprNode) -> SymNode;
}

thread_local! {
    static MODES: RefCell<Vec<Arc<dyn SymDispatchMode>>> = const { RefCell::new(Vec::new()) };
}

/// Keeps a mode installed; dropping it uninstalls the mode.
///
/// Tied to the thread that pushed the mode.
#[must_use = "the mode is uninstalled as soon as the guard is dropped"]
pub struct ModeGuard {
    mode: Arc<dyn SymDispatchMode>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ModeGuard {
    fn drop(&mut self) {
        MODES.with_borrow_mut(|modes| {
            if let Some(pos) = modes.iter().rposition(|m| Arc::ptr_eq(m, &self.mode)) {
                modes.remove(pos);
            }
            trace!(depth = modes.len(), "dispatch mode popped");
        });
    }
}

/// Install `mode` as the innermost mode on this thread.
pub fn push_mode(mode: Arc<dyn SymDispatchMode>) -> Result<ModeGuard, ShapeError> {
    MODES.with_borrow_mut(|modes| {
        if modes.iter().any(|m| Arc::ptr_eq(m, &mode)) {
            return Err(ShapeError::ModeAlreadyActive);
        }
        modes.push(Arc::clone(&mode));
        trace!(depth = modes.len(), "dispatch mode pushed");
        Ok(ModeGuard {
            mode,
            _not_send: PhantomData,
        })
    })
}

/// Number of modes installed on this thread.
pub fn active_mode_count() -> usize {
    MODES.with_borrow(Vec::len)
}

/// Puts a running mode back on top of the stack, even if it panics.
struct Reinstall(Option<Arc<dyn SymDispatchMode>>);

impl Drop for Reinstall {
    fn drop(&mut self) {
        if let Some(mode) = self.0.take() {
            MODES.with_borrow_mut(|modes| modes.push(mode));
        }
    }
}

/// Hand `lhs op rhs` to the innermost mode, if any.
pub(crate) fn dispatch(op: SymOp, lhs: &ExprNode, rhs: &ExprNode) -> Option<SymNode> {
    let mode = MODES.with_borrow_mut(Vec::pop)?;
    trace!(%op, "dispatching to mode");
    let reinstall = Reinstall(Some(Arc::clone(&mode)));
    let result = mode.sym_dispatch(op, lhs, rhs);
    drop(reinstall);
    Some(result)
}

#[cfg(test)]
mod tests;
