//! Symbolic shapes backed by expression trees.
//!
//! This crate provides the node implementation that [`sym_int::SymInt`]
//! delegates to when sizes are symbolic:
//!
//! - [`ShapeEnv`]: creates symbols with concrete hints and records a
//!   [`Guard`] every time a symbolic value is forced
//! - [`ExprNode`]: a [`sym_int::SymNodeImpl`] whose value is an [`Expr`]
//! - [`push_mode`], [`SymDispatchMode`]: intercept node operations per thread
//! - [`contiguous_strides`], [`numel`]: shape arithmetic over symbolic sizes
//!
//! # Example
//!
//! ```text
//! let env = ShapeEnv::new();
//! let shapes = env.create_shapes_for_args(&[&[8, 3]])?;
//! let rows = &shapes[0][0] * 2;          // (s0[0] * 2), nothing recorded
//! if rows.try_gt(&SymInt::from(10))? {   // guard: ((s0[0] * 2) > 10) == true
//!     ...
//! }
//! env.evaluate_guards(&[&[6, 3]]);       // true: 12 > 10 still holds
//! ```
//!
//! # Tracing
//!
//! Every crate in the workspace emits `tracing` events. Binaries and tests opt
//! in with [`init_tracing`] and `RUST_LOG`.

use std::sync::Once;

mod config;
mod env;
mod error;
mod expr;
mod mode;
mod node;
mod sizes;
mod stack;

pub use config::{ShapeConfig, LOG_GUARDS_VAR, SPECIALIZE_ZERO_ONE_VAR};
pub use env::{Guard, ShapeEnv};
pub use error::ShapeError;
pub use expr::{Bindings, EvalError, Evaluated, Expr, ExprKind, Symbol};
pub use mode::{active_mode_count, push_mode, ModeGuard, SymDispatchMode};
pub use node::ExprNode;
pub use sizes::{contiguous_strides, has_symbolic_sizes_strides, numel};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber once per process, if `RUST_LOG` is set.
///
/// Filtering follows `RUST_LOG`, e.g. `RUST_LOG=sym_shapes=debug` to see every
/// recorded guard.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
