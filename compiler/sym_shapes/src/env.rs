//! Shape environments: symbol hints and recorded guards.
//!
//! A [`ShapeEnv`] hands out symbolic sizes for the inputs of a trace. Each
//! symbol carries a *hint*, the concrete size observed when it was created.
//! Whenever traced code forces a symbolic value (`guard_int`, a comparison),
//! the environment evaluates the expression against the hints and records a
//! [`Guard`]: "this expression had this value". Replaying the guards against
//! a new set of input sizes tells whether the trace is still valid for them.
//!
//! The environment is shared: clones refer to the same state, and every
//! [`ExprNode`] keeps a clone so it can evaluate itself.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use sym_int::{GuardError, GuardLocation, SymInt, SymNode};
use tracing::debug;

use crate::expr::{Bindings, EvalError, Evaluated, Expr, Symbol};
use crate::node::ExprNode;
use crate::{ShapeConfig, ShapeError};

/// A recorded assumption: `expr` evaluated to `value` at `location`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Guard {
    pub expr: Expr,
    pub value: Evaluated,
    pub location: GuardLocation,
}

impl Guard {
    /// Whether the assumption still holds under `bindings`.
    pub fn holds(&self, bindings: &Bindings) -> bool {
        self.expr.eval(bindings) == Ok(self.value)
    }
}

#[derive(Default)]
struct EnvState {
    hints: Bindings,
    guards: Vec<Guard>,
}

/// Shared symbol table and guard log for one trace.
#[derive(Clone)]
pub struct ShapeEnv {
    state: Arc<Mutex<EnvState>>,
    config: ShapeConfig,
}

impl Default for ShapeEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ShapeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ShapeEnv")
            .field("symbols", &state.hints.len())
            .field("guards", &state.guards.len())
            .field("config", &self.config)
            .finish()
    }
}

impl ShapeEnv {
    pub fn new() -> Self {
        Self::with_config(ShapeConfig::default())
    }

    pub fn with_config(config: ShapeConfig) -> Self {
        ShapeEnv {
            state: Arc::new(Mutex::new(EnvState::default())),
            config,
        }
    }

    pub fn config(&self) -> ShapeConfig {
        self.config
    }

    /// Whether both handles refer to the same environment.
    pub fn ptr_eq(&self, other: &ShapeEnv) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Register a fresh symbol with its concrete hint.
    pub fn create_symbol(&self, name: &str, hint: i64) -> Result<Symbol, ShapeError> {
        if hint < 0 {
            return Err(ShapeError::NegativeHint {
                name: name.to_string(),
                hint,
            });
        }
        let symbol = Symbol::new(name);
        let mut state = self.state.lock();
        if state.hints.contains_key(&symbol) {
            return Err(ShapeError::DuplicateSymbol {
                name: name.to_string(),
            });
        }
        state.hints.insert(symbol.clone(), hint);
        Ok(symbol)
    }

    /// A symbolic size named `name` whose current value is `hint`.
    ///
    /// With `specialize_zero_one`, hints 0 and 1 produce concrete scalars and
    /// no symbol is registered.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn create_symint(&self, name: &str, hint: i64) -> Result<SymInt, ShapeError> {
        if self.config.specialize_zero_one && (hint == 0 || hint == 1) {
            debug!("specialized to a constant");
            return Ok(SymInt::from_int(hint));
        }
        let symbol = self.create_symbol(name, hint)?;
        let node = ExprNode::new(Expr::symbol(symbol), self.clone(), None);
        Ok(SymInt::from_node(SymNode::new(node)))
    }

    /// Symbolic sizes for a list of argument shapes.
    ///
    /// Dimension `d` of argument `a` is named `s{a}[{d}]`.
    pub fn create_shapes_for_args(&self, args: &[&[i64]]) -> Result<Vec<Vec<SymInt>>, ShapeError> {
        args.iter()
            .enumerate()
            .map(|(arg, sizes)| {
                sizes
                    .iter()
                    .enumerate()
                    .map(|(dim, &size)| self.create_symint(&arg_symbol_name(arg, dim), size))
                    .collect()
            })
            .collect()
    }

    /// The hint registered for `symbol`.
    pub fn hint(&self, symbol: &Symbol) -> Option<i64> {
        self.state.lock().hints.get(symbol).copied()
    }

    pub fn symbol_count(&self) -> usize {
        self.state.lock().hints.len()
    }

    /// Evaluate an integer expression against the hints and record a guard.
    #[tracing::instrument(level = "debug", skip_all, fields(expr = %expr, location = %location))]
    pub fn evaluate_expr(&self, expr: &Expr, location: &GuardLocation) -> Result<i64, GuardError> {
        if expr.is_boolean() {
            return Err(kind_mismatch(expr, "integer", location));
        }
        match self.evaluate(expr, location)? {
            Evaluated::Int(value) => Ok(value),
            Evaluated::Bool(_) => Err(kind_mismatch(expr, "integer", location)),
        }
    }

    /// Evaluate a comparison against the hints and record a guard.
    #[tracing::instrument(level = "debug", skip_all, fields(expr = %expr, location = %location))]
    pub fn evaluate_bool(&self, expr: &Expr, location: &GuardLocation) -> Result<bool, GuardError> {
        if !expr.is_boolean() {
            return Err(kind_mismatch(expr, "boolean", location));
        }
        match self.evaluate(expr, location)? {
            Evaluated::Bool(value) => Ok(value),
            Evaluated::Int(_) => Err(kind_mismatch(expr, "boolean", location)),
        }
    }

    fn evaluate(&self, expr: &Expr, location: &GuardLocation) -> Result<Evaluated, GuardError> {
        let mut state = self.state.lock();
        let value = expr
            .eval(&state.hints)
            .map_err(|err| guard_error(err, expr, location))?;
        if self.config.log_guards {
            debug!(%expr, ?value, %location, "recorded guard");
        }
        state.guards.push(Guard {
            expr: expr.clone(),
            value,
            location: *location,
        });
        Ok(value)
    }

    /// Snapshot of the guards recorded so far.
    pub fn guards(&self) -> Vec<Guard> {
        self.state.lock().guards.clone()
    }

    pub fn guard_count(&self) -> usize {
        self.state.lock().guards.len()
    }

    /// Whether every recorded guard holds for new argument shapes.
    ///
    /// Symbols are bound by the `s{a}[{d}]` naming of
    /// [`create_shapes_for_args`](Self::create_shapes_for_args). A guard that
    /// mentions a symbol the new shapes do not bind fails the check.
    #[tracing::instrument(level = "debug", skip_all, fields(args = args.len()))]
    pub fn evaluate_guards(&self, args: &[&[i64]]) -> bool {
        let bindings: Bindings = args
            .iter()
            .enumerate()
            .flat_map(|(arg, sizes)| {
                sizes
                    .iter()
                    .enumerate()
                    .map(move |(dim, &size)| (Symbol::new(&arg_symbol_name(arg, dim)), size))
            })
            .collect();
        let state = self.state.lock();
        let failed = state.guards.iter().find(|guard| !guard.holds(&bindings));
        if let Some(guard) = failed {
            debug!(expr = %guard.expr, location = %guard.location, "guard failed");
        }
        failed.is_none()
    }
}

fn arg_symbol_name(arg: usize, dim: usize) -> String {
    format!("s{arg}[{dim}]")
}

fn guard_error(err: EvalError, expr: &Expr, location: &GuardLocation) -> GuardError {
    match err {
        EvalError::Unbound(symbol) => GuardError::UnboundSymbol {
            name: symbol.name().to_string(),
            location: *location,
        },
        EvalError::Arith(error) => GuardError::Arith {
            expr: expr.to_string(),
            error,
            location: *location,
        },
        EvalError::BooleanOperand => kind_mismatch(expr, "integer", location),
    }
}

fn kind_mismatch(expr: &Expr, expected: &'static str, location: &GuardLocation) -> GuardError {
    GuardError::KindMismatch {
        expr: expr.to_string(),
        expected,
        location: *location,
    }
}
