//! Shape environment configuration.
//!
//! Plain struct with defaults and `with_*` setters, optionally seeded from
//! environment variables:
//!
//! | Variable | Field | Default |
//! |---|---|---|
//! | `SYM_SHAPES_SPECIALIZE_ZERO_ONE` | `specialize_zero_one` | `true` |
//! | `SYM_SHAPES_LOG_GUARDS` | `log_guards` | `false` |

use crate::ShapeError;

pub const SPECIALIZE_ZERO_ONE_VAR: &str = "SYM_SHAPES_SPECIALIZE_ZERO_ONE";
pub const LOG_GUARDS_VAR: &str = "SYM_SHAPES_LOG_GUARDS";

/// Knobs for a [`ShapeEnv`](crate::ShapeEnv).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShapeConfig {
    /// Sizes 0 and 1 come back as concrete scalars instead of fresh symbols.
    pub specialize_zero_one: bool,
    /// Emit a `debug` event for every recorded guard.
    pub log_guards: bool,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        ShapeConfig {
            specialize_zero_one: true,
            log_guards: false,
        }
    }
}

impl ShapeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ShapeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ShapeError> {
        let mut config = ShapeConfig::default();
        if let Some(value) = lookup(SPECIALIZE_ZERO_ONE_VAR) {
            config.specialize_zero_one = parse_flag(SPECIALIZE_ZERO_ONE_VAR, &value)?;
        }
        if let Some(value) = lookup(LOG_GUARDS_VAR) {
            config.log_guards = parse_flag(LOG_GUARDS_VAR, &value)?;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_specialize_zero_one(mut self, specialize: bool) -> Self {
        self.specialize_zero_one = specialize;
        self
    }

    #[must_use]
    pub fn with_log_guards(mut self, log_guards: bool) -> Self {
        self.log_guards = log_guards;
        self
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ShapeError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ShapeError::InvalidConfig {
            key,
            value: value.to_string(),
        }),
    }
}
