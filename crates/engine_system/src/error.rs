//! Setup-time errors.

use thiserror::Error;

/// Raised while wiring the scheduler up. These are programming errors: the
/// caller is expected to propagate them and abort setup.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("system `{0}` can neither update nor draw")]
    NoSystemCapability(String),
    #[error("script `{0}` has neither a per-entity update nor a per-entity draw")]
    NoScriptCapability(String),
    #[error("tick rate must be a positive, finite number of ticks per second, got {0}")]
    InvalidTickRate(f64),
}
