//! Registration options and driver configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::surface::SurfaceRef;

/// Options accepted by [`Scheduler::register`](crate::Scheduler::register).
///
/// Higher priorities run first. A drawer with a `target` draws into it
/// instead of the surface handed to [`Scheduler::frame`](crate::Scheduler::frame).
#[derive(Debug, Clone, Default)]
pub struct SystemOptions {
    pub priority: i32,
    pub target: Option<SurfaceRef>,
}

impl SystemOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Route this system's draw output to `target`.
    #[must_use]
    pub fn with_target(mut self, target: SurfaceRef) -> Self {
        self.target = Some(target);
        self
    }
}

/// Options accepted by [`Scheduler::attach_script`](crate::Scheduler::attach_script).
///
/// Both fields are recorded on the binding but the script subsystem does not
/// act on them: bindings run in attachment order and draw into whatever
/// surface the subsystem itself was given.
#[derive(Debug, Clone, Default)]
pub struct ScriptOptions {
    pub priority: i32,
    pub target: Option<SurfaceRef>,
}

impl ScriptOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: SurfaceRef) -> Self {
        self.target = Some(target);
        self
    }
}

/// Configuration for the fixed-rate [`TickLoop`](crate::TickLoop).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
}

impl TickConfig {
    /// Accepts a positive, finite rate whose tick budget fits in a [`Duration`].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.tick_duration().map(|_| ())
    }

    /// Wall-clock budget of one tick.
    pub fn tick_duration(&self) -> Result<Duration, ConfigurationError> {
        let invalid = ConfigurationError::InvalidTickRate(self.tick_rate);
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(invalid);
        }
        Duration::try_from_secs_f64(1.0 / self.tick_rate).map_err(|_| invalid)
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;

    #[test]
    fn test_system_options_defaults() {
        let opts = SystemOptions::default();
        assert_eq!(opts.priority, 0);
        assert!(opts.target.is_none());
    }

    #[test]
    fn test_system_options_builder() {
        let target = Surface::new(8, 8).into_shared();
        let opts = SystemOptions::new()
            .with_priority(-3)
            .with_target(target.clone());
        assert_eq!(opts.priority, -3);
        assert!(std::rc::Rc::ptr_eq(opts.target.as_ref().unwrap(), &target));
    }

    #[test]
    fn test_script_options_builder() {
        let opts = ScriptOptions::new().with_priority(4);
        assert_eq!(opts.priority, 4);
        assert!(opts.target.is_none());
    }

    #[test]
    fn test_tick_config_validation() {
        assert!(TickConfig::default().validate().is_ok());
        let bad = TickConfig {
            tick_rate: 0.0,
            max_ticks: 1,
        };
        assert_eq!(
            bad.validate(),
            Err(ConfigurationError::InvalidTickRate(0.0))
        );
        let nan = TickConfig {
            tick_rate: f64::NAN,
            ..TickConfig::default()
        };
        assert!(nan.tick_duration().is_err());
    }

    #[test]
    fn test_tiny_tick_rate_is_rejected() {
        for rate in [1e-20, f64::MIN_POSITIVE / 4.0] {
            let config = TickConfig {
                tick_rate: rate,
                max_ticks: 1,
            };
            assert_eq!(
                config.validate(),
                Err(ConfigurationError::InvalidTickRate(rate))
            );
            assert!(config.tick_duration().is_err());
        }
    }

    #[test]
    fn test_tick_duration() {
        let config = TickConfig {
            tick_rate: 50.0,
            max_ticks: 0,
        };
        assert_eq!(config.tick_duration().unwrap(), Duration::from_millis(20));
    }

    #[test]
    fn test_tick_config_from_json_fills_defaults() {
        let config: TickConfig = serde_json::from_str(r#"{ "max_ticks": 120 }"#).unwrap();
        assert_eq!(config.max_ticks, 120);
        assert_eq!(config.tick_rate, 60.0);
    }
}
