//! Fixed-rate driver.
//!
//! [`TickLoop`] owns a [`Scheduler`] and a screen surface and calls
//! [`Scheduler::tick`] followed by [`Scheduler::frame`] at a fixed rate. It
//! is the smallest host that runs a scheduler; windowed hosts call the two
//! scheduler methods from their own event loop instead.

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::TickConfig;
use crate::scheduler::Scheduler;
use crate::surface::Surface;

/// Drives a scheduler at `config.tick_rate` steps per second.
#[derive(Debug)]
pub struct TickLoop {
    config: TickConfig,
    scheduler: Scheduler,
    screen: Surface,
    steps: u64,
}

impl TickLoop {
    #[must_use]
    pub fn new(config: TickConfig, scheduler: Scheduler, screen: Surface) -> Self {
        Self {
            config,
            scheduler,
            screen,
            steps: 0,
        }
    }

    /// Run one tick and one frame.
    pub fn step(&mut self) -> Result<()> {
        self.scheduler.tick()?;
        self.scheduler.frame(&mut self.screen)?;
        self.steps += 1;
        debug!(step = self.steps, "step complete");
        Ok(())
    }

    /// Step at the configured rate until `max_ticks` steps have run, or
    /// forever when `max_ticks` is 0. Returns the number of steps run.
    ///
    /// # Errors
    ///
    /// An invalid tick rate, or the first participant error.
    pub fn run(&mut self) -> Result<u64> {
        let tick_duration = self.config.tick_duration()?;
        let mut count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            "starting tick loop"
        );

        loop {
            let start = Instant::now();
            self.step()?;

            count += 1;
            if self.config.max_ticks > 0 && count >= self.config.max_ticks {
                info!(ticks = count, "tick loop complete");
                return Ok(count);
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    step = self.steps,
                    elapsed = ?elapsed,
                    budget = ?tick_duration,
                    "tick exceeded time budget"
                );
            }
        }
    }

    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    /// Give back the scheduler and the last rendered screen.
    #[must_use]
    pub fn into_parts(self) -> (Scheduler, Surface) {
        (self.scheduler, self.screen)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use engine_ecs::World;

    use super::*;
    use crate::config::SystemOptions;
    use crate::error::ConfigurationError;
    use crate::surface::Rgba;
    use crate::system::{Draw, System, Update};

    const GREEN: Rgba = [0, 255, 0, 255];

    #[derive(Default)]
    struct Counter {
        updates: u32,
        fail_at: Option<u32>,
    }

    impl Update for Counter {
        fn update(&mut self, _ctx: &mut Scheduler) -> Result<()> {
            self.updates += 1;
            if self.fail_at == Some(self.updates) {
                return Err(anyhow!("failed at update {}", self.updates));
            }
            Ok(())
        }
    }

    impl Draw for Counter {
        fn draw(&mut self, _ctx: &mut Scheduler, surface: &mut Surface) -> Result<()> {
            surface.clear(GREEN);
            Ok(())
        }
    }

    impl System for Counter {
        fn as_update(&mut self) -> Option<&mut dyn Update> {
            Some(self)
        }

        fn as_draw(&mut self) -> Option<&mut dyn Draw> {
            Some(self)
        }
    }

    fn fast(max_ticks: u64) -> TickConfig {
        TickConfig {
            tick_rate: 1000.0,
            max_ticks,
        }
    }

    #[test]
    fn test_step_ticks_and_draws() {
        let mut scheduler = Scheduler::new(World::new());
        scheduler
            .register(Counter::default(), SystemOptions::default())
            .unwrap();
        let mut tick_loop = TickLoop::new(fast(0), scheduler, Surface::new(2, 2));
        tick_loop.step().unwrap();
        assert_eq!(tick_loop.steps(), 1);
        assert_eq!(tick_loop.scheduler().clock().ticks(), 1);
        assert_eq!(tick_loop.screen().count_pixels(GREEN), 4);
    }

    #[test]
    fn test_run_limited_ticks() {
        let scheduler = Scheduler::new(World::new());
        let mut tick_loop = TickLoop::new(fast(5), scheduler, Surface::new(1, 1));
        assert_eq!(tick_loop.run().unwrap(), 5);
        assert_eq!(tick_loop.scheduler().clock().ticks(), 5);
    }

    #[test]
    fn test_run_stops_on_error() {
        let mut scheduler = Scheduler::new(World::new());
        scheduler
            .register(
                Counter {
                    fail_at: Some(3),
                    ..Counter::default()
                },
                SystemOptions::default(),
            )
            .unwrap();
        let mut tick_loop = TickLoop::new(fast(10), scheduler, Surface::new(1, 1));
        let err = tick_loop.run().unwrap_err();
        assert_eq!(err.to_string(), "failed at update 3");
        assert_eq!(tick_loop.steps(), 2);
    }

    #[test]
    fn test_run_rejects_bad_rate() {
        let config = TickConfig {
            tick_rate: -1.0,
            max_ticks: 1,
        };
        let mut tick_loop = TickLoop::new(config, Scheduler::new(World::new()), Surface::new(1, 1));
        let err = tick_loop.run().unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigurationError>(),
            Some(&ConfigurationError::InvalidTickRate(-1.0))
        );
        assert_eq!(tick_loop.steps(), 0);
    }
}
