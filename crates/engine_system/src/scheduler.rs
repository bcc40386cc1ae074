//! The scheduler façade.
//!
//! [`Scheduler`] owns the world, the clock and the two participant
//! registries. Each [`tick`](Scheduler::tick) advances the clock and runs
//! every updater in priority order; each [`frame`](Scheduler::frame) runs
//! every drawer in priority order. Participants receive the scheduler itself
//! as context, so they can read the clock, mutate the world and register
//! further participants.
//!
//! ## Dispatch policy
//!
//! - A pass iterates a snapshot of its registry taken when the pass starts.
//!   Anything registered during the pass runs from the next pass on.
//! - The first participant error aborts the pass and is returned as is.
//!   Panics are not caught.
//! - Calling `tick`/`frame` from inside a participant is not supported and
//!   panics once the nested pass reaches the running participant.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use engine_component::Query;
use engine_ecs::World;
use tracing::{debug, trace};

use crate::clock::Clock;
use crate::config::{ScriptOptions, SystemOptions};
use crate::error::ConfigurationError;
use crate::registry::{Participant, Registry, SystemCell};
use crate::script::{Script, ScriptSystem};
use crate::surface::Surface;
use crate::system::System;

/// Per-frame orchestrator for a [`World`].
pub struct Scheduler {
    world: World,
    clock: Clock,
    updaters: Registry,
    drawers: Registry,
    scripts: ScriptSystem,
}

impl Scheduler {
    /// Build a scheduler around `world`.
    ///
    /// The script subsystem is registered first, with default options, so it
    /// runs ahead of every later priority-0 participant.
    #[must_use]
    pub fn new(world: World) -> Self {
        Self::with_clock(world, Clock::new())
    }

    /// Build a scheduler around `world` using an explicit clock.
    #[must_use]
    pub fn with_clock(world: World, clock: Clock) -> Self {
        let scripts = ScriptSystem::new();
        let mut scheduler = Self {
            world,
            clock,
            updaters: Registry::new(),
            drawers: Registry::new(),
            scripts: scripts.clone(),
        };
        let registered = scheduler.register(scripts, SystemOptions::default());
        debug_assert!(
            registered.is_ok(),
            "script subsystem exposes both capabilities"
        );
        scheduler
    }

    // -- Registration --

    /// Register `system` with `options`.
    ///
    /// An updater goes into the update registry, a drawer into the draw
    /// registry (with `options.target`), a system that does both into both
    /// under the same priority.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::NoSystemCapability`] if the system can do
    /// neither. No registry is modified.
    pub fn register<S: System>(
        &mut self,
        system: S,
        options: SystemOptions,
    ) -> Result<(), ConfigurationError> {
        self.register_shared(Rc::new(RefCell::new(system)), options)
    }

    /// Register a system the caller keeps a handle to.
    pub fn register_shared<S: System>(
        &mut self,
        system: Rc<RefCell<S>>,
        options: SystemOptions,
    ) -> Result<(), ConfigurationError> {
        let (can_update, can_draw, name) = {
            let mut candidate = system.borrow_mut();
            let can_update = candidate.as_update().is_some();
            let can_draw = candidate.as_draw().is_some();
            (can_update, can_draw, candidate.name().to_owned())
        };
        if !can_update && !can_draw {
            return Err(ConfigurationError::NoSystemCapability(name));
        }

        debug!(
            system = name.as_str(),
            priority = options.priority,
            can_update,
            can_draw,
            offscreen = options.target.is_some(),
            "registered system"
        );

        let cell: SystemCell = system;
        if can_update {
            self.updaters.insert(Participant::new(
                name.clone(),
                options.priority,
                None,
                cell.clone(),
            ));
        }
        if can_draw {
            self.drawers.insert(Participant::new(
                name,
                options.priority,
                options.target,
                cell,
            ));
        }
        Ok(())
    }

    /// Register each system with default options, stopping at the first error.
    pub fn register_many<I>(&mut self, systems: I) -> Result<(), ConfigurationError>
    where
        I: IntoIterator<Item = Box<dyn System>>,
    {
        for system in systems {
            self.register(system, SystemOptions::default())?;
        }
        Ok(())
    }

    /// Bind `script` to every entity matching `query`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::NoScriptCapability`] if the script has neither a
    /// per-entity update nor a per-entity draw.
    pub fn attach_script<S: Script>(
        &mut self,
        query: Query,
        script: S,
        options: ScriptOptions,
    ) -> Result<(), ConfigurationError> {
        self.scripts.attach(query, script, options)
    }

    // -- Dispatch --

    /// Advance the clock and run every updater in priority order.
    ///
    /// # Errors
    ///
    /// The first error returned by an updater, unchanged. Updaters after it
    /// do not run this tick.
    pub fn tick(&mut self) -> Result<()> {
        self.tick_at(Instant::now())
    }

    /// [`tick`](Self::tick) with the clock advanced to `now`.
    pub fn tick_at(&mut self, now: Instant) -> Result<()> {
        self.clock.advance_to(now);
        let pass = self.updaters.snapshot();
        trace!(
            tick = self.clock.ticks(),
            delta = ?self.clock.delta(),
            updaters = pass.len(),
            "tick"
        );
        for participant in pass {
            let mut system = participant.system().borrow_mut();
            if let Some(updater) = system.as_update() {
                updater.update(self)?;
            }
        }
        Ok(())
    }

    /// Run every drawer in priority order. Drawers with a private target draw
    /// into it; the rest draw into `surface`.
    ///
    /// # Errors
    ///
    /// The first error returned by a drawer, unchanged.
    pub fn frame(&mut self, surface: &mut Surface) -> Result<()> {
        let pass = self.drawers.snapshot();
        trace!(drawers = pass.len(), "frame");
        for participant in pass {
            let mut system = participant.system().borrow_mut();
            let Some(drawer) = system.as_draw() else {
                continue;
            };
            match participant.target() {
                Some(target) => drawer.draw(self, &mut target.borrow_mut())?,
                None => drawer.draw(self, surface)?,
            }
        }
        Ok(())
    }

    // -- Accessors --

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Updater names in dispatch order.
    #[must_use]
    pub fn update_order(&self) -> Vec<String> {
        self.updaters.names()
    }

    /// Drawer names in dispatch order.
    #[must_use]
    pub fn draw_order(&self) -> Vec<String> {
        self.drawers.names()
    }

    #[must_use]
    pub fn update_count(&self) -> usize {
        self.updaters.len()
    }

    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.drawers.len()
    }

    #[must_use]
    pub fn scripts(&self) -> &ScriptSystem {
        &self.scripts
    }

    #[must_use]
    pub fn script_count(&self) -> usize {
        self.scripts.len()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("clock", &self.clock)
            .field("updaters", &self.updaters)
            .field("drawers", &self.drawers)
            .field("scripts", &self.scripts)
            .finish_non_exhaustive()
    }
}
