//! Script attachment: per-entity behavior bound to a query.
//!
//! A script is attached to a [`Query`] instead of being registered as a
//! system. The [`ScriptSystem`] holds every binding and is itself an ordinary
//! participant, registered for both update and draw when the scheduler is
//! built. On each pass it walks its bindings in attachment order, evaluates
//! each binding's query against the world, and runs the script once per
//! matching entity.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use engine_component::{Entity, Query};
use tracing::{debug, trace};

use crate::config::ScriptOptions;
use crate::error::ConfigurationError;
use crate::scheduler::Scheduler;
use crate::surface::{Surface, SurfaceRef};
use crate::system::{Draw, System, Update};

/// Per-entity update, run once per tick for every matching entity.
pub trait EntityUpdate {
    fn update(&mut self, ctx: &mut Scheduler, entity: Entity) -> Result<()>;
}

/// Per-entity draw, run once per frame for every matching entity.
pub trait EntityDraw {
    fn draw(
        &mut self,
        ctx: &mut Scheduler,
        entity: Entity,
        surface: &mut Surface,
    ) -> Result<()>;
}

/// Behavior that can be attached to a query.
///
/// Mirrors [`System`]: override at least one of `as_update`/`as_draw`.
pub trait Script: 'static {
    fn as_update(&mut self) -> Option<&mut dyn EntityUpdate> {
        None
    }

    fn as_draw(&mut self) -> Option<&mut dyn EntityDraw> {
        None
    }

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A script bound to a query.
pub struct Binding {
    name: String,
    query: Query,
    priority: i32,
    target: Option<SurfaceRef>,
    script: RefCell<Box<dyn Script>>,
}

impl Binding {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Priority recorded at attachment. Bindings still run in attachment order.
    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Target recorded at attachment. Scripts still draw into the surface
    /// the subsystem is given.
    #[must_use]
    pub fn target(&self) -> Option<&SurfaceRef> {
        self.target.as_ref()
    }
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("query", &self.query)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

/// The built-in participant that runs attached scripts.
///
/// Cloning yields another handle to the same binding list; the scheduler
/// keeps one handle for attachment and registers another.
#[derive(Clone, Default)]
pub struct ScriptSystem {
    bindings: Rc<RefCell<Vec<Rc<Binding>>>>,
}

impl ScriptSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `script` to `query`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::NoScriptCapability`] if the script has neither
    /// capability; the binding list is left untouched.
    pub fn attach<S: Script>(
        &self,
        query: Query,
        mut script: S,
        options: ScriptOptions,
    ) -> Result<(), ConfigurationError> {
        let can_update = script.as_update().is_some();
        let can_draw = script.as_draw().is_some();
        let name = script.name().to_owned();
        if !can_update && !can_draw {
            return Err(ConfigurationError::NoScriptCapability(name));
        }

        debug!(
            script = name.as_str(),
            priority = options.priority,
            can_update,
            can_draw,
            "attached script"
        );
        self.bindings.borrow_mut().push(Rc::new(Binding {
            name,
            query,
            priority: options.priority,
            target: options.target,
            script: RefCell::new(Box::new(script)),
        }));
        Ok(())
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.borrow().is_empty()
    }

    /// Copy of the binding list, in attachment order.
    #[must_use]
    pub fn bindings(&self) -> Vec<Rc<Binding>> {
        self.bindings.borrow().clone()
    }

    fn run_updates(&self, ctx: &mut Scheduler) -> Result<()> {
        for binding in self.bindings() {
            let entities = ctx.world().query(&binding.query);
            trace!(
                script = binding.name(),
                matched = entities.len(),
                "script update"
            );
            let mut script = binding.script.borrow_mut();
            let Some(updater) = script.as_update() else {
                continue;
            };
            for entity in entities {
                // Skip entities despawned earlier in this pass.
                if !ctx.world().contains(entity) {
                    continue;
                }
                updater.update(ctx, entity)?;
            }
        }
        Ok(())
    }

    fn run_draws(&self, ctx: &mut Scheduler, surface: &mut Surface) -> Result<()> {
        for binding in self.bindings() {
            let entities = ctx.world().query(&binding.query);
            trace!(
                script = binding.name(),
                matched = entities.len(),
                "script draw"
            );
            let mut script = binding.script.borrow_mut();
            let Some(drawer) = script.as_draw() else {
                continue;
            };
            for entity in entities {
                if !ctx.world().contains(entity) {
                    continue;
                }
                drawer.draw(ctx, entity, surface)?;
            }
        }
        Ok(())
    }
}

impl Update for ScriptSystem {
    fn update(&mut self, ctx: &mut Scheduler) -> Result<()> {
        self.run_updates(ctx)
    }
}

impl Draw for ScriptSystem {
    fn draw(&mut self, ctx: &mut Scheduler, surface: &mut Surface) -> Result<()> {
        self.run_draws(ctx, surface)
    }
}

impl System for ScriptSystem {
    fn as_update(&mut self) -> Option<&mut dyn Update> {
        Some(self)
    }

    fn as_draw(&mut self) -> Option<&mut dyn Draw> {
        Some(self)
    }

    fn name(&self) -> &str {
        "ScriptSystem"
    }
}

impl std::fmt::Debug for ScriptSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptSystem")
            .field("bindings", &self.len())
            .finish()
    }
}
