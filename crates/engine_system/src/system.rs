//! System capability traits.
//!
//! A system is anything implementing [`System`]. What it can do is reported
//! through [`System::as_update`] and [`System::as_draw`]; the scheduler queries
//! both once, at registration, and files the system into the update and/or
//! draw registry accordingly.

use anyhow::Result;

use crate::scheduler::Scheduler;
use crate::surface::Surface;

/// Runs once per tick.
pub trait Update {
    /// Advance this system by one tick. `ctx` gives access to the world, the
    /// clock and registration.
    fn update(&mut self, ctx: &mut Scheduler) -> Result<()>;
}

/// Runs once per frame.
pub trait Draw {
    /// Render into `surface`, which is either this system's own target or
    /// the frame's default surface.
    fn draw(&mut self, ctx: &mut Scheduler, surface: &mut Surface) -> Result<()>;
}

/// A registrable system.
///
/// Override at least one of the two capability accessors, returning `Some(self)`:
///
/// ```rust
/// use anyhow::Result;
/// use engine_system::{Scheduler, System, Update};
///
/// struct Gravity;
///
/// impl Update for Gravity {
///     fn update(&mut self, _ctx: &mut Scheduler) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// impl System for Gravity {
///     fn as_update(&mut self) -> Option<&mut dyn Update> {
///         Some(self)
///     }
/// }
/// ```
pub trait System: 'static {
    fn as_update(&mut self) -> Option<&mut dyn Update> {
        None
    }

    fn as_draw(&mut self) -> Option<&mut dyn Draw> {
        None
    }

    /// Name reported in dispatch order listings and errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<S: System + ?Sized> System for Box<S> {
    fn as_update(&mut self) -> Option<&mut dyn Update> {
        (**self).as_update()
    }

    fn as_draw(&mut self) -> Option<&mut dyn Draw> {
        (**self).as_draw()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
