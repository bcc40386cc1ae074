//! # engine_system
//!
//! Per-frame orchestration for an [`engine_ecs::World`].
//!
//! A [`Scheduler`] holds two priority-ordered registries: updaters, run once
//! per [`tick`](Scheduler::tick), and drawers, run once per
//! [`frame`](Scheduler::frame). A system declares what it can do through the
//! [`System`] capability accessors and is filed into one registry or both.
//! Scripts are per-entity behaviors attached to a [`Query`](engine_component::Query)
//! and run by the built-in [`ScriptSystem`].
//!
//! ## Usage
//!
//! ```rust
//! use anyhow::Result;
//! use engine_ecs::World;
//! use engine_system::{Scheduler, Surface, System, SystemOptions, Update};
//!
//! struct Counter(u32);
//!
//! impl Update for Counter {
//!     fn update(&mut self, _ctx: &mut Scheduler) -> Result<()> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! impl System for Counter {
//!     fn as_update(&mut self) -> Option<&mut dyn Update> {
//!         Some(self)
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let mut scheduler = Scheduler::new(World::new());
//! scheduler.register(Counter(0), SystemOptions::new().with_priority(10))?;
//!
//! let mut screen = Surface::new(320, 240);
//! scheduler.tick()?;
//! scheduler.frame(&mut screen)?;
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod registry;
pub mod scheduler;
pub mod script;
pub mod surface;
pub mod system;
pub mod tick;

pub use clock::Clock;
pub use config::{ScriptOptions, SystemOptions, TickConfig};
pub use error::ConfigurationError;
pub use registry::{Participant, Registry};
pub use scheduler::Scheduler;
pub use script::{Binding, EntityDraw, EntityUpdate, Script, ScriptSystem};
pub use surface::{Rgba, Surface, SurfaceRef, TRANSPARENT};
pub use system::{Draw, System, Update};
pub use tick::TickLoop;
