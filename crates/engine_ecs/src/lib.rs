//! # engine_ecs
//!
//! The entity store the scheduler runs against: component type registration,
//! entity spawn/despawn, typed component access and query evaluation over
//! live entities.

mod bundle;
mod world;

pub use bundle::Bundle;
pub use world::{World, WorldError};
