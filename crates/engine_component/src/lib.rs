//! # engine_component
//!
//! Entity handles, the [`Component`] trait and [`Query`] predicates. These are
//! the vocabulary shared by the world (`engine_ecs`) and the scheduler
//! (`engine_system`).

pub mod component;
pub mod entity;
pub mod query;

pub use component::{Component, ComponentMeta, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use query::{Query, QueryFilter};
