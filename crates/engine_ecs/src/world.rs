//! ECS world: entity storage, component registration and query evaluation.
//!
//! Components are stored per entity, boxed behind `dyn Any` and keyed by
//! [`ComponentTypeId`]. Entities live in a `BTreeMap`, so query results come
//! back in ascending entity order.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};

use engine_component::{Component, ComponentMeta, ComponentTypeId, Entity, EntityAllocator, Query};
use thiserror::Error;
use tracing::{debug, trace};

use crate::bundle::Bundle;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("{0} not found")]
    EntityNotFound(Entity),
    #[error("component '{0}' was never registered with this world")]
    UnregisteredComponent(&'static str),
    #[error("component '{component}' not found on {entity}")]
    ComponentNotFound {
        component: &'static str,
        entity: Entity,
    },
    #[error("component name '{0}' is already registered by a different type")]
    NameCollision(&'static str),
}

/// A single entity's component set.
#[derive(Default)]
struct EntityData {
    components: HashMap<ComponentTypeId, Box<dyn Any>>,
}

/// The entity store.
///
/// Component types must be registered with [`World::register_component`]
/// before they can be attached to an entity.
#[derive(Default)]
pub struct World {
    allocator: EntityAllocator,
    registered: HashMap<ComponentTypeId, ComponentMeta>,
    entities: BTreeMap<Entity, EntityData>,
}

impl World {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Component types --

    /// Register component type `T`. Registering the same type twice is a no-op.
    ///
    /// # Errors
    ///
    /// [`WorldError::NameCollision`] when another Rust type already claimed
    /// `T::type_name()`.
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentTypeId, WorldError> {
        let meta = T::meta();
        if let Some(existing) = self.registered.get(&meta.type_id) {
            if existing.rust_type != meta.rust_type {
                return Err(WorldError::NameCollision(meta.name));
            }
            return Ok(meta.type_id);
        }
        debug!(
            component = meta.name,
            type_id = meta.type_id.0,
            "registered component"
        );
        self.registered.insert(meta.type_id, meta);
        Ok(meta.type_id)
    }

    #[must_use]
    pub fn is_registered<T: Component>(&self) -> bool {
        self.registered
            .get(&T::component_type_id())
            .is_some_and(|meta| meta.rust_type == T::meta().rust_type)
    }

    /// Name of a registered component type.
    #[must_use]
    pub fn component_name(&self, type_id: ComponentTypeId) -> Option<&'static str> {
        self.registered.get(&type_id).map(|meta| meta.name)
    }

    fn check_registered<T: Component>(&self) -> Result<ComponentTypeId, WorldError> {
        if self.is_registered::<T>() {
            Ok(T::component_type_id())
        } else {
            Err(WorldError::UnregisteredComponent(T::type_name()))
        }
    }

    // -- Entity lifecycle --

    /// Spawn an entity with no components.
    pub fn spawn(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.entities.insert(entity, EntityData::default());
        trace!(%entity, "spawned");
        entity
    }

    /// Spawn an entity carrying every component of `bundle`.
    ///
    /// Nothing is spawned if any component type in the bundle is unregistered.
    pub fn spawn_with<B: Bundle>(&mut self, bundle: B) -> Result<Entity, WorldError> {
        for meta in B::metas() {
            if self.registered.get(&meta.type_id) != Some(&meta) {
                return Err(WorldError::UnregisteredComponent(meta.name));
            }
        }
        let entity = self.spawn();
        if let Some(data) = self.entities.get_mut(&entity) {
            for (type_id, component) in bundle.into_components() {
                data.components.insert(type_id, component);
            }
        }
        Ok(entity)
    }

    /// Despawn an entity and drop all its components.
    pub fn despawn(&mut self, entity: Entity) -> Result<(), WorldError> {
        if self.entities.remove(&entity).is_none() {
            return Err(WorldError::EntityNotFound(entity));
        }
        trace!(%entity, "despawned");
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // -- Components --

    /// Attach `component` to `entity`, replacing any previous value of that type.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), WorldError> {
        let type_id = self.check_registered::<T>()?;
        let data = self
            .entities
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        data.components.insert(type_id, Box::new(component));
        Ok(())
    }

    /// Detach and return the `T` component of `entity`.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Result<T, WorldError> {
        let type_id = self.check_registered::<T>()?;
        let data = self
            .entities
            .get_mut(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        let not_found = WorldError::ComponentNotFound {
            component: T::type_name(),
            entity,
        };
        let boxed = data
            .components
            .remove(&type_id)
            .ok_or_else(|| not_found.clone())?;
        boxed.downcast::<T>().map(|c| *c).map_err(|_| not_found)
    }

    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.entities
            .get(&entity)?
            .components
            .get(&T::component_type_id())?
            .downcast_ref::<T>()
    }

    #[must_use]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.entities
            .get_mut(&entity)?
            .components
            .get_mut(&T::component_type_id())?
            .downcast_mut::<T>()
    }

    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    /// Component types attached to `entity`.
    pub fn component_types(&self, entity: Entity) -> Result<Vec<ComponentTypeId>, WorldError> {
        let data = self
            .entities
            .get(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        let mut types: Vec<_> = data.components.keys().copied().collect();
        types.sort();
        Ok(types)
    }

    // -- Query --

    /// Entities currently matching `query`, in ascending order.
    ///
    /// Evaluated from scratch on every call.
    #[must_use]
    pub fn query(&self, query: &Query) -> Vec<Entity> {
        self.entities
            .iter()
            .filter(|(_, data)| {
                query.matches(|ty| data.components.contains_key(&ty))
            })
            .map(|(entity, _)| *entity)
            .collect()
    }
}
