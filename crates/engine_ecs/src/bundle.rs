//! Component bundles for [`World::spawn_with`](crate::World::spawn_with).

use std::any::Any;

use engine_component::{Component, ComponentMeta, ComponentTypeId};

/// A fixed set of components spawned together. Implemented for tuples of up
/// to eight components.
pub trait Bundle: 'static {
    /// Registration records of every component in the bundle.
    fn metas() -> Vec<ComponentMeta>;

    fn into_components(self) -> Vec<(ComponentTypeId, Box<dyn Any>)>;
}

macro_rules! impl_bundle {
    ($($name:ident),+) => {
        impl<$($name: Component),+> Bundle for ($($name,)+) {
            fn metas() -> Vec<ComponentMeta> {
                vec![$($name::meta()),+]
            }

            #[allow(non_snake_case)]
            fn into_components(self) -> Vec<(ComponentTypeId, Box<dyn Any>)> {
                let ($($name,)+) = self;
                vec![$(($name::component_type_id(), Box::new($name) as Box<dyn Any>)),+]
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);
