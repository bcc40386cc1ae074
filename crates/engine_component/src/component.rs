//! The [`Component`] trait and component type identity.
//!
//! Components are plain data. Their identity is a [`ComponentTypeId`] derived
//! from the component's declared name with FNV-1a (64 bit), so the same name
//! always maps to the same id across runs and builds.

use std::any::TypeId;

/// Stable identifier of a component type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Hash a component name with FNV-1a 64.
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// The id of component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::type_name())
    }
}

/// Registration record the world keeps for every component type it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentMeta {
    pub type_id: ComponentTypeId,
    pub name: &'static str,
    /// The concrete Rust type, used to detect two types claiming one name.
    pub rust_type: TypeId,
}

/// Plain data that can be attached to an entity.
///
/// ```rust
/// use engine_component::Component;
///
/// struct Hue {
///     colorful: bool,
///     value: f64,
/// }
///
/// impl Component for Hue {
///     fn type_name() -> &'static str { "Hue" }
/// }
/// ```
pub trait Component: 'static {
    /// Name the component is registered under. Must be unique per world.
    fn type_name() -> &'static str;

    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::type_name())
    }

    fn meta() -> ComponentMeta
    where
        Self: Sized,
    {
        ComponentMeta {
            type_id: Self::component_type_id(),
            name: Self::type_name(),
            rust_type: TypeId::of::<Self>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Hue;
    impl Component for Hue {
        fn type_name() -> &'static str {
            "Hue"
        }
    }

    struct Velocity;
    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    #[test]
    fn test_type_id_follows_name() {
        assert_eq!(Hue::component_type_id(), ComponentTypeId::from_name("Hue"));
        assert_eq!(ComponentTypeId::of::<Hue>(), Hue::component_type_id());
        assert_ne!(Hue::component_type_id(), Velocity::component_type_id());
    }

    #[test]
    fn test_fnv_empty_name_is_offset_basis() {
        assert_eq!(
            ComponentTypeId::from_name(""),
            ComponentTypeId(0xcbf2_9ce4_8422_2325)
        );
    }

    #[test]
    fn test_fnv_known_vector() {
        // FNV-1a 64 of "a".
        assert_eq!(
            ComponentTypeId::from_name("a"),
            ComponentTypeId(0xaf63_dc4c_8601_ec8c)
        );
    }

    #[test]
    fn test_meta() {
        let meta = Hue::meta();
        assert_eq!(meta.name, "Hue");
        assert_eq!(meta.type_id, Hue::component_type_id());
        assert_eq!(meta.rust_type, TypeId::of::<Hue>());
    }
}
