//! Entity identifiers and their allocator.
//!
//! An [`Entity`] is an opaque `u64` handle. It owns nothing; the world maps
//! it to whatever components have been attached to it.

/// A handle to an entity living in a world.
///
/// Handles are never reused by a single [`EntityAllocator`], so a handle to a
/// despawned entity stays dead forever instead of aliasing a newer entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(pub u64);

impl Entity {
    /// Sentinel that never refers to a live entity.
    pub const INVALID: Entity = Entity(0);

    /// Wrap a raw identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns `false` for [`Entity::INVALID`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Hands out monotonically increasing entity handles, starting at 1.
#[derive(Debug)]
pub struct EntityAllocator {
    next_id: u64,
}

impl EntityAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocate the next handle.
    pub fn allocate(&mut self) -> Entity {
        let entity = Entity(self.next_id);
        self.next_id += 1;
        entity
    }

    /// Number of handles handed out so far, live or not.
    #[must_use]
    pub fn allocated(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sentinel() {
        assert!(!Entity::INVALID.is_valid());
        assert!(Entity::from_raw(7).is_valid());
        assert_eq!(Entity::from_raw(7).id(), 7);
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut alloc = EntityAllocator::new();
        let ids: Vec<u64> = (0..4).map(|_| alloc.allocate().id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(alloc.allocated(), 4);
    }

    #[test]
    fn test_display() {
        assert_eq!(Entity(12).to_string(), "Entity(12)");
    }
}
