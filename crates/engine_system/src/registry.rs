//! Priority-ordered participant registries.
//!
//! The scheduler keeps one [`Registry`] of updaters and one of drawers. Both
//! are kept sorted by priority, highest first; the sort is stable, so
//! participants with equal priority stay in registration order.

use std::cell::RefCell;
use std::rc::Rc;

use crate::surface::SurfaceRef;
use crate::system::System;

/// Shared handle to a registered system. A system registered for both
/// capabilities has one handle in each registry, pointing at the same value.
pub type SystemCell = Rc<RefCell<dyn System>>;

/// One registry entry.
#[derive(Clone)]
pub struct Participant {
    name: String,
    priority: i32,
    target: Option<SurfaceRef>,
    system: SystemCell,
}

impl Participant {
    pub(crate) fn new(
        name: String,
        priority: i32,
        target: Option<SurfaceRef>,
        system: SystemCell,
    ) -> Self {
        Self {
            name,
            priority,
            target,
            system,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Private draw target, if any. Always `None` in the update registry.
    #[must_use]
    pub fn target(&self) -> Option<&SurfaceRef> {
        self.target.as_ref()
    }

    pub(crate) fn system(&self) -> &SystemCell {
        &self.system
    }
}

impl std::fmt::Debug for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Participant")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("has_target", &self.target.is_some())
            .finish()
    }
}

/// Participants sorted by descending priority, stable among equals.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    entries: Vec<Participant>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `participant` and restore priority order.
    pub fn insert(&mut self, participant: Participant) {
        self.entries.push(participant);
        self.entries.sort_by(|a, b| b.priority.cmp(&a.priority));
    }

    /// Copy of the current dispatch order.
    ///
    /// A dispatch pass iterates this copy, so participants inserted while the
    /// pass runs are first visited by the next pass.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Participant> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.entries.iter()
    }

    /// Participant names in dispatch order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|p| p.name.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;

    struct Inert;
    impl System for Inert {}

    fn participant(name: &str, priority: i32) -> Participant {
        let system: SystemCell = Rc::new(RefCell::new(Inert));
        Participant::new(name.to_string(), priority, None, system)
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn test_sorted_by_descending_priority() {
        let mut registry = Registry::new();
        registry.insert(participant("low", -5));
        registry.insert(participant("high", 10));
        registry.insert(participant("mid", 0));
        assert_eq!(registry.names(), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_equal_priorities_keep_insertion_order() {
        let mut registry = Registry::new();
        for name in ["a", "b", "c"] {
            registry.insert(participant(name, 1));
        }
        registry.insert(participant("first", 2));
        registry.insert(participant("d", 1));
        assert_eq!(registry.names(), vec!["first", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut registry = Registry::new();
        registry.insert(participant("a", 0));
        let pass = registry.snapshot();
        registry.insert(participant("b", 5));
        assert_eq!(pass.len(), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["b", "a"]);
    }

    #[test]
    fn test_target_is_kept() {
        let target = Surface::new(2, 2).into_shared();
        let system: SystemCell = Rc::new(RefCell::new(Inert));
        let mut registry = Registry::new();
        let hud = Participant::new("hud".into(), 0, Some(target.clone()), system);
        registry.insert(hud);
        let entry = registry.iter().next().unwrap();
        assert!(Rc::ptr_eq(entry.target().unwrap(), &target));
        assert_eq!(entry.priority(), 0);
        assert_eq!(entry.name(), "hud");
    }
}
