//! Queries: predicates over the component set of an entity.
//!
//! A [`Query`] is a conjunction of [`QueryFilter`]s. The world evaluates it
//! against every live entity on each call; nothing about the match set is
//! cached here.

use crate::component::{Component, ComponentTypeId};

/// One condition an entity's component set must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFilter {
    /// The entity has this component.
    With(ComponentTypeId),
    /// The entity does not have this component.
    Without(ComponentTypeId),
    /// The entity has at least one of these components.
    AnyOf(Vec<ComponentTypeId>),
}

impl QueryFilter {
    fn matches(&self, has: &impl Fn(ComponentTypeId) -> bool) -> bool {
        match self {
            Self::With(ty) => has(*ty),
            Self::Without(ty) => !has(*ty),
            Self::AnyOf(types) => types.iter().any(|ty| has(*ty)),
        }
    }
}

/// A conjunction of filters. The empty query matches every entity.
///
/// ```rust
/// use engine_component::{Component, Query};
///
/// struct Hue;
/// impl Component for Hue { fn type_name() -> &'static str { "Hue" } }
/// struct Frozen;
/// impl Component for Frozen { fn type_name() -> &'static str { "Frozen" } }
///
/// let query = Query::new().with::<Hue>().without::<Frozen>();
/// assert_eq!(query.filters().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<QueryFilter>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require component `T`.
    #[must_use]
    pub fn with<T: Component>(self) -> Self {
        self.filter(QueryFilter::With(T::component_type_id()))
    }

    /// Exclude entities carrying component `T`.
    #[must_use]
    pub fn without<T: Component>(self) -> Self {
        self.filter(QueryFilter::Without(T::component_type_id()))
    }

    #[must_use]
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn filters(&self) -> &[QueryFilter] {
        &self.filters
    }

    /// Required component types, in declaration order.
    #[must_use]
    pub fn required_types(&self) -> Vec<ComponentTypeId> {
        self.filters
            .iter()
            .filter_map(|f| match f {
                QueryFilter::With(ty) => Some(*ty),
                _ => None,
            })
            .collect()
    }

    /// Evaluate the query given a membership test for the entity's components.
    pub fn matches(&self, has: impl Fn(ComponentTypeId) -> bool) -> bool {
        self.filters.iter().all(|f| f.matches(&has))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn set(ids: &[u64]) -> BTreeSet<ComponentTypeId> {
        ids.iter().map(|&id| ComponentTypeId(id)).collect()
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let q = Query::new();
        assert!(q.matches(|_| false));
        assert!(q.matches(|_| true));
    }

    #[test]
    fn test_with_and_without() {
        let q = Query::new()
            .filter(QueryFilter::With(ComponentTypeId(1)))
            .filter(QueryFilter::Without(ComponentTypeId(2)));

        let a = set(&[1]);
        let b = set(&[1, 2]);
        let c = set(&[3]);
        assert!(q.matches(|ty| a.contains(&ty)));
        assert!(!q.matches(|ty| b.contains(&ty)));
        assert!(!q.matches(|ty| c.contains(&ty)));
    }

    #[test]
    fn test_any_of() {
        let q = Query::new().filter(QueryFilter::AnyOf(vec![
            ComponentTypeId(4),
            ComponentTypeId(5),
        ]));
        let a = set(&[5]);
        let b = set(&[6]);
        assert!(q.matches(|ty| a.contains(&ty)));
        assert!(!q.matches(|ty| b.contains(&ty)));
    }

    #[test]
    fn test_required_types() {
        let q = Query::new()
            .filter(QueryFilter::With(ComponentTypeId(1)))
            .filter(QueryFilter::Without(ComponentTypeId(2)))
            .filter(QueryFilter::With(ComponentTypeId(3)));
        assert_eq!(
            q.required_types(),
            vec![ComponentTypeId(1), ComponentTypeId(3)]
        );
    }
}
