//! Narrow interfaces between the layout engine and its host
//!
//! The engine never talks to a widget toolkit directly. A host answers size
//! queries, receives solved values through a sink, and optionally describes
//! which entities enclose the container.

use indexmap::IndexMap;

use super::types::{Bounds, Entity, Size, UnknownKind};

/// Size information supplied by the host
pub trait SizeQuery {
    /// Natural size of an element, used for its width/height defaults
    fn preferred_size(&self, entity: &Entity) -> Size;

    /// Current size of the container being laid out
    fn container_size(&self) -> Size;
}

/// Receives solved values, one unknown at a time
pub trait BoundsSink {
    fn apply(&mut self, entity: &Entity, kind: UnknownKind, value: f64);
}

/// Nesting information used to correct bindings against an outer ancestor
pub trait Ancestry {
    /// True if `candidate` encloses `entity`
    fn is_ancestor(&self, candidate: &Entity, entity: &Entity) -> bool;
}

/// Hosts without nesting: nothing is an ancestor of anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAncestors;

impl Ancestry for NoAncestors {
    fn is_ancestor(&self, _candidate: &Entity, _entity: &Entity) -> bool {
        false
    }
}

/// Named entities enclosing the container, innermost first
///
/// Every element of the layout lives inside the container, so each of these
/// is an ancestor of every element (a window around its content pane).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerChain {
    ancestors: Vec<Entity>,
}

impl ContainerChain {
    pub fn new(ancestors: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            ancestors: ancestors.into_iter().collect(),
        }
    }

    pub fn ancestors(&self) -> &[Entity] {
        &self.ancestors
    }
}

impl Ancestry for ContainerChain {
    fn is_ancestor(&self, candidate: &Entity, entity: &Entity) -> bool {
        if entity.is_container() {
            return self.ancestors.contains(candidate);
        }
        candidate.is_container() || self.ancestors.contains(candidate)
    }
}

/// Fixed sizes keyed by entity, for hosts that know everything up front
#[derive(Debug, Clone, Default)]
pub struct StaticSizes {
    container: Size,
    preferred: IndexMap<Entity, Size>,
}

impl StaticSizes {
    pub fn new(container: Size) -> Self {
        Self {
            container,
            preferred: IndexMap::new(),
        }
    }

    pub fn with_preferred(mut self, entity: Entity, size: Size) -> Self {
        self.preferred.insert(entity, size);
        self
    }

    pub fn set_preferred(&mut self, entity: Entity, size: Size) {
        self.preferred.insert(entity, size);
    }

    pub fn set_container(&mut self, size: Size) {
        self.container = size;
    }
}

impl SizeQuery for StaticSizes {
    fn preferred_size(&self, entity: &Entity) -> Size {
        self.preferred.get(entity).copied().unwrap_or_default()
    }

    fn container_size(&self) -> Size {
        self.container
    }
}

/// Sink collecting bounds per entity, in the order entities were first seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacedBounds {
    bounds: IndexMap<Entity, Bounds>,
}

impl PlacedBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity: &Entity) -> Option<&Bounds> {
        self.bounds.get(entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Entity, &Bounds)> + '_ {
        self.bounds.iter()
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

impl BoundsSink for PlacedBounds {
    fn apply(&mut self, entity: &Entity, kind: UnknownKind, value: f64) {
        self.bounds
            .entry(entity.clone())
            .or_default()
            .set(kind, value);
    }
}
