//! Canonical unknowns and the registry that mints them

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;

use super::types::{Entity, UnknownKind};

#[derive(Debug)]
struct UnknownData {
    id: usize,
    entity: Entity,
    kind: UnknownKind,
}

/// One degree of freedom (x, y, width or height) of one entity
///
/// Only an [`UnknownRegistry`] creates unknowns. Within a registry each
/// (entity, kind) pair maps to exactly one allocation. Equality, hashing and
/// ordering go by (entity, kind), so unknowns minted by different registries
/// still agree on identity.
#[derive(Clone)]
pub struct Unknown(Arc<UnknownData>);

impl Unknown {
    pub fn entity(&self) -> &Entity {
        &self.0.entity
    }

    pub fn kind(&self) -> UnknownKind {
        self.0.kind
    }

    /// Registry-assigned id, in order of first request
    pub fn id(&self) -> usize {
        self.0.id
    }

    /// True if both handles point at the same canonical unknown
    pub fn is_same(&self, other: &Unknown) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Unknown {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.kind == other.0.kind && self.0.entity == other.0.entity)
    }
}

impl Eq for Unknown {}

impl Hash for Unknown {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.entity.hash(state);
        self.0.kind.hash(state);
    }
}

impl PartialOrd for Unknown {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Unknown {
    fn cmp(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.0, &other.0) {
            return Ordering::Equal;
        }
        self.0
            .entity
            .cmp(&other.0.entity)
            .then_with(|| self.0.kind.cmp(&other.0.kind))
    }
}

impl fmt::Debug for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown({}#{})", self, self.0.id)
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0.entity, self.0.kind)
    }
}

/// Canonicalizes (entity, kind) pairs for one layout session
///
/// Lookup-or-insert runs under a single lock, so a shared reference can be
/// handed to several threads.
#[derive(Default)]
pub struct UnknownRegistry {
    unknowns: Mutex<IndexMap<(Entity, UnknownKind), Unknown>>,
}

impl UnknownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the canonical unknown for an entity and kind, creating it on first use
    pub fn get(&self, entity: &Entity, kind: UnknownKind) -> Unknown {
        let mut unknowns = self.unknowns.lock();
        if let Some(unknown) = unknowns.get(&(entity.clone(), kind)) {
            return unknown.clone();
        }
        let unknown = Unknown(Arc::new(UnknownData {
            id: unknowns.len(),
            entity: entity.clone(),
            kind,
        }));
        unknowns.insert((entity.clone(), kind), unknown.clone());
        unknown
    }

    /// Number of unknowns minted so far
    pub fn len(&self) -> usize {
        self.unknowns.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.unknowns.lock().is_empty()
    }

    /// Already-minted unknowns of an entity, in creation order
    pub fn unknowns_of(&self, entity: &Entity) -> Vec<Unknown> {
        self.unknowns
            .lock()
            .iter()
            .filter(|((e, _), _)| e == entity)
            .map(|(_, unknown)| unknown.clone())
            .collect()
    }
}

impl fmt::Debug for UnknownRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnknownRegistry")
            .field("len", &self.len())
            .finish()
    }
}
