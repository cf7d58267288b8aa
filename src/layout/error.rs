//! Error types for the layout engine

use thiserror::Error;

use super::binding::{AttachedBinding, Binding};
use super::types::Entity;
use super::unknown::Unknown;

/// Errors that can occur while attaching constraints or solving a layout
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A relation whose edges and direction lie on different axes
    #[error("invalid relation on '{floating}': \"{binding}\" is not physically possible")]
    InvalidRelation {
        floating: Entity,
        binding: Box<Binding>,
    },

    /// Two bindings of one constraint set claim the same unknown and neither
    /// can move to a width/height unknown
    #[error(
        "inconsistent constraints: \"{binding}\" conflicts with \"{conflicting}\" over {unknown}"
    )]
    InconsistentConstraint {
        unknown: Unknown,
        binding: Box<AttachedBinding>,
        conflicting: Box<AttachedBinding>,
    },

    /// The assembled system has no unique solution
    #[error(
        "ambiguous layout: {} has no unique value among {} unknowns",
        describe_pivot(.pivot),
        .unknowns
    )]
    AmbiguousLayout {
        unknowns: usize,
        pivot: Option<Unknown>,
    },

    /// A solved value refers to an entity that is not part of the layout
    #[error("unknown entity '{entity}': it has not been added to this layout")]
    UnknownEntity { entity: Entity },

    /// The container was added as a member of its own layout
    #[error("the container cannot be laid out inside itself")]
    ContainerAsMember,
}

fn describe_pivot(pivot: &Option<Unknown>) -> String {
    match pivot {
        Some(unknown) => unknown.to_string(),
        None => "the system".to_string(),
    }
}

impl LayoutError {
    /// Create an invalid relation error
    pub fn invalid_relation(floating: Entity, binding: Binding) -> Self {
        Self::InvalidRelation {
            floating,
            binding: Box::new(binding),
        }
    }

    /// Create an inconsistent constraint error
    pub fn inconsistent(
        unknown: Unknown,
        binding: AttachedBinding,
        conflicting: AttachedBinding,
    ) -> Self {
        Self::InconsistentConstraint {
            unknown,
            binding: Box::new(binding),
            conflicting: Box::new(conflicting),
        }
    }

    /// Create an ambiguous layout error
    pub fn ambiguous(unknowns: usize, pivot: Option<Unknown>) -> Self {
        Self::AmbiguousLayout { unknowns, pivot }
    }

    /// Create an unknown entity error
    pub fn unknown_entity(entity: Entity) -> Self {
        Self::UnknownEntity { entity }
    }

    /// Entities named by this error, for diagnostics
    pub fn entities(&self) -> Vec<&Entity> {
        match self {
            Self::InvalidRelation { floating, .. } => vec![floating],
            Self::InconsistentConstraint {
                binding,
                conflicting,
                ..
            } => {
                let mut entities = Vec::new();
                for entity in [
                    binding.floating(),
                    binding.fixed(),
                    conflicting.floating(),
                    conflicting.fixed(),
                ] {
                    if !entities.contains(&entity) {
                        entities.push(entity);
                    }
                }
                entities
            }
            Self::AmbiguousLayout { pivot, .. } => {
                pivot.iter().map(|unknown| unknown.entity()).collect()
            }
            Self::UnknownEntity { entity } => vec![entity],
            Self::ContainerAsMember => vec![&Entity::Container],
        }
    }
}
