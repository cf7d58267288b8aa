//! Constraint sets: the bindings of one floating entity
//!
//! Attaching a set decides which unknown each binding defines. Each unknown
//! may be defined by one binding only; when two bindings collide over a
//! position, a right/bottom/center binding is moved to the entity's width or
//! height instead. That is what turns "left edge at 12, right edge 15 from
//! the right" into a position plus a stretching width.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::binding::{AttachedBinding, Binding};
use super::equation::LinearEquation;
use super::error::LayoutError;
use super::ports::{Ancestry, NoAncestors};
use super::types::{Axis, Entity};
use super::unknown::{Unknown, UnknownRegistry};

/// Ordered bindings for one floating entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    bindings: Vec<Binding>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of a binding; later changes to `binding` do not reach
    /// this set
    pub fn add(&mut self, binding: &Binding) -> &mut Self {
        self.bindings.push(binding.clone());
        self
    }

    /// Builder form of [`ConstraintSet::add`]
    pub fn with(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Attach every binding to `floating`, with no nesting information
    pub fn attach(
        &self,
        floating: &Entity,
        registry: &UnknownRegistry,
    ) -> Result<AttachedConstraints, LayoutError> {
        self.attach_within(floating, registry, &NoAncestors)
    }

    /// Attach every binding to `floating` and resolve ownership conflicts.
    ///
    /// Bindings are processed in insertion order. When a binding claims an
    /// unknown already held by an earlier one, the later binding is promoted
    /// if it can be; otherwise the earlier one is. A second collision after
    /// promotion, or a collision between two unpromotable bindings, is an
    /// [`LayoutError::InconsistentConstraint`].
    pub fn attach_within(
        &self,
        floating: &Entity,
        registry: &UnknownRegistry,
        ancestry: &dyn Ancestry,
    ) -> Result<AttachedConstraints, LayoutError> {
        let mut attached: Vec<AttachedBinding> = Vec::with_capacity(self.bindings.len());
        let mut claimed: HashMap<Unknown, usize> = HashMap::new();

        for binding in &self.bindings {
            let mut current = binding.attach_within(floating, registry, ancestry)?;

            if let Some(&holder) = claimed.get(current.primary()) {
                if let Some(promoted) = current.promoted(registry) {
                    debug!(
                        "'{}' and '{}' both claim {}, promoting the later to {}",
                        attached[holder],
                        current,
                        current.primary(),
                        promoted.primary()
                    );
                    if let Some(&other) = claimed.get(promoted.primary()) {
                        return Err(LayoutError::inconsistent(
                            promoted.primary().clone(),
                            promoted,
                            attached[other].clone(),
                        ));
                    }
                    current = promoted;
                } else if let Some(promoted) = attached[holder].promoted(registry) {
                    debug!(
                        "'{}' and '{}' both claim {}, promoting the earlier to {}",
                        attached[holder],
                        current,
                        current.primary(),
                        promoted.primary()
                    );
                    if let Some(&other) = claimed.get(promoted.primary()) {
                        return Err(LayoutError::inconsistent(
                            promoted.primary().clone(),
                            promoted,
                            attached[other].clone(),
                        ));
                    }
                    claimed.insert(promoted.primary().clone(), holder);
                    attached[holder] = promoted;
                } else {
                    return Err(LayoutError::inconsistent(
                        current.primary().clone(),
                        current,
                        attached[holder].clone(),
                    ));
                }
            }

            claimed.insert(current.primary().clone(), attached.len());
            attached.push(current);
        }

        debug!(
            "attached {} binding(s) to '{}'",
            attached.len(),
            floating
        );

        Ok(AttachedConstraints {
            floating: floating.clone(),
            bindings: attached,
        })
    }
}

impl FromIterator<Binding> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.bindings.iter().map(|b| b.to_string()).collect();
        write!(f, "[{}]", parts.join("; "))
    }
}

/// Result of attaching a constraint set: one equation and one primary
/// unknown per binding, in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedConstraints {
    floating: Entity,
    bindings: Vec<AttachedBinding>,
}

impl AttachedConstraints {
    pub fn floating(&self) -> &Entity {
        &self.floating
    }

    pub fn bindings(&self) -> &[AttachedBinding] {
        &self.bindings
    }

    pub fn equations(&self) -> impl Iterator<Item = &LinearEquation> + '_ {
        self.bindings.iter().map(|b| b.equation())
    }

    pub fn unknowns(&self) -> impl Iterator<Item = &Unknown> + '_ {
        self.bindings.iter().map(|b| b.primary())
    }

    /// (primary unknown, defining equation) pairs
    pub fn definitions(&self) -> impl Iterator<Item = (&Unknown, &LinearEquation)> + '_ {
        self.bindings.iter().map(|b| (b.primary(), b.equation()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// True if some binding on this axis defines a width or height, meaning
    /// the entity stretches with whatever it is bound to
    pub fn is_dynamic(&self, axis: Axis) -> bool {
        self.bindings
            .iter()
            .any(|b| b.uses_dimensional_unknown() && b.position().axis() == axis)
    }

    pub fn uses_dynamic_width(&self) -> bool {
        self.is_dynamic(Axis::Horizontal)
    }

    pub fn uses_dynamic_height(&self) -> bool {
        self.is_dynamic(Axis::Vertical)
    }

    /// Fixed entities these bindings are measured from
    pub fn references(&self) -> Vec<&Entity> {
        let mut entities: Vec<&Entity> = Vec::new();
        for binding in &self.bindings {
            if !entities.contains(&binding.fixed()) {
                entities.push(binding.fixed());
            }
        }
        entities
    }
}
