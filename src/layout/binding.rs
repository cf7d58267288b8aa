//! Bindings: relations tied to concrete entities
//!
//! A [`Binding`] reads like a sentence about the entity it will be attached
//! to: "my left edge is 12 right of the container's left edge". Attaching it
//! to a floating entity produces an [`AttachedBinding`] holding the derived
//! equation
//!
//! ```text
//! floating.position [+ k*floating.size] - fixed.position [- k*fixed.size] = ±distance
//! ```
//!
//! and the single unknown that equation is considered to define.

use std::fmt;

use log::debug;

use super::equation::LinearEquation;
use super::error::LayoutError;
use super::ports::Ancestry;
use super::position::RelativePosition;
use super::types::{Direction, Edge, Entity, UnknownKind};
use super::unknown::{Unknown, UnknownRegistry};

/// Which unknown an attached binding defines
///
/// Every binding starts out positional. A right, bottom or center binding
/// that collides with another binding over the same position can be promoted
/// once to define the entity's width or height instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnknownRole {
    Positional,
    Dimensional,
}

/// A relation plus the entity it is measured from
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    position: RelativePosition,
    /// `None` resolves to the floating entity's container at attach time
    fixed: Option<Entity>,
}

impl Binding {
    pub fn new(
        my_edge: Edge,
        distance: f64,
        direction: Direction,
        fixed_edge: Edge,
        fixed: Entity,
    ) -> Self {
        Self::from_position(
            RelativePosition::new(my_edge, distance, direction, fixed_edge),
            Some(fixed),
        )
    }

    /// A binding measured from whatever contains the floating entity
    pub fn on_container(my_edge: Edge, distance: f64, direction: Direction, fixed_edge: Edge) -> Self {
        Self::from_position(
            RelativePosition::new(my_edge, distance, direction, fixed_edge),
            None,
        )
    }

    pub fn from_position(position: RelativePosition, fixed: Option<Entity>) -> Self {
        Self { position, fixed }
    }

    pub fn position(&self) -> &RelativePosition {
        &self.position
    }

    pub fn fixed(&self) -> Option<&Entity> {
        self.fixed.as_ref()
    }

    /// Retarget this binding; copies already added to a constraint set keep
    /// their own fixed entity
    pub fn set_fixed(&mut self, fixed: Option<Entity>) {
        self.fixed = fixed;
    }

    pub fn is_valid(&self) -> bool {
        self.position.is_valid()
    }

    /// True unless the bound edge is the left or top edge, i.e. the binding
    /// could define a width or height instead of a position
    pub fn has_dimensional_unknown(&self) -> bool {
        !matches!(self.position.my_edge(), Edge::Left | Edge::Top)
    }

    /// Attach to a floating entity with no nesting information
    pub fn attach(
        &self,
        floating: &Entity,
        registry: &UnknownRegistry,
    ) -> Result<AttachedBinding, LayoutError> {
        self.attach_within(floating, registry, &super::ports::NoAncestors)
    }

    /// Attach to a floating entity, deriving the positional equation
    ///
    /// An unset fixed entity becomes the container, and so does a fixed
    /// entity that encloses the floating one from further out (binding to a
    /// window instead of its content pane).
    pub fn attach_within(
        &self,
        floating: &Entity,
        registry: &UnknownRegistry,
        ancestry: &dyn Ancestry,
    ) -> Result<AttachedBinding, LayoutError> {
        if !self.is_valid() {
            return Err(LayoutError::invalid_relation(floating.clone(), self.clone()));
        }

        let fixed = match &self.fixed {
            None => Entity::Container,
            Some(entity) if !entity.is_container() && ancestry.is_ancestor(entity, floating) => {
                debug!(
                    "binding of '{}' names enclosing '{}', using its container instead",
                    floating, entity
                );
                Entity::Container
            }
            Some(entity) => entity.clone(),
        };

        let binding = Binding {
            position: self.position,
            fixed: Some(fixed.clone()),
        };
        let equation = derive_equation(&self.position, floating, &fixed, registry);
        let primary = registry.get(
            floating,
            role_kind(self.position.my_edge(), UnknownRole::Positional),
        );

        Ok(AttachedBinding {
            binding,
            floating: floating.clone(),
            fixed,
            role: UnknownRole::Positional,
            equation,
            primary,
        })
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = self
            .fixed
            .as_ref()
            .map(|e| e.name())
            .unwrap_or(Entity::CONTAINER_NAME);
        write!(
            f,
            "{} edge is {} {} {} edge of {}",
            self.position.my_edge(),
            self.position.distance(),
            self.position.direction().preposition(),
            self.position.fixed_edge(),
            fixed
        )
    }
}

/// Kind of unknown an edge defines under a given role
pub fn role_kind(edge: Edge, role: UnknownRole) -> UnknownKind {
    match (edge, role) {
        (Edge::Left, _) => UnknownKind::X,
        (Edge::Top, _) => UnknownKind::Y,
        (Edge::Right | Edge::HorizontalCenter, UnknownRole::Positional) => UnknownKind::X,
        (Edge::Right | Edge::HorizontalCenter, UnknownRole::Dimensional) => UnknownKind::Width,
        (Edge::Bottom | Edge::VerticalCenter, UnknownRole::Positional) => UnknownKind::Y,
        (Edge::Bottom | Edge::VerticalCenter, UnknownRole::Dimensional) => UnknownKind::Height,
    }
}

/// Build the equation of a relation between two concrete entities.
///
/// "My right edge is 10 left of B's left edge" becomes
/// `A.x + A.width - B.x = -10`. Terms accumulate, so a relation between two
/// edges of the same entity cancels its position and leaves a size equation.
fn derive_equation(
    position: &RelativePosition,
    floating: &Entity,
    fixed: &Entity,
    registry: &UnknownRegistry,
) -> LinearEquation {
    let mut equation = LinearEquation::new();

    let my_edge = position.my_edge();
    equation.add_coefficient(
        registry.get(floating, UnknownKind::position(my_edge.axis())),
        1.0,
    );
    if let Some((kind, weight)) = my_edge.size_term() {
        equation.add_coefficient(registry.get(floating, kind), weight);
    }

    let fixed_edge = position.fixed_edge();
    equation.add_coefficient(
        registry.get(fixed, UnknownKind::position(fixed_edge.axis())),
        -1.0,
    );
    if let Some((kind, weight)) = fixed_edge.size_term() {
        equation.add_coefficient(registry.get(fixed, kind), -weight);
    }

    equation.set_rhs(position.signed_distance());
    equation
}

/// A binding attached to its floating entity
///
/// Produced by [`Binding::attach`]; never mutated afterwards. Promotion
/// returns a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedBinding {
    binding: Binding,
    floating: Entity,
    fixed: Entity,
    role: UnknownRole,
    equation: LinearEquation,
    primary: Unknown,
}

impl AttachedBinding {
    /// The binding as attached, with its fixed entity resolved
    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub fn position(&self) -> &RelativePosition {
        &self.binding.position
    }

    pub fn floating(&self) -> &Entity {
        &self.floating
    }

    pub fn fixed(&self) -> &Entity {
        &self.fixed
    }

    pub fn role(&self) -> UnknownRole {
        self.role
    }

    pub fn equation(&self) -> &LinearEquation {
        &self.equation
    }

    /// The unknown this binding's equation defines
    pub fn primary(&self) -> &Unknown {
        &self.primary
    }

    pub fn uses_dimensional_unknown(&self) -> bool {
        self.role == UnknownRole::Dimensional
    }

    pub fn has_dimensional_unknown(&self) -> bool {
        self.binding.has_dimensional_unknown()
    }

    /// Whether this binding can still move to a width/height unknown
    pub fn can_promote(&self) -> bool {
        self.has_dimensional_unknown() && !self.uses_dimensional_unknown()
    }

    /// Copy of this binding defining its width or height instead of its
    /// position, or `None` if it cannot be promoted.
    ///
    /// The equation is unchanged: the right edge still reads
    /// `x + width - fixed = d`, it just becomes the definition of `width`.
    pub fn promoted(&self, registry: &UnknownRegistry) -> Option<AttachedBinding> {
        if !self.can_promote() {
            return None;
        }
        let kind = role_kind(self.binding.position.my_edge(), UnknownRole::Dimensional);
        Some(AttachedBinding {
            role: UnknownRole::Dimensional,
            primary: registry.get(&self.floating, kind),
            ..self.clone()
        })
    }
}

impl fmt::Display for AttachedBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = &self.binding.position;
        write!(
            f,
            "{} edge of {} is {} {} {} edge of {}",
            position.my_edge(),
            self.floating,
            position.distance(),
            position.direction().preposition(),
            position.fixed_edge(),
            self.fixed
        )
    }
}
