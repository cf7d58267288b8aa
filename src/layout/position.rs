//! Edge-to-edge relations

use std::fmt;

use super::types::{Axis, Direction, Edge};

/// "My edge is `distance` units in `direction` from the fixed edge."
///
/// Immutable once built, so one position can be shared by many bindings
/// against different fixed entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativePosition {
    my_edge: Edge,
    distance: f64,
    direction: Direction,
    fixed_edge: Edge,
}

impl RelativePosition {
    pub fn new(my_edge: Edge, distance: f64, direction: Direction, fixed_edge: Edge) -> Self {
        Self {
            my_edge,
            distance,
            direction,
            fixed_edge,
        }
    }

    pub fn my_edge(&self) -> Edge {
        self.my_edge
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn fixed_edge(&self) -> Edge {
        self.fixed_edge
    }

    /// Axis of the relation, taken from its direction
    pub fn axis(&self) -> Axis {
        self.direction.axis()
    }

    /// A relation only makes sense when both edges and the direction lie on
    /// the same axis ("my left edge is 10 below your top edge" does not).
    pub fn is_valid(&self) -> bool {
        let axis = self.direction.axis();
        self.my_edge.axis() == axis && self.fixed_edge.axis() == axis
    }

    /// Signed right-hand side: positive towards the right and downwards
    pub fn signed_distance(&self) -> f64 {
        self.direction.sign() * self.distance
    }
}

impl fmt::Display for RelativePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} edge is {} {} {} edge",
            self.my_edge,
            self.distance,
            self.direction.preposition(),
            self.fixed_edge
        )
    }
}
