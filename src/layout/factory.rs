//! Ready-made bindings for common arrangements
//!
//! Container-edge bindings keep a margin from the container; bindings between
//! two entities keep a spacing. The `direct_*` and `directly_*` forms use a
//! distance of zero, and the `*_aligned_with` forms line up matching edges.

use std::fmt;

use serde::Deserialize;

use super::binding::Binding;
use super::types::{Direction, Edge, Entity};

/// Distances kept from each side of the container
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Margins {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Margins {
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(8.0)
    }
}

/// Gaps kept between neighbouring entities
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Spacing {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Spacing {
    pub fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::new(4.0, 4.0)
    }
}

/// Builds bindings from a fixed set of margins and spacings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BindingFactory {
    margins: Margins,
    spacing: Spacing,
}

impl BindingFactory {
    pub fn new(margins: Margins, spacing: Spacing) -> Self {
        Self { margins, spacing }
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    pub fn set_spacing(&mut self, spacing: Spacing) {
        self.spacing = spacing;
    }

    pub fn left_edge(&self) -> Binding {
        Binding::on_container(Edge::Left, self.margins.left, Direction::Right, Edge::Left)
    }

    pub fn top_edge(&self) -> Binding {
        Binding::on_container(Edge::Top, self.margins.top, Direction::Below, Edge::Top)
    }

    pub fn right_edge(&self) -> Binding {
        Binding::on_container(Edge::Right, self.margins.right, Direction::Left, Edge::Right)
    }

    pub fn bottom_edge(&self) -> Binding {
        Binding::on_container(Edge::Bottom, self.margins.bottom, Direction::Above, Edge::Bottom)
    }

    pub fn direct_left_edge(&self) -> Binding {
        Binding::on_container(Edge::Left, 0.0, Direction::Right, Edge::Left)
    }

    pub fn direct_top_edge(&self) -> Binding {
        Binding::on_container(Edge::Top, 0.0, Direction::Below, Edge::Top)
    }

    pub fn direct_right_edge(&self) -> Binding {
        Binding::on_container(Edge::Right, 0.0, Direction::Left, Edge::Right)
    }

    pub fn direct_bottom_edge(&self) -> Binding {
        Binding::on_container(Edge::Bottom, 0.0, Direction::Above, Edge::Bottom)
    }

    /// Bottom edge one vertical spacing above the top of `fixed`
    pub fn above(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Bottom, self.spacing.vertical, Direction::Above, Edge::Top, fixed)
    }

    /// Top edge one vertical spacing below the bottom of `fixed`
    pub fn below(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Top, self.spacing.vertical, Direction::Below, Edge::Bottom, fixed)
    }

    /// Right edge one horizontal spacing left of the left edge of `fixed`
    pub fn left_of(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Right, self.spacing.horizontal, Direction::Left, Edge::Left, fixed)
    }

    /// Left edge one horizontal spacing right of the right edge of `fixed`
    pub fn right_of(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Left, self.spacing.horizontal, Direction::Right, Edge::Right, fixed)
    }

    pub fn directly_above(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Bottom, 0.0, Direction::Above, Edge::Top, fixed)
    }

    pub fn directly_below(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Top, 0.0, Direction::Below, Edge::Bottom, fixed)
    }

    pub fn directly_left_of(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Right, 0.0, Direction::Left, Edge::Left, fixed)
    }

    pub fn directly_right_of(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Left, 0.0, Direction::Right, Edge::Right, fixed)
    }

    pub fn left_aligned_with(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Left, 0.0, Direction::Right, Edge::Left, fixed)
    }

    pub fn right_aligned_with(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Right, 0.0, Direction::Left, Edge::Right, fixed)
    }

    pub fn top_aligned_with(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Top, 0.0, Direction::Below, Edge::Top, fixed)
    }

    pub fn bottom_aligned_with(&self, fixed: Entity) -> Binding {
        Binding::new(Edge::Bottom, 0.0, Direction::Above, Edge::Bottom, fixed)
    }

    pub fn horizontally_centered_with(&self, fixed: Entity) -> Binding {
        Binding::new(
            Edge::HorizontalCenter,
            0.0,
            Direction::Right,
            Edge::HorizontalCenter,
            fixed,
        )
    }

    pub fn vertically_centered_with(&self, fixed: Entity) -> Binding {
        Binding::new(
            Edge::VerticalCenter,
            0.0,
            Direction::Below,
            Edge::VerticalCenter,
            fixed,
        )
    }

    /// Build a named preset. Returns `None` when the preset needs a target
    /// and none was given.
    pub fn preset(&self, preset: Preset, target: Option<Entity>) -> Option<Binding> {
        let binding = match preset {
            Preset::LeftEdge => self.left_edge(),
            Preset::TopEdge => self.top_edge(),
            Preset::RightEdge => self.right_edge(),
            Preset::BottomEdge => self.bottom_edge(),
            Preset::DirectLeftEdge => self.direct_left_edge(),
            Preset::DirectTopEdge => self.direct_top_edge(),
            Preset::DirectRightEdge => self.direct_right_edge(),
            Preset::DirectBottomEdge => self.direct_bottom_edge(),
            Preset::Above => self.above(target?),
            Preset::Below => self.below(target?),
            Preset::LeftOf => self.left_of(target?),
            Preset::RightOf => self.right_of(target?),
            Preset::DirectlyAbove => self.directly_above(target?),
            Preset::DirectlyBelow => self.directly_below(target?),
            Preset::DirectlyLeftOf => self.directly_left_of(target?),
            Preset::DirectlyRightOf => self.directly_right_of(target?),
            Preset::LeftAlignedWith => self.left_aligned_with(target?),
            Preset::RightAlignedWith => self.right_aligned_with(target?),
            Preset::TopAlignedWith => self.top_aligned_with(target?),
            Preset::BottomAlignedWith => self.bottom_aligned_with(target?),
            Preset::HorizontallyCenteredWith => self.horizontally_centered_with(target?),
            Preset::VerticallyCenteredWith => self.vertically_centered_with(target?),
        };
        Some(binding)
    }
}

/// Names of the factory builders, as written in layout documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    LeftEdge,
    TopEdge,
    RightEdge,
    BottomEdge,
    DirectLeftEdge,
    DirectTopEdge,
    DirectRightEdge,
    DirectBottomEdge,
    Above,
    Below,
    LeftOf,
    RightOf,
    DirectlyAbove,
    DirectlyBelow,
    DirectlyLeftOf,
    DirectlyRightOf,
    LeftAlignedWith,
    RightAlignedWith,
    TopAlignedWith,
    BottomAlignedWith,
    HorizontallyCenteredWith,
    VerticallyCenteredWith,
}

impl Preset {
    /// True for presets measured from another entity rather than the container
    pub fn needs_target(self) -> bool {
        !matches!(
            self,
            Preset::LeftEdge
                | Preset::TopEdge
                | Preset::RightEdge
                | Preset::BottomEdge
                | Preset::DirectLeftEdge
                | Preset::DirectTopEdge
                | Preset::DirectRightEdge
                | Preset::DirectBottomEdge
        )
    }

    fn name(self) -> &'static str {
        match self {
            Preset::LeftEdge => "left_edge",
            Preset::TopEdge => "top_edge",
            Preset::RightEdge => "right_edge",
            Preset::BottomEdge => "bottom_edge",
            Preset::DirectLeftEdge => "direct_left_edge",
            Preset::DirectTopEdge => "direct_top_edge",
            Preset::DirectRightEdge => "direct_right_edge",
            Preset::DirectBottomEdge => "direct_bottom_edge",
            Preset::Above => "above",
            Preset::Below => "below",
            Preset::LeftOf => "left_of",
            Preset::RightOf => "right_of",
            Preset::DirectlyAbove => "directly_above",
            Preset::DirectlyBelow => "directly_below",
            Preset::DirectlyLeftOf => "directly_left_of",
            Preset::DirectlyRightOf => "directly_right_of",
            Preset::LeftAlignedWith => "left_aligned_with",
            Preset::RightAlignedWith => "right_aligned_with",
            Preset::TopAlignedWith => "top_aligned_with",
            Preset::BottomAlignedWith => "bottom_aligned_with",
            Preset::HorizontallyCenteredWith => "horizontally_centered_with",
            Preset::VerticallyCenteredWith => "vertically_centered_with",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
