//! Core types for the layout engine

use std::fmt;

use serde::Deserialize;

/// One of the six reference lines of an entity's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
    /// The vertical line through the middle of the box (x + width/2)
    HorizontalCenter,
    /// The horizontal line through the middle of the box (y + height/2)
    VerticalCenter,
}

impl Edge {
    pub const ALL: [Edge; 6] = [
        Edge::Left,
        Edge::Top,
        Edge::Right,
        Edge::Bottom,
        Edge::HorizontalCenter,
        Edge::VerticalCenter,
    ];

    /// The axis along which this edge is positioned
    pub fn axis(self) -> Axis {
        match self {
            Edge::Left | Edge::Right | Edge::HorizontalCenter => Axis::Horizontal,
            Edge::Top | Edge::Bottom | Edge::VerticalCenter => Axis::Vertical,
        }
    }

    /// Size term contributed by this edge: `x + 1.0*width` for the right edge,
    /// `x + 0.5*width` for the horizontal center, and so on.
    ///
    /// Left and top edges sit on the position itself and carry no size term.
    pub fn size_term(self) -> Option<(UnknownKind, f64)> {
        match self {
            Edge::Left | Edge::Top => None,
            Edge::Right => Some((UnknownKind::Width, 1.0)),
            Edge::Bottom => Some((UnknownKind::Height, 1.0)),
            Edge::HorizontalCenter => Some((UnknownKind::Width, 0.5)),
            Edge::VerticalCenter => Some((UnknownKind::Height, 0.5)),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::Left => "left",
            Edge::Top => "top",
            Edge::Right => "right",
            Edge::Bottom => "bottom",
            Edge::HorizontalCenter => "horizontal center",
            Edge::VerticalCenter => "vertical center",
        };
        f.write_str(name)
    }
}

/// Spatial relation of the floating edge, seen from the fixed edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Above,
    Right,
    Below,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Above,
        Direction::Right,
        Direction::Below,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Above | Direction::Below => Axis::Vertical,
        }
    }

    /// +1 for directions pointing down/right in screen coordinates, -1 otherwise
    pub fn sign(self) -> f64 {
        match self {
            Direction::Right | Direction::Below => 1.0,
            Direction::Left | Direction::Above => -1.0,
        }
    }

    /// Phrase used when describing a relation: "left of", "below", ...
    pub fn preposition(self) -> &'static str {
        match self {
            Direction::Left => "left of",
            Direction::Above => "above",
            Direction::Right => "right of",
            Direction::Below => "below",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Above => "above",
            Direction::Right => "right",
            Direction::Below => "below",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// The four degrees of freedom of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnknownKind {
    X,
    Y,
    Width,
    Height,
}

impl UnknownKind {
    pub const ALL: [UnknownKind; 4] = [
        UnknownKind::X,
        UnknownKind::Y,
        UnknownKind::Width,
        UnknownKind::Height,
    ];

    /// Position unknown for an axis
    pub fn position(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => UnknownKind::X,
            Axis::Vertical => UnknownKind::Y,
        }
    }

    /// Size unknown for an axis
    pub fn dimension(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => UnknownKind::Width,
            Axis::Vertical => UnknownKind::Height,
        }
    }

    pub fn is_dimension(self) -> bool {
        matches!(self, UnknownKind::Width | UnknownKind::Height)
    }
}

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnknownKind::X => "x",
            UnknownKind::Y => "y",
            UnknownKind::Width => "width",
            UnknownKind::Height => "height",
        };
        f.write_str(name)
    }
}

/// Handle to a positioned, sized object taking part in a layout
///
/// `Container` stands for whatever encloses the laid-out elements. Elements
/// are identified by name; the layout never creates or destroys them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entity {
    Container,
    Element(String),
}

impl Entity {
    /// Name reserved for the container in documents and diagnostics
    pub const CONTAINER_NAME: &'static str = "container";

    pub fn element(name: impl Into<String>) -> Self {
        Entity::Element(name.into())
    }

    /// Resolve a name, mapping the reserved container name to the sentinel
    pub fn named(name: &str) -> Self {
        if name == Self::CONTAINER_NAME {
            Entity::Container
        } else {
            Entity::Element(name.to_string())
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Entity::Container)
    }

    pub fn name(&self) -> &str {
        match self {
            Entity::Container => Self::CONTAINER_NAME,
            Entity::Element(name) => name,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Entity {
    fn from(name: &str) -> Self {
        Entity::named(name)
    }
}

/// Width and height of an entity
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn get(&self, kind: UnknownKind) -> Option<f64> {
        match kind {
            UnknownKind::Width => Some(self.width),
            UnknownKind::Height => Some(self.height),
            UnknownKind::X | UnknownKind::Y => None,
        }
    }
}

/// Solved bounding box of an entity, relative to its container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Coordinate of an edge along its axis
    pub fn edge(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Left => self.x,
            Edge::Top => self.y,
            Edge::Right => self.right(),
            Edge::Bottom => self.bottom(),
            Edge::HorizontalCenter => self.x + self.width / 2.0,
            Edge::VerticalCenter => self.y + self.height / 2.0,
        }
    }

    pub fn set(&mut self, kind: UnknownKind, value: f64) {
        match kind {
            UnknownKind::X => self.x = value,
            UnknownKind::Y => self.y = value,
            UnknownKind::Width => self.width = value,
            UnknownKind::Height => self.height = value,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
