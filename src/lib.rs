//! Relative Layout - a declarative spatial-constraint engine
//!
//! Entities are placed by relations between their edges ("my right edge is
//! 15 left of the container's right edge"). Each relation becomes a linear
//! equation over x, y, width and height; the equations of all entities are
//! solved together as one square system.
//!
//! # Example
//!
//! ```rust
//! use relative_layout::layout::{
//!     Binding, ConstraintSet, Direction, Edge, Entity, RelativeLayout, Size, StaticSizes,
//! };
//!
//! let constraints = ConstraintSet::new()
//!     .with(Binding::on_container(Edge::Left, 12.0, Direction::Right, Edge::Left))
//!     .with(Binding::on_container(Edge::Right, 15.0, Direction::Left, Edge::Right));
//!
//! let mut layout = RelativeLayout::default();
//! let field = Entity::element("field");
//! layout.add(field.clone(), &constraints).unwrap();
//!
//! let sizes = StaticSizes::new(Size::new(600.0, 200.0));
//! let solution = layout.solve(&sizes).unwrap();
//! let bounds = layout.bounds(&solution, &field).unwrap();
//! assert!((bounds.width - 573.0).abs() < 1e-9);
//! ```

pub mod document;
pub mod error;
pub mod layout;

pub use document::{EntityDecl, LayoutDocument};
pub use error::DocumentError;
pub use layout::{LayoutConfig, LayoutError, PlacedBounds, RelativeLayout, Solution};

use thiserror::Error;

/// Errors that can occur while solving a layout document
#[derive(Debug, Error)]
pub enum SolveError {
    /// Error reading or checking the document
    #[error("{0}")]
    Document(#[from] DocumentError),

    /// Error attaching constraints or solving the system
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// A solved document: every entity's bounds plus the session that produced
/// them
#[derive(Debug)]
pub struct SolvedDocument {
    pub document: LayoutDocument,
    pub layout: RelativeLayout,
    pub solution: Solution,
    pub bounds: PlacedBounds,
}

/// Parse and solve a layout document
///
/// # Example
///
/// ```rust
/// use relative_layout::layout::Entity;
///
/// let solved = relative_layout::solve_document(r#"
///     [container]
///     width = 200
///     height = 100
///
///     [[entity]]
///     name = "ok"
///     width = 40
///     height = 20
///     bindings = [{ preset = "right_edge" }, { preset = "bottom_edge" }]
/// "#).unwrap();
///
/// let ok = solved.bounds.get(&Entity::element("ok")).unwrap();
/// assert_eq!((ok.x, ok.y), (152.0, 72.0));
/// ```
pub fn solve_document(source: &str) -> Result<SolvedDocument, SolveError> {
    let document = LayoutDocument::parse(source)?;
    solve(document)
}

/// Solve an already parsed document
pub fn solve(document: LayoutDocument) -> Result<SolvedDocument, SolveError> {
    let mut layout = document.layout()?;
    let mut bounds = PlacedBounds::new();
    let solution = layout.layout(&document.sizes(), &mut bounds)?;
    Ok(SolvedDocument {
        document,
        layout,
        solution,
        bounds,
    })
}
