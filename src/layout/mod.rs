//! Relative layout engine
//!
//! Relations between the edges of entities ("my left edge is 12 right of the
//! container's left edge") are turned into linear equations over each
//! entity's x, y, width and height, and solved as one square system.
//!
//! The pieces, leaves first:
//!
//! - [`RelativePosition`]: an edge, a distance, a direction and another edge
//! - [`Binding`]: a position plus the entity it is measured from
//! - [`ConstraintSet`]: the bindings of one entity; attaching it decides which
//!   unknown each binding defines
//! - [`EquationSystem`]: unknown -> defining equation, solved by LU
//! - [`RelativeLayout`]: a session tying these to a host through the
//!   [`ports`] traits

pub mod binding;
pub mod config;
pub mod constraints;
pub mod engine;
pub mod equation;
pub mod error;
pub mod factory;
pub mod ports;
pub mod position;
pub mod solver;
pub mod types;
pub mod unknown;

pub use binding::{AttachedBinding, Binding, UnknownRole};
pub use config::LayoutConfig;
pub use constraints::{AttachedConstraints, ConstraintSet};
pub use engine::RelativeLayout;
pub use equation::{Equation, LinearEquation};
pub use error::LayoutError;
pub use factory::{BindingFactory, Margins, Preset, Spacing};
pub use ports::{Ancestry, BoundsSink, ContainerChain, NoAncestors, PlacedBounds, SizeQuery, StaticSizes};
pub use position::RelativePosition;
pub use solver::{is_debug_mode, set_debug_mode, EquationSystem, Solution};
pub use types::*;
pub use unknown::{Unknown, UnknownRegistry};
