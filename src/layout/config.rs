//! Configuration for the layout engine

use serde::Deserialize;

use super::factory::{Margins, Spacing};
use super::solver::DEFAULT_SINGULAR_TOLERANCE;

/// Configuration options for a layout session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Solve after every change to the equation system, so an ambiguous
    /// layout is reported where it is introduced
    pub debug: bool,

    /// Relative pivot magnitude below which the system counts as singular
    pub singular_tolerance: f64,

    /// Distances used by container-edge bindings
    pub margins: Margins,

    /// Distances used between neighbouring entities
    pub spacing: Spacing,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            debug: false,
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
            margins: Margins::default(),
            spacing: Spacing::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable eager solving
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the singularity tolerance
    pub fn with_singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = tolerance;
        self
    }

    /// Set the container margins
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the spacing between entities
    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }
}
