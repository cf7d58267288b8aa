//! Linear equations over layout unknowns

use std::fmt;

use indexmap::IndexMap;

use super::unknown::Unknown;

/// A linear equation `sum(coefficient * unknown) = rhs`
pub trait Equation {
    /// Coefficients in the order the unknowns were introduced
    fn terms(&self) -> Vec<(Unknown, f64)>;

    fn rhs(&self) -> f64;

    /// Coefficient of an unknown, `None` if the equation never mentions it
    fn coefficient(&self, unknown: &Unknown) -> Option<f64> {
        self.terms()
            .into_iter()
            .find(|(u, _)| u == unknown)
            .map(|(_, c)| c)
    }
}

/// Ordered coefficient map plus right-hand side
///
/// Setting a coefficient to zero keeps the unknown in the equation; only
/// unknowns that were set are ever iterated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearEquation {
    coefficients: IndexMap<Unknown, f64>,
    rhs: f64,
}

impl LinearEquation {
    pub fn new() -> Self {
        Self::default()
    }

    /// `unknown = value`, the equation used for identity defaults
    pub fn identity(unknown: Unknown, value: f64) -> Self {
        let mut equation = Self::new();
        equation.set_coefficient(unknown, 1.0);
        equation.set_rhs(value);
        equation
    }

    /// Copy any equation into its concrete form
    pub fn from_equation<E: Equation + ?Sized>(equation: &E) -> Self {
        Self {
            coefficients: equation.terms().into_iter().collect(),
            rhs: equation.rhs(),
        }
    }

    /// Set (or add) the coefficient of an unknown
    pub fn set_coefficient(&mut self, unknown: Unknown, coefficient: f64) {
        self.coefficients.insert(unknown, coefficient);
    }

    /// Add to the coefficient of an unknown, inserting it if absent
    pub fn add_coefficient(&mut self, unknown: Unknown, coefficient: f64) {
        *self.coefficients.entry(unknown).or_insert(0.0) += coefficient;
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn coefficient(&self, unknown: &Unknown) -> Option<f64> {
        self.coefficients.get(unknown).copied()
    }

    pub fn set_rhs(&mut self, rhs: f64) {
        self.rhs = rhs;
    }

    pub fn with_term(mut self, unknown: Unknown, coefficient: f64) -> Self {
        self.set_coefficient(unknown, coefficient);
        self
    }

    pub fn with_rhs(mut self, rhs: f64) -> Self {
        self.rhs = rhs;
        self
    }

    pub fn unknowns(&self) -> impl Iterator<Item = &Unknown> + '_ {
        self.coefficients.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Unknown, f64)> + '_ {
        self.coefficients.iter().map(|(u, c)| (u, *c))
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }
}

impl Equation for LinearEquation {
    fn terms(&self) -> Vec<(Unknown, f64)> {
        self.coefficients
            .iter()
            .map(|(u, c)| (u.clone(), *c))
            .collect()
    }

    fn rhs(&self) -> f64 {
        LinearEquation::rhs(self)
    }

    fn coefficient(&self, unknown: &Unknown) -> Option<f64> {
        LinearEquation::coefficient(self, unknown)
    }
}

impl fmt::Display for LinearEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coefficients.is_empty() {
            return write!(f, "0 = {}", self.rhs);
        }
        for (i, (unknown, coefficient)) in self.coefficients.iter().enumerate() {
            if i == 0 {
                if *coefficient < 0.0 {
                    write!(f, "-")?;
                }
            } else if *coefficient < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            let magnitude = coefficient.abs();
            if magnitude == 1.0 {
                write!(f, "{}", unknown)?;
            } else {
                write!(f, "{}*{}", magnitude, unknown)?;
            }
        }
        write!(f, " = {}", self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{Entity, UnknownKind};
    use crate::layout::unknown::UnknownRegistry;

    #[test]
    fn test_set_coefficient_overwrites_in_place() {
        let registry = UnknownRegistry::new();
        let x = registry.get(&Entity::element("a"), UnknownKind::X);
        let w = registry.get(&Entity::element("a"), UnknownKind::Width);

        let mut equation = LinearEquation::new();
        equation.set_coefficient(x.clone(), 1.0);
        equation.set_coefficient(w.clone(), 1.0);
        equation.set_coefficient(x.clone(), 2.0);

        let order: Vec<_> = equation.unknowns().cloned().collect();
        assert_eq!(order, vec![x.clone(), w]);
        assert_eq!(equation.coefficient(&x), Some(2.0));
    }

    #[test]
    fn test_add_coefficient_accumulates() {
        let registry = UnknownRegistry::new();
        let x = registry.get(&Entity::element("a"), UnknownKind::X);

        let mut equation = LinearEquation::new();
        equation.add_coefficient(x.clone(), 1.0);
        equation.add_coefficient(x.clone(), -1.0);
        assert_eq!(equation.coefficient(&x), Some(0.0));
    }

    #[test]
    fn test_zero_coefficient_is_present() {
        let registry = UnknownRegistry::new();
        let x = registry.get(&Entity::element("a"), UnknownKind::X);
        let y = registry.get(&Entity::element("a"), UnknownKind::Y);

        let equation = LinearEquation::new().with_term(x.clone(), 0.0);
        assert_eq!(equation.coefficient(&x), Some(0.0));
        assert_eq!(equation.coefficient(&y), None);
        assert_eq!(equation.len(), 1);
    }

    #[test]
    fn test_display() {
        let registry = UnknownRegistry::new();
        let a = Entity::element("a");
        let equation = LinearEquation::new()
            .with_term(registry.get(&a, UnknownKind::X), 1.0)
            .with_term(registry.get(&a, UnknownKind::Width), 0.5)
            .with_term(registry.get(&Entity::Container, UnknownKind::X), -1.0)
            .with_rhs(-4.0);
        assert_eq!(equation.to_string(), "a.x + 0.5*a.width - container.x = -4");
    }

    #[test]
    fn test_from_equation_copies_terms() {
        let registry = UnknownRegistry::new();
        let x = registry.get(&Entity::element("a"), UnknownKind::X);
        let original = LinearEquation::identity(x, 7.0);
        let copy = LinearEquation::from_equation(&original);
        assert_eq!(copy, original);
    }
}
