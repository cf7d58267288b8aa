//! Equation system assembly and dense LU solving
//!
//! An [`EquationSystem`] maps each unknown to the equation that defines it.
//! Solving collects every unknown mentioned by any definition, gives the
//! undefined ones an identity row (`u = 0`), and factors the resulting square
//! matrix with partial pivoting.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use nalgebra::{DMatrix, DVector};

use super::equation::{Equation, LinearEquation};
use super::error::LayoutError;
use super::types::{Entity, UnknownKind};
use super::unknown::Unknown;

/// Relative pivot magnitude at or below which a system counts as singular
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-10;

static DEBUG_MODE: AtomicBool = AtomicBool::new(false);

/// Turn eager solving on or off for every equation system in the process.
///
/// While enabled, each add/remove solves immediately so an ambiguous layout
/// is reported at the mutation that caused it instead of at the next solve.
pub fn set_debug_mode(enabled: bool) {
    DEBUG_MODE.store(enabled, Ordering::SeqCst);
}

pub fn is_debug_mode() -> bool {
    DEBUG_MODE.load(Ordering::SeqCst)
}

/// Unknown -> defining equation, at most one equation per unknown
#[derive(Debug, Clone)]
pub struct EquationSystem {
    definitions: IndexMap<Unknown, LinearEquation>,
    eager: bool,
    tolerance: f64,
}

impl Default for EquationSystem {
    fn default() -> Self {
        Self {
            definitions: IndexMap::new(),
            eager: false,
            tolerance: DEFAULT_SINGULAR_TOLERANCE,
        }
    }
}

impl EquationSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve after every mutation, regardless of the process-wide toggle
    pub fn with_eager_solve(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn is_eager(&self) -> bool {
        self.eager || is_debug_mode()
    }

    /// Make `equation` the sole definition of `unknown`, replacing any
    /// previous one.
    ///
    /// In eager mode the system is solved right away; the definition stays in
    /// place even when that solve fails.
    pub fn add_equation<E: Equation + ?Sized>(
        &mut self,
        unknown: Unknown,
        equation: &E,
    ) -> Result<(), LayoutError> {
        self.definitions
            .insert(unknown, LinearEquation::from_equation(equation));
        self.solve_if_eager()
    }

    /// Drop the definition of `unknown`, returning it
    ///
    /// An unknown still mentioned elsewhere falls back to its implicit
    /// identity row.
    pub fn remove_equation(
        &mut self,
        unknown: &Unknown,
    ) -> Result<Option<LinearEquation>, LayoutError> {
        let removed = self.definitions.shift_remove(unknown);
        self.solve_if_eager()?;
        Ok(removed)
    }

    fn solve_if_eager(&self) -> Result<(), LayoutError> {
        if self.is_eager() {
            trace!("eager solve of {} definition(s)", self.definitions.len());
            self.solve()?;
        }
        Ok(())
    }

    pub fn definition(&self, unknown: &Unknown) -> Option<&LinearEquation> {
        self.definitions.get(unknown)
    }

    pub fn definitions(&self) -> impl Iterator<Item = (&Unknown, &LinearEquation)> + '_ {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Every unknown referenced by a definition's terms, in first-seen order
    ///
    /// A defined unknown that no term mentions is not part of the system,
    /// and its definition is not used.
    pub fn unknowns(&self) -> Vec<Unknown> {
        let mut ordering = IndexSet::new();
        for equation in self.definitions.values() {
            ordering.extend(equation.unknowns().cloned());
        }
        ordering.into_iter().collect()
    }

    fn assemble(&self) -> (Vec<Unknown>, DMatrix<f64>, DVector<f64>) {
        let ordering = self.unknowns();
        let n = ordering.len();
        let index: IndexMap<&Unknown, usize> =
            ordering.iter().enumerate().map(|(i, u)| (u, i)).collect();

        let mut matrix = DMatrix::zeros(n, n);
        let mut rhs = DVector::zeros(n);
        for (row, unknown) in ordering.iter().enumerate() {
            match self.definitions.get(unknown) {
                Some(equation) => {
                    for (term, coefficient) in equation.iter() {
                        matrix[(row, index[term])] = coefficient;
                    }
                    rhs[row] = equation.rhs();
                }
                None => matrix[(row, row)] = 1.0,
            }
        }
        (ordering, matrix, rhs)
    }

    /// Solve the assembled system
    ///
    /// Fails with [`LayoutError::AmbiguousLayout`] when a pivot of the LU
    /// factorization is negligible relative to the largest coefficient.
    pub fn solve(&self) -> Result<Solution, LayoutError> {
        let (ordering, matrix, rhs) = self.assemble();
        let n = ordering.len();
        if n == 0 {
            return Ok(Solution::default());
        }
        let threshold = self.tolerance * matrix.amax();

        let lu = matrix.lu();
        let upper = lu.u();
        if let Some(i) = (0..n).find(|&i| upper[(i, i)].abs() <= threshold) {
            debug!(
                "singular system: pivot {} of {} ({}) is {}",
                i,
                n,
                ordering[i],
                upper[(i, i)]
            );
            return Err(LayoutError::ambiguous(n, Some(ordering[i].clone())));
        }

        let x = lu
            .solve(&rhs)
            .ok_or_else(|| LayoutError::ambiguous(n, None))?;

        debug!("solved {} unknown(s)", n);
        Ok(Solution {
            values: ordering.into_iter().zip(x.iter().copied()).collect(),
        })
    }
}

/// Renders the assembled matrix, one row per unknown
impl fmt::Display for EquationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (ordering, matrix, rhs) = self.assemble();
        for (row, unknown) in ordering.iter().enumerate() {
            let cells: Vec<String> = (0..ordering.len())
                .map(|col| matrix[(row, col)].to_string())
                .collect();
            writeln!(f, "{}: [{}] = {}", unknown, cells.join(" "), rhs[row])?;
        }
        Ok(())
    }
}

/// Solved values, in the order the system listed its unknowns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    values: IndexMap<Unknown, f64>,
}

impl Solution {
    pub fn get(&self, unknown: &Unknown) -> Option<f64> {
        self.values.get(unknown).copied()
    }

    /// Value by entity and kind, without going through a registry
    pub fn value(&self, entity: &Entity, kind: UnknownKind) -> Option<f64> {
        self.values
            .iter()
            .find(|(u, _)| u.kind() == kind && u.entity() == entity)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Unknown, f64)> + '_ {
        self.values.iter().map(|(u, v)| (u, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::unknown::UnknownRegistry;
    use approx::assert_relative_eq;

    fn x_of(registry: &UnknownRegistry, name: &str) -> Unknown {
        registry.get(&Entity::element(name), UnknownKind::X)
    }

    #[test]
    fn test_empty_system_solves_to_nothing() {
        let system = EquationSystem::new();
        let solution = system.solve().unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_chain_of_offsets() {
        let registry = UnknownRegistry::new();
        let (a, b, c) = (x_of(&registry, "a"), x_of(&registry, "b"), x_of(&registry, "c"));

        let mut system = EquationSystem::new();
        system
            .add_equation(a.clone(), &LinearEquation::identity(a.clone(), 10.0))
            .unwrap();
        // b.x - a.x = 120
        system
            .add_equation(
                b.clone(),
                &LinearEquation::new()
                    .with_term(b.clone(), 1.0)
                    .with_term(a.clone(), -1.0)
                    .with_rhs(120.0),
            )
            .unwrap();
        // c.x - b.x = 100
        system
            .add_equation(
                c.clone(),
                &LinearEquation::new()
                    .with_term(c.clone(), 1.0)
                    .with_term(b.clone(), -1.0)
                    .with_rhs(100.0),
            )
            .unwrap();

        let solution = system.solve().unwrap();
        assert_relative_eq!(solution.get(&a).unwrap(), 10.0);
        assert_relative_eq!(solution.get(&b).unwrap(), 130.0);
        assert_relative_eq!(solution.get(&c).unwrap(), 230.0);
    }

    #[test]
    fn test_undefined_unknown_gets_identity_row() {
        let registry = UnknownRegistry::new();
        let (a, b) = (x_of(&registry, "a"), x_of(&registry, "b"));

        let mut system = EquationSystem::new();
        system
            .add_equation(
                a.clone(),
                &LinearEquation::new()
                    .with_term(a.clone(), 1.0)
                    .with_term(b.clone(), -1.0)
                    .with_rhs(7.0),
            )
            .unwrap();

        assert_eq!(system.unknowns(), vec![a.clone(), b.clone()]);
        let solution = system.solve().unwrap();
        assert_relative_eq!(solution.get(&b).unwrap(), 0.0);
        assert_relative_eq!(solution.get(&a).unwrap(), 7.0);
    }

    #[test]
    fn test_definition_without_its_own_term() {
        let registry = UnknownRegistry::new();
        let (a, b) = (x_of(&registry, "a"), x_of(&registry, "b"));

        // Installed for a.x, but only mentions b.x
        let mut system = EquationSystem::new();
        system
            .add_equation(
                a.clone(),
                &LinearEquation::new().with_term(b.clone(), 1.0).with_rhs(5.0),
            )
            .unwrap();

        assert_eq!(system.unknowns(), vec![b.clone()]);
        let solution = system.solve().unwrap();
        assert_eq!(solution.len(), 1);
        assert_relative_eq!(solution.get(&b).unwrap(), 0.0);
        assert_eq!(solution.get(&a), None);
    }

    #[test]
    fn test_solution_lookup_from_another_registry() {
        let registry = UnknownRegistry::new();
        let a = x_of(&registry, "a");

        let mut system = EquationSystem::new();
        system
            .add_equation(a.clone(), &LinearEquation::identity(a.clone(), 12.0))
            .unwrap();
        let solution = system.solve().unwrap();

        let other = UnknownRegistry::new();
        let unrelated = other.get(&Entity::element("zzz"), UnknownKind::Width);
        assert_eq!(solution.get(&unrelated), None);
        assert_relative_eq!(solution.get(&x_of(&other, "a")).unwrap(), 12.0);
    }

    #[test]
    fn test_add_replaces_definition() {
        let registry = UnknownRegistry::new();
        let a = x_of(&registry, "a");

        let mut system = EquationSystem::new();
        system
            .add_equation(a.clone(), &LinearEquation::identity(a.clone(), 1.0))
            .unwrap();
        system
            .add_equation(a.clone(), &LinearEquation::identity(a.clone(), 2.0))
            .unwrap();

        assert_eq!(system.len(), 1);
        assert_relative_eq!(system.solve().unwrap().get(&a).unwrap(), 2.0);
    }

    #[test]
    fn test_singular_system_is_ambiguous() {
        let registry = UnknownRegistry::new();
        let (a, b) = (x_of(&registry, "a"), x_of(&registry, "b"));

        // a.x - b.x = 5 and b.x - a.x = -5 say the same thing twice
        let mut system = EquationSystem::new();
        system
            .add_equation(
                a.clone(),
                &LinearEquation::new()
                    .with_term(a.clone(), 1.0)
                    .with_term(b.clone(), -1.0)
                    .with_rhs(5.0),
            )
            .unwrap();
        system
            .add_equation(
                b.clone(),
                &LinearEquation::new()
                    .with_term(b.clone(), 1.0)
                    .with_term(a.clone(), -1.0)
                    .with_rhs(-5.0),
            )
            .unwrap();

        match system.solve().unwrap_err() {
            LayoutError::AmbiguousLayout { unknowns, pivot } => {
                assert_eq!(unknowns, 2);
                assert!(pivot.is_some());
            }
            other => panic!("Expected AmbiguousLayout, got: {:?}", other),
        }
    }

    #[test]
    fn test_remove_restores_identity() {
        let registry = UnknownRegistry::new();
        let (a, b) = (x_of(&registry, "a"), x_of(&registry, "b"));

        let mut system = EquationSystem::new();
        system
            .add_equation(
                a.clone(),
                &LinearEquation::new()
                    .with_term(a.clone(), 1.0)
                    .with_term(b.clone(), -1.0)
                    .with_rhs(5.0),
            )
            .unwrap();
        system
            .add_equation(
                b.clone(),
                &LinearEquation::new()
                    .with_term(b.clone(), 1.0)
                    .with_term(a.clone(), -1.0)
                    .with_rhs(-5.0),
            )
            .unwrap();
        assert!(system.solve().is_err());

        let removed = system.remove_equation(&b).unwrap();
        assert!(removed.is_some());
        let solution = system.solve().unwrap();
        assert_relative_eq!(solution.get(&a).unwrap(), 5.0);
        assert_relative_eq!(solution.get(&b).unwrap(), 0.0);
    }

    #[test]
    fn test_eager_system_fails_at_mutation() {
        let registry = UnknownRegistry::new();
        let a = x_of(&registry, "a");

        let mut system = EquationSystem::new().with_eager_solve(true);
        let zero = LinearEquation::new().with_term(a.clone(), 0.0).with_rhs(3.0);
        let err = system.add_equation(a.clone(), &zero).unwrap_err();
        assert!(matches!(err, LayoutError::AmbiguousLayout { .. }));
        assert!(system.definition(&a).is_some());
    }

    #[test]
    fn test_solve_is_idempotent() {
        let registry = UnknownRegistry::new();
        let (a, b) = (x_of(&registry, "a"), x_of(&registry, "b"));

        let mut system = EquationSystem::new();
        system
            .add_equation(
                a.clone(),
                &LinearEquation::new()
                    .with_term(a.clone(), 2.0)
                    .with_term(b.clone(), 1.0)
                    .with_rhs(9.0),
            )
            .unwrap();
        system
            .add_equation(b.clone(), &LinearEquation::identity(b.clone(), 3.0))
            .unwrap();

        let first = system.solve().unwrap();
        let second = system.solve().unwrap();
        assert_eq!(first, second);
        assert_relative_eq!(first.get(&a).unwrap(), 3.0);
        assert_eq!(first.value(&Entity::element("b"), UnknownKind::X), Some(3.0));
    }

    #[test]
    fn test_display_matrix() {
        let registry = UnknownRegistry::new();
        let a = Entity::element("a");
        let x = registry.get(&a, UnknownKind::X);
        let w = registry.get(&a, UnknownKind::Width);

        let mut system = EquationSystem::new();
        system
            .add_equation(
                w.clone(),
                &LinearEquation::new()
                    .with_term(x.clone(), 1.0)
                    .with_term(w.clone(), 0.5)
                    .with_rhs(40.0),
            )
            .unwrap();

        insta::assert_snapshot!(system.to_string(), @r"
        a.x: [1 0] = 0
        a.width: [1 0.5] = 40
        ");
    }
}
