//! Layout sessions
//!
//! A [`RelativeLayout`] holds the attached constraints of every member entity,
//! builds one [`EquationSystem`] from them and hands the solved values back to
//! the host through a [`BoundsSink`].
//!
//! ## Building the system
//!
//! 1. Every member gets identity defaults: `x = 0`, `y = 0`, and its width
//!    and height fixed to the preferred size reported by the host.
//! 2. The container gets the same defaults from its current size.
//! 3. Each member's binding equations replace the identities of the unknowns
//!    they define, in member insertion order.
//!
//! The system is cached and reused until [`RelativeLayout::invalidate`] is
//! called, membership changes, or the host reports different sizes.

use indexmap::IndexMap;
use log::debug;

use super::config::LayoutConfig;
use super::constraints::{AttachedConstraints, ConstraintSet};
use super::equation::LinearEquation;
use super::error::LayoutError;
use super::factory::BindingFactory;
use super::ports::{BoundsSink, ContainerChain, SizeQuery};
use super::solver::{EquationSystem, Solution};
use super::types::{Bounds, Entity, Size, UnknownKind};
use super::unknown::UnknownRegistry;

/// Equation system plus the sizes it was seeded with
#[derive(Debug)]
struct CachedSystem {
    seeds: Vec<(Entity, Size)>,
    system: EquationSystem,
}

/// One layout session: member entities, their constraints and the solver
/// state derived from them
#[derive(Debug, Default)]
pub struct RelativeLayout {
    config: LayoutConfig,
    registry: UnknownRegistry,
    ancestry: ContainerChain,
    members: IndexMap<Entity, AttachedConstraints>,
    cache: Option<CachedSystem>,
}

impl RelativeLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Entities enclosing the container; bindings naming them are measured
    /// from the container instead
    pub fn with_ancestry(mut self, ancestry: ContainerChain) -> Self {
        self.ancestry = ancestry;
        self.cache = None;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Factory using this session's margins and spacing
    pub fn factory(&self) -> BindingFactory {
        BindingFactory::new(self.config.margins, self.config.spacing)
    }

    pub fn registry(&self) -> &UnknownRegistry {
        &self.registry
    }

    /// Attach `constraints` to `entity` and make it a member of the layout.
    ///
    /// Adding an entity again replaces its constraints. Attachment errors
    /// leave the layout unchanged. The container itself is never a member.
    pub fn add(&mut self, entity: Entity, constraints: &ConstraintSet) -> Result<(), LayoutError> {
        if entity.is_container() {
            return Err(LayoutError::ContainerAsMember);
        }
        let attached = constraints.attach_within(&entity, &self.registry, &self.ancestry)?;
        debug!(
            "adding '{}' with {} binding(s)",
            entity,
            attached.len()
        );
        self.members.insert(entity, attached);
        self.invalidate();
        Ok(())
    }

    /// Remove a member, returning its attached constraints
    pub fn remove(&mut self, entity: &Entity) -> Option<AttachedConstraints> {
        let removed = self.members.shift_remove(entity);
        if removed.is_some() {
            debug!("removed '{}'", entity);
            self.invalidate();
        }
        removed
    }

    /// Discard the cached equation system; the next solve rebuilds it
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn contains(&self, entity: &Entity) -> bool {
        self.members.contains_key(entity)
    }

    /// Members in insertion order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.members.keys()
    }

    pub fn constraints(&self, entity: &Entity) -> Option<&AttachedConstraints> {
        self.members.get(entity)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The cached system, if one has been built since the last change
    pub fn system(&self) -> Option<&EquationSystem> {
        self.cache.as_ref().map(|cache| &cache.system)
    }

    /// Solve the layout for the sizes the host reports
    pub fn solve(&mut self, sizes: &dyn SizeQuery) -> Result<Solution, LayoutError> {
        let seeds = self.seeds(sizes);
        let cache = match self.cache.take() {
            Some(cache) if cache.seeds == seeds => cache,
            _ => {
                let system = self.build(&seeds)?;
                CachedSystem { seeds, system }
            }
        };
        let solution = cache.system.solve();
        self.cache = Some(cache);
        solution
    }

    /// Solve and write every solved value of a member entity to `sink`
    ///
    /// The container and entities that were never added are not written.
    pub fn layout(
        &mut self,
        sizes: &dyn SizeQuery,
        sink: &mut dyn BoundsSink,
    ) -> Result<Solution, LayoutError> {
        let solution = self.solve(sizes)?;
        for (unknown, value) in solution.iter() {
            let entity = unknown.entity();
            if !entity.is_container() && self.contains(entity) {
                sink.apply(entity, unknown.kind(), value);
            }
        }
        Ok(solution)
    }

    /// Solved bounds of a member or of the container
    pub fn bounds(&self, solution: &Solution, entity: &Entity) -> Result<Bounds, LayoutError> {
        if !entity.is_container() && !self.contains(entity) {
            return Err(LayoutError::unknown_entity(entity.clone()));
        }
        let mut bounds = Bounds::default();
        for kind in UnknownKind::ALL {
            if let Some(value) = solution.value(entity, kind) {
                bounds.set(kind, value);
            }
        }
        Ok(bounds)
    }

    /// Smallest size enclosing every member's bounds
    ///
    /// Fails when the solution mentions an entity that is neither a member nor
    /// the container, i.e. some binding is measured from an entity that was
    /// never added.
    pub fn extent(&self, solution: &Solution) -> Result<Size, LayoutError> {
        if let Some((unknown, _)) = solution
            .iter()
            .find(|(u, _)| !u.entity().is_container() && !self.contains(u.entity()))
        {
            return Err(LayoutError::unknown_entity(unknown.entity().clone()));
        }

        let mut extent = Size::default();
        for entity in self.members.keys() {
            let bounds = self.bounds(solution, entity)?;
            extent.width = extent.width.max(bounds.right());
            extent.height = extent.height.max(bounds.bottom());
        }
        Ok(extent)
    }

    fn seeds(&self, sizes: &dyn SizeQuery) -> Vec<(Entity, Size)> {
        let mut seeds: Vec<(Entity, Size)> = self
            .members
            .keys()
            .map(|entity| (entity.clone(), sizes.preferred_size(entity)))
            .collect();
        seeds.push((Entity::Container, sizes.container_size()));
        seeds
    }

    fn build(&self, seeds: &[(Entity, Size)]) -> Result<EquationSystem, LayoutError> {
        debug!("building equation system for {} member(s)", self.members.len());

        let mut system = EquationSystem::new()
            .with_eager_solve(self.config.debug)
            .with_tolerance(self.config.singular_tolerance);

        for (entity, size) in seeds {
            for kind in UnknownKind::ALL {
                let unknown = self.registry.get(entity, kind);
                let value = size.get(kind).unwrap_or(0.0);
                system.add_equation(unknown.clone(), &LinearEquation::identity(unknown, value))?;
            }
        }

        for attached in self.members.values() {
            for (unknown, equation) in attached.definitions() {
                system.add_equation(unknown.clone(), equation)?;
            }
        }

        Ok(system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::binding::Binding;
    use crate::layout::ports::{PlacedBounds, StaticSizes};
    use crate::layout::types::{Direction, Edge};
    use approx::assert_relative_eq;

    fn stretched() -> ConstraintSet {
        ConstraintSet::new()
            .with(Binding::on_container(Edge::Left, 12.0, Direction::Right, Edge::Left))
            .with(Binding::on_container(Edge::Top, 12.0, Direction::Below, Edge::Top))
            .with(Binding::on_container(Edge::Right, 15.0, Direction::Left, Edge::Right))
            .with(Binding::on_container(Edge::Bottom, 8.0, Direction::Above, Edge::Bottom))
    }

    #[test]
    fn test_stretch_to_container() {
        let mut layout = RelativeLayout::default();
        let a = Entity::element("a");
        layout.add(a.clone(), &stretched()).unwrap();

        let sizes = StaticSizes::new(Size::new(600.0, 200.0));
        let solution = layout.solve(&sizes).unwrap();
        let bounds = layout.bounds(&solution, &a).unwrap();

        assert_relative_eq!(bounds.x, 12.0);
        assert_relative_eq!(bounds.y, 12.0);
        assert_relative_eq!(bounds.width, 573.0);
        assert_relative_eq!(bounds.height, 180.0);
    }

    #[test]
    fn test_preferred_size_used_without_bindings() {
        let mut layout = RelativeLayout::default();
        let a = Entity::element("a");
        layout.add(a.clone(), &ConstraintSet::new()).unwrap();

        let sizes = StaticSizes::new(Size::new(100.0, 100.0))
            .with_preferred(a.clone(), Size::new(30.0, 10.0));
        let solution = layout.solve(&sizes).unwrap();
        assert_eq!(
            layout.bounds(&solution, &a).unwrap(),
            Bounds::new(0.0, 0.0, 30.0, 10.0)
        );
    }

    #[test]
    fn test_cache_rebuilt_when_sizes_change() {
        let mut layout = RelativeLayout::default();
        let a = Entity::element("a");
        layout.add(a.clone(), &stretched()).unwrap();

        let mut sizes = StaticSizes::new(Size::new(600.0, 200.0));
        layout.solve(&sizes).unwrap();
        assert!(layout.system().is_some());

        sizes.set_container(Size::new(300.0, 100.0));
        let solution = layout.solve(&sizes).unwrap();
        assert_relative_eq!(solution.value(&a, UnknownKind::Width).unwrap(), 273.0);
    }

    #[test]
    fn test_invalidate_discards_system() {
        let mut layout = RelativeLayout::default();
        layout.add(Entity::element("a"), &stretched()).unwrap();
        layout
            .solve(&StaticSizes::new(Size::new(600.0, 200.0)))
            .unwrap();

        layout.invalidate();
        assert!(layout.system().is_none());
    }

    #[test]
    fn test_failed_add_leaves_layout_unchanged() {
        let mut layout = RelativeLayout::default();
        let bad = ConstraintSet::new()
            .with(Binding::on_container(Edge::Left, 1.0, Direction::Below, Edge::Left));
        assert!(layout.add(Entity::element("a"), &bad).is_err());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_layout_writes_members_only() {
        let mut layout = RelativeLayout::default();
        let a = Entity::element("a");
        let set = ConstraintSet::new().with(Binding::new(
            Edge::Left,
            4.0,
            Direction::Right,
            Edge::Right,
            Entity::element("ghost"),
        ));
        layout.add(a.clone(), &set).unwrap();

        let mut placed = PlacedBounds::new();
        let solution = layout
            .layout(&StaticSizes::new(Size::new(50.0, 50.0)), &mut placed)
            .unwrap();

        assert_eq!(placed.len(), 1);
        assert_relative_eq!(placed.get(&a).unwrap().x, 4.0);
        assert!(matches!(
            layout.bounds(&solution, &Entity::element("ghost")),
            Err(LayoutError::UnknownEntity { .. })
        ));
        assert!(matches!(
            layout.extent(&solution),
            Err(LayoutError::UnknownEntity { .. })
        ));
    }

    #[test]
    fn test_remove_member() {
        let mut layout = RelativeLayout::default();
        let a = Entity::element("a");
        layout.add(a.clone(), &stretched()).unwrap();

        assert!(layout.remove(&a).is_some());
        assert!(layout.remove(&a).is_none());
        assert!(!layout.contains(&a));
    }

    #[test]
    fn test_container_is_not_a_member() {
        let mut layout = RelativeLayout::default();
        let err = layout.add(Entity::Container, &stretched()).unwrap_err();
        assert!(matches!(err, LayoutError::ContainerAsMember));
        assert!(layout.is_empty());
        assert_eq!(err.entities(), vec![&Entity::Container]);
    }
}
