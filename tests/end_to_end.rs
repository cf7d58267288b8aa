//! Integration tests checking solved bounds against the declared relations.
//! Each test builds a session, solves it and reads back entity bounds.

use relative_layout::layout::{
    Binding, BindingFactory, Bounds, ConstraintSet, ContainerChain, Direction, Edge, Entity,
    LayoutConfig, Margins, PlacedBounds, RelativeLayout, Size, StaticSizes,
};

const TOLERANCE: f64 = 1e-6;

fn solve_bounds(layout: &mut RelativeLayout, sizes: &StaticSizes) -> PlacedBounds {
    let mut placed = PlacedBounds::new();
    layout
        .layout(sizes, &mut placed)
        .unwrap_or_else(|e| panic!("layout should solve: {}", e));
    placed
}

fn get_bounds(placed: &PlacedBounds, name: &str) -> Bounds {
    *placed
        .get(&Entity::element(name))
        .unwrap_or_else(|| panic!("entity '{}' not placed", name))
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "{}: expected {}, got {}",
        what,
        expected,
        actual
    );
}

/// Left/top at 12, right 15 from the right, bottom 8 from the bottom of a
/// 600 x 200 container: the entity stretches to 573 x 180.
#[test]
fn test_stretched_entity_fills_container() {
    let constraints = ConstraintSet::new()
        .with(Binding::on_container(Edge::Left, 12.0, Direction::Right, Edge::Left))
        .with(Binding::on_container(Edge::Top, 12.0, Direction::Below, Edge::Top))
        .with(Binding::on_container(Edge::Right, 15.0, Direction::Left, Edge::Right))
        .with(Binding::on_container(Edge::Bottom, 8.0, Direction::Above, Edge::Bottom));

    let mut layout = RelativeLayout::default();
    layout.add(Entity::element("panel"), &constraints).unwrap();

    let sizes = StaticSizes::new(Size::new(600.0, 200.0))
        .with_preferred(Entity::element("panel"), Size::new(10.0, 10.0));
    let placed = solve_bounds(&mut layout, &sizes);
    let panel = get_bounds(&placed, "panel");

    assert_close(panel.x, 12.0, "panel.x");
    assert_close(panel.y, 12.0, "panel.y");
    assert_close(panel.width, 573.0, "panel.width");
    assert_close(panel.height, 180.0, "panel.height");
}

/// A label/field form: the label sits at the top-left margin, the field sits
/// right of the label and stretches to the right margin.
#[test]
fn test_label_and_stretching_field() {
    let factory = BindingFactory::default();
    let label = Entity::element("label");
    let field = Entity::element("field");

    let mut layout = RelativeLayout::default();
    layout
        .add(
            label.clone(),
            &ConstraintSet::new()
                .with(factory.left_edge())
                .with(factory.top_edge()),
        )
        .unwrap();
    layout
        .add(
            field.clone(),
            &ConstraintSet::new()
                .with(factory.right_of(label.clone()))
                .with(factory.top_aligned_with(label.clone()))
                .with(factory.right_edge()),
        )
        .unwrap();

    let sizes = StaticSizes::new(Size::new(400.0, 100.0))
        .with_preferred(label.clone(), Size::new(60.0, 20.0))
        .with_preferred(field.clone(), Size::new(100.0, 24.0));
    let placed = solve_bounds(&mut layout, &sizes);

    let l = get_bounds(&placed, "label");
    let f = get_bounds(&placed, "field");
    assert_close(l.x, 8.0, "label.x");
    assert_close(l.y, 8.0, "label.y");
    assert_close(f.x, l.right() + 4.0, "field.x");
    assert_close(f.y, l.y, "field.y");
    assert_close(f.right(), 400.0 - 8.0, "field right edge");
    assert_close(f.height, 24.0, "field keeps preferred height");
}

#[test]
fn test_centered_entity() {
    let factory = BindingFactory::default();
    let mut layout = RelativeLayout::default();
    layout
        .add(
            Entity::element("ok"),
            &ConstraintSet::new()
                .with(factory.horizontally_centered_with(Entity::Container))
                .with(factory.vertically_centered_with(Entity::Container)),
        )
        .unwrap();

    let sizes = StaticSizes::new(Size::new(300.0, 120.0))
        .with_preferred(Entity::element("ok"), Size::new(80.0, 30.0));
    let placed = solve_bounds(&mut layout, &sizes);
    let ok = get_bounds(&placed, "ok");

    assert_close(ok.x, 110.0, "ok.x");
    assert_close(ok.y, 45.0, "ok.y");
    assert_close(ok.edge(Edge::HorizontalCenter), 150.0, "ok center x");
}

/// Each button sits left of the next, the last one against the right margin.
#[test]
fn test_chain_along_bottom_edge() {
    let factory = BindingFactory::new(Margins::uniform(10.0), Default::default());
    let (ok, cancel, help) = (
        Entity::element("ok"),
        Entity::element("cancel"),
        Entity::element("help"),
    );

    let mut layout = RelativeLayout::new(LayoutConfig::default());
    layout
        .add(
            help.clone(),
            &ConstraintSet::new()
                .with(factory.right_edge())
                .with(factory.bottom_edge()),
        )
        .unwrap();
    layout
        .add(
            cancel.clone(),
            &ConstraintSet::new()
                .with(factory.left_of(help.clone()))
                .with(factory.bottom_aligned_with(help.clone())),
        )
        .unwrap();
    layout
        .add(
            ok.clone(),
            &ConstraintSet::new()
                .with(factory.left_of(cancel.clone()))
                .with(factory.bottom_aligned_with(cancel.clone())),
        )
        .unwrap();

    let button = Size::new(70.0, 25.0);
    let sizes = StaticSizes::new(Size::new(500.0, 300.0))
        .with_preferred(ok, button)
        .with_preferred(cancel, button)
        .with_preferred(help, button);
    let placed = solve_bounds(&mut layout, &sizes);

    assert_close(get_bounds(&placed, "help").x, 420.0, "help.x");
    assert_close(get_bounds(&placed, "cancel").x, 346.0, "cancel.x");
    assert_close(get_bounds(&placed, "ok").x, 272.0, "ok.x");
    for name in ["ok", "cancel", "help"] {
        assert_close(get_bounds(&placed, name).y, 265.0, name);
    }
}

/// Binding to the window around the content pane measures from the pane.
#[test]
fn test_outer_ancestor_treated_as_container() {
    let mut layout =
        RelativeLayout::default().with_ancestry(ContainerChain::new([Entity::element("window")]));
    layout
        .add(
            Entity::element("a"),
            &ConstraintSet::new().with(Binding::new(
                Edge::Right,
                5.0,
                Direction::Left,
                Edge::Right,
                Entity::element("window"),
            )),
        )
        .unwrap();

    let sizes = StaticSizes::new(Size::new(100.0, 50.0))
        .with_preferred(Entity::element("a"), Size::new(20.0, 10.0));
    let placed = solve_bounds(&mut layout, &sizes);

    assert_close(get_bounds(&placed, "a").x, 75.0, "a.x");
    assert_eq!(placed.len(), 1);
}

#[test]
fn test_extent_covers_members() {
    let factory = BindingFactory::default();
    let mut layout = RelativeLayout::default();
    layout
        .add(
            Entity::element("a"),
            &ConstraintSet::new()
                .with(factory.left_edge())
                .with(factory.top_edge()),
        )
        .unwrap();
    layout
        .add(
            Entity::element("b"),
            &ConstraintSet::new()
                .with(factory.below(Entity::element("a")))
                .with(factory.left_aligned_with(Entity::element("a"))),
        )
        .unwrap();

    let sizes = StaticSizes::new(Size::new(0.0, 0.0))
        .with_preferred(Entity::element("a"), Size::new(40.0, 10.0))
        .with_preferred(Entity::element("b"), Size::new(60.0, 10.0));
    let solution = layout.solve(&sizes).unwrap();
    let extent = layout.extent(&solution).unwrap();

    assert_close(extent.width, 68.0, "extent width");
    assert_close(extent.height, 32.0, "extent height");
}
