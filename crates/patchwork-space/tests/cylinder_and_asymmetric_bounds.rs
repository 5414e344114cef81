use patchwork_space::{Connectivity, Direction, EdgeBehavior, SpaceError, Topology, WorldBounds};

fn cylinder() -> Topology {
    // Wraps east-west only; 7 columns, 4 rows, origin off-center.
    Topology::new(WorldBounds::new(-2, 4, -1, 2), EdgeBehavior::Wrap, EdgeBehavior::Absorb)
}

#[test]
fn asymmetric_bounds_index_round_trip() {
    let t = cylinder();
    assert_eq!((t.width(), t.height()), (7, 4));
    assert_eq!(t.patch_count(), 28);
    for i in 0..t.patch_count() {
        let (px, py) = t.coords_of(i);
        assert_eq!(t.index_of(px, py), Some(i));
    }
    assert_eq!(t.coords_of(0), (-2, -1));
    assert_eq!(t.index_of(5, 0), None);
}

#[test]
fn cylinder_wraps_x_and_rejects_y() {
    let t = cylinder();
    assert_eq!(t.patch_coords(4.6, 0.0), Some((-2, 0)));
    assert_eq!(t.patch_coords(0.0, 2.6), None);
    assert_eq!(
        t.wrap_point(0.0, -1.6),
        Err(SpaceError::OutOfBounds { x: 0.0, y: -1.6 })
    );
    let (x, y) = t.wrap_point(-2.6, 1.0).unwrap();
    assert!((x - 4.4).abs() < 1e-9);
    assert_eq!(y, 1.0);
}

#[test]
fn cylinder_distance_wraps_one_axis() {
    let t = cylinder();
    assert!((t.distance(-2.0, 0.0, 4.0, 0.0) - 1.0).abs() < 1e-9);
    assert!((t.distance(0.0, -1.0, 0.0, 2.0) - 3.0).abs() < 1e-9);
    assert_eq!(t.shortest_delta(4.0, 2.0, -2.0, -1.0), (1.0, -3.0));
}

#[test]
fn cylinder_neighbour_counts() {
    let t = cylinder();
    let bottom_left = t.index_of(-2, -1).unwrap();
    assert_eq!(t.neighbours(bottom_left, Connectivity::Eight).len(), 5);
    assert_eq!(t.neighbours(bottom_left, Connectivity::Four).len(), 3);
    assert_eq!(t.neighbour(bottom_left, Direction::West), t.index_of(4, -1));
    assert_eq!(t.neighbour(bottom_left, Direction::South), None);

    let inner = t.index_of(0, 0).unwrap();
    assert_eq!(t.neighbours(inner, Connectivity::Eight).len(), 8);
}

#[test]
fn offsets_wrap_only_where_allowed() {
    let t = cylinder();
    assert_eq!(t.offset_coords(4, 0, 3, 0), Some((0, 0)));
    assert_eq!(t.offset_coords(4, 0, -14, 1), Some((4, 1)));
    assert_eq!(t.offset_coords(0, 2, 0, 1), None);
}

#[test]
fn invalid_bounds_fall_back_to_default() {
    for bad in [
        WorldBounds::new(1, 5, -2, 2),
        WorldBounds::new(-2, 2, 0, 0),
        WorldBounds::new(3, -3, -2, 2),
    ] {
        assert!(!bad.is_valid());
        assert_eq!(bad.resolved(), WorldBounds::DEFAULT);
    }
    assert!(WorldBounds::new(0, 1, -1, 0).is_valid());
}
