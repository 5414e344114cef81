//! Coordinate arithmetic over a rectangular patch lattice.

use smallvec::SmallVec;

use crate::bounds::WorldBounds;
use crate::direction::{Connectivity, Direction};
use crate::edge::EdgeBehavior;
use crate::error::SpaceError;

/// Bounds plus per-axis edge behavior.
///
/// Patches are indexed row-major from the bottom-left corner:
/// index `0` is `(min_pxcor, min_pycor)`, then x increases fastest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Topology {
    bounds: WorldBounds,
    edge_x: EdgeBehavior,
    edge_y: EdgeBehavior,
}

impl Topology {
    /// A topology over `bounds`, falling back to [`WorldBounds::DEFAULT`]
    /// when they are invalid.
    pub fn new(bounds: WorldBounds, edge_x: EdgeBehavior, edge_y: EdgeBehavior) -> Self {
        Self {
            bounds: bounds.resolved(),
            edge_x,
            edge_y,
        }
    }

    /// The resolved bounds.
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Edge behavior of the x axis.
    pub fn edge_x(&self) -> EdgeBehavior {
        self.edge_x
    }

    /// Edge behavior of the y axis.
    pub fn edge_y(&self) -> EdgeBehavior {
        self.edge_y
    }

    /// This topology with a different x edge behavior.
    pub fn with_edge_x(self, edge_x: EdgeBehavior) -> Self {
        Self { edge_x, ..self }
    }

    /// This topology with a different y edge behavior.
    pub fn with_edge_y(self, edge_y: EdgeBehavior) -> Self {
        Self { edge_y, ..self }
    }

    /// Number of patch columns.
    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    /// Number of patch rows.
    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    /// Total number of patches.
    pub fn patch_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Smallest continuous x coordinate inside the world.
    pub fn min_xcor(&self) -> f64 {
        f64::from(self.bounds.min_pxcor) - 0.5
    }

    /// Exclusive upper bound of continuous x.
    pub fn max_xcor(&self) -> f64 {
        f64::from(self.bounds.max_pxcor) + 0.5
    }

    /// Smallest continuous y coordinate inside the world.
    pub fn min_ycor(&self) -> f64 {
        f64::from(self.bounds.min_pycor) - 0.5
    }

    /// Exclusive upper bound of continuous y.
    pub fn max_ycor(&self) -> f64 {
        f64::from(self.bounds.max_pycor) + 0.5
    }

    // ── Patch indexing ──────────────────────────────────────────

    /// Row-major index of the patch at integer coordinates, if inside.
    pub fn index_of(&self, pxcor: i32, pycor: i32) -> Option<usize> {
        let col = i64::from(pxcor) - i64::from(self.bounds.min_pxcor);
        let row = i64::from(pycor) - i64::from(self.bounds.min_pycor);
        if col < 0 || row < 0 || col >= i64::from(self.width()) || row >= i64::from(self.height()) {
            return None;
        }
        Some(row as usize * self.width() as usize + col as usize)
    }

    /// Integer coordinates of the patch at `index`.
    pub fn coords_of(&self, index: usize) -> (i32, i32) {
        let w = self.width() as usize;
        let col = (index % w) as i32;
        let row = (index / w) as i32;
        (self.bounds.min_pxcor + col, self.bounds.min_pycor + row)
    }

    /// Coordinates of the patch enclosing a continuous point.
    ///
    /// Each axis rounds half away from zero, except a value exactly on the
    /// lower world edge, which rounds up into the first patch. A result
    /// outside the lattice wraps on a wrapping axis and is `None` otherwise.
    pub fn patch_coords(&self, x: f64, y: f64) -> Option<(i32, i32)> {
        let px = round_to_patch(x, self.min_xcor())?;
        let py = round_to_patch(y, self.min_ycor())?;
        let px = resolve_axis(px, self.bounds.min_pxcor, self.width(), self.edge_x)?;
        let py = resolve_axis(py, self.bounds.min_pycor, self.height(), self.edge_y)?;
        Some((px, py))
    }

    /// Index of the patch enclosing a continuous point.
    pub fn patch_index(&self, x: f64, y: f64) -> Option<usize> {
        let (px, py) = self.patch_coords(x, y)?;
        self.index_of(px, py)
    }

    /// Integer coordinates offset from `(pxcor, pycor)` by `(dx, dy)`,
    /// wrapping where allowed.
    pub fn offset_coords(&self, pxcor: i32, pycor: i32, dx: i32, dy: i32) -> Option<(i32, i32)> {
        let px = resolve_axis(
            pxcor.checked_add(dx)?,
            self.bounds.min_pxcor,
            self.width(),
            self.edge_x,
        )?;
        let py = resolve_axis(
            pycor.checked_add(dy)?,
            self.bounds.min_pycor,
            self.height(),
            self.edge_y,
        )?;
        Some((px, py))
    }

    // ── Continuous coordinates ──────────────────────────────────

    /// Whether `(x, y)` lies inside the world without wrapping.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_xcor() && x < self.max_xcor() && y >= self.min_ycor() && y < self.max_ycor()
    }

    /// Bring `(x, y)` inside the world.
    ///
    /// Coordinates already inside are returned unchanged. Outside ones
    /// are wrapped modulo the world size on a wrapping axis; on an
    /// absorbing axis the point is rejected.
    pub fn wrap_point(&self, x: f64, y: f64) -> Result<(f64, f64), SpaceError> {
        let err = || SpaceError::OutOfBounds { x, y };
        let wx = wrap_coordinate(x, self.min_xcor(), f64::from(self.width()), self.edge_x)
            .ok_or_else(err)?;
        let wy = wrap_coordinate(y, self.min_ycor(), f64::from(self.height()), self.edge_y)
            .ok_or_else(err)?;
        Ok((wx, wy))
    }

    /// Shortest displacement from `(x1, y1)` to `(x2, y2)`.
    ///
    /// On a wrapping axis the delta may cross the edge when that is shorter.
    pub fn shortest_delta(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> (f64, f64) {
        (
            axis_delta(x2 - x1, f64::from(self.width()), self.edge_x),
            axis_delta(y2 - y1, f64::from(self.height()), self.edge_y),
        )
    }

    /// Euclidean distance, taking the shorter way around on wrapping axes.
    pub fn distance(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
        let (dx, dy) = self.shortest_delta(x1, y1, x2, y2);
        dx.hypot(dy)
    }

    // ── Neighbors ───────────────────────────────────────────────

    /// Index of the neighbor of patch `index` in direction `dir`.
    pub fn neighbour(&self, index: usize, dir: Direction) -> Option<usize> {
        let (px, py) = self.coords_of(index);
        let (dx, dy) = dir.offset();
        let (nx, ny) = self.offset_coords(px, py, dx, dy)?;
        self.index_of(nx, ny)
    }

    /// Neighbors of patch `index` indexed by [`Direction::slot`].
    pub fn neighbour_table(&self, index: usize) -> [Option<usize>; 8] {
        let mut out = [None; 8];
        for dir in Direction::ALL {
            out[dir.slot()] = self.neighbour(index, dir);
        }
        out
    }

    /// Existing neighbors of patch `index`, in direction order.
    ///
    /// On a wrapping axis narrower than three patches the same neighbor
    /// can appear more than once.
    pub fn neighbours(&self, index: usize, connectivity: Connectivity) -> SmallVec<[usize; 8]> {
        connectivity
            .directions()
            .iter()
            .filter_map(|d| self.neighbour(index, *d))
            .collect()
    }
}

/// Round a continuous coordinate to its patch coordinate.
fn round_to_patch(v: f64, min_cor: f64) -> Option<i32> {
    if !v.is_finite() {
        return None;
    }
    let r = if v == min_cor { v.ceil() } else { v.round() };
    if r < f64::from(i32::MIN) || r > f64::from(i32::MAX) {
        return None;
    }
    Some(r as i32)
}

/// Resolve a patch coordinate on one axis under the given edge behavior.
fn resolve_axis(val: i32, min: i32, len: u32, edge: EdgeBehavior) -> Option<i32> {
    let offset = i64::from(val) - i64::from(min);
    let n = i64::from(len);
    if (0..n).contains(&offset) {
        return Some(val);
    }
    match edge {
        EdgeBehavior::Absorb => None,
        EdgeBehavior::Wrap => Some((i64::from(min) + offset.rem_euclid(n)) as i32),
    }
}

/// Bring a continuous coordinate into `[min, min + len)`.
fn wrap_coordinate(v: f64, min: f64, len: f64, edge: EdgeBehavior) -> Option<f64> {
    if !v.is_finite() {
        return None;
    }
    if v >= min && v < min + len {
        return Some(v);
    }
    match edge {
        EdgeBehavior::Absorb => None,
        EdgeBehavior::Wrap => {
            let mut r = (v - min).rem_euclid(len);
            // rem_euclid of a tiny negative can round up to exactly len.
            if r >= len {
                r = 0.0;
            }
            Some(min + r)
        }
    }
}

/// Signed per-axis delta, folded to the shorter way around when wrapping.
fn axis_delta(d: f64, len: f64, edge: EdgeBehavior) -> f64 {
    match edge {
        EdgeBehavior::Absorb => d,
        EdgeBehavior::Wrap => {
            let m = d.rem_euclid(len);
            if m > len / 2.0 {
                m - len
            } else {
                m
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn torus() -> Topology {
        Topology::new(WorldBounds::DEFAULT, EdgeBehavior::Wrap, EdgeBehavior::Wrap)
    }

    fn box_world() -> Topology {
        Topology::new(WorldBounds::DEFAULT, EdgeBehavior::Absorb, EdgeBehavior::Absorb)
    }

    // ── Indexing tests ──────────────────────────────────────────

    #[test]
    fn index_round_trip_is_row_major() {
        let t = Topology::new(WorldBounds::new(-1, 1, -1, 1), EdgeBehavior::Absorb, EdgeBehavior::Absorb);
        assert_eq!(t.index_of(-1, -1), Some(0));
        assert_eq!(t.index_of(0, -1), Some(1));
        assert_eq!(t.index_of(-1, 0), Some(3));
        assert_eq!(t.index_of(1, 1), Some(8));
        assert_eq!(t.index_of(2, 0), None);
        for i in 0..9 {
            let (x, y) = t.coords_of(i);
            assert_eq!(t.index_of(x, y), Some(i));
        }
    }

    // ── Rounding tests ──────────────────────────────────────────

    #[test]
    fn rounds_half_away_from_zero() {
        let t = box_world();
        assert_eq!(t.patch_coords(0.5, -0.5), Some((1, -1)));
        assert_eq!(t.patch_coords(0.49, -0.49), Some((0, 0)));
    }

    #[test]
    fn lower_edge_rounds_up() {
        let t = box_world();
        assert_eq!(t.patch_coords(-15.5, -15.5), Some((-15, -15)));
    }

    #[test]
    fn upper_edge_is_outside_when_absorbing() {
        assert_eq!(box_world().patch_coords(15.5, 0.0), None);
        assert_eq!(torus().patch_coords(15.5, 0.0), Some((-15, 0)));
    }

    #[test]
    fn non_finite_has_no_patch() {
        assert_eq!(torus().patch_coords(f64::NAN, 0.0), None);
        assert_eq!(torus().patch_coords(0.0, f64::INFINITY), None);
    }

    #[test]
    fn mixed_wrapping_axes() {
        let t = Topology::new(WorldBounds::DEFAULT, EdgeBehavior::Wrap, EdgeBehavior::Absorb);
        assert_eq!(t.patch_coords(20.0, 0.0), Some((-11, 0)));
        assert_eq!(t.patch_coords(0.0, 20.0), None);
    }

    // ── Wrapping tests ──────────────────────────────────────────

    #[test]
    fn wrap_point_keeps_inside_points() {
        assert_eq!(box_world().wrap_point(3.25, -7.0), Ok((3.25, -7.0)));
    }

    #[test]
    fn wrap_point_wraps_both_directions() {
        let t = torus();
        let (x, _) = t.wrap_point(16.0, 0.0).unwrap();
        assert!((x - -15.0).abs() < 1e-12);
        let (x, _) = t.wrap_point(-16.0, 0.0).unwrap();
        assert!((x - 15.0).abs() < 1e-12);
    }

    #[test]
    fn wrap_point_rejects_on_absorbing_axis() {
        let err = box_world().wrap_point(15.5, 0.0).unwrap_err();
        assert_eq!(err, SpaceError::OutOfBounds { x: 15.5, y: 0.0 });
    }

    // ── Distance tests ──────────────────────────────────────────

    #[test]
    fn distance_uses_shorter_wrap() {
        assert!((torus().distance(-15.0, 0.0, 15.0, 0.0) - 1.0).abs() < 1e-12);
        assert!((box_world().distance(-15.0, 0.0, 15.0, 0.0) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn shortest_delta_crosses_edge() {
        let (dx, dy) = torus().shortest_delta(14.0, 14.0, -14.0, -14.0);
        assert!((dx - 3.0).abs() < 1e-12);
        assert!((dy - 3.0).abs() < 1e-12);
    }

    // ── Neighbor tests ──────────────────────────────────────────

    #[test]
    fn corner_neighbours() {
        let t = box_world();
        let corner = t.index_of(-15, -15).unwrap();
        assert_eq!(t.neighbours(corner, Connectivity::Eight).len(), 3);
        assert_eq!(t.neighbours(corner, Connectivity::Four).len(), 2);
        let table = t.neighbour_table(corner);
        assert_eq!(table[Direction::East.slot()], t.index_of(-14, -15));
        assert_eq!(table[Direction::West.slot()], None);
    }

    #[test]
    fn torus_neighbours_wrap() {
        let t = torus();
        let corner = t.index_of(15, 15).unwrap();
        assert_eq!(t.neighbour(corner, Direction::NorthEast), t.index_of(-15, -15));
        assert_eq!(t.neighbours(corner, Connectivity::Eight).len(), 8);
    }

    proptest! {
        #[test]
        fn patch_is_periodic_on_torus(k in -60i32..60, y in -15i32..=15, n in -5i32..5) {
            let t = torus();
            let x = f64::from(k) * 0.25 + 0.125;
            let shifted = x + f64::from(n) * f64::from(t.width());
            prop_assert_eq!(t.patch_coords(shifted, f64::from(y)), t.patch_coords(x, f64::from(y)));
        }

        #[test]
        fn torus_distance_is_at_most_half_diagonal(
            x1 in -15.5f64..15.5, y1 in -15.5f64..15.5,
            x2 in -15.5f64..15.5, y2 in -15.5f64..15.5,
        ) {
            let t = torus();
            let half_diag = (f64::from(t.width()) / 2.0).hypot(f64::from(t.height()) / 2.0);
            prop_assert!(t.distance(x1, y1, x2, y2) <= half_diag + 1e-9);
        }

        #[test]
        fn wrapped_points_are_inside(x in -200.0f64..200.0, y in -200.0f64..200.0) {
            let t = torus();
            let (wx, wy) = t.wrap_point(x, y).unwrap();
            prop_assert!(t.contains_point(wx, wy));
            prop_assert!(t.distance(x, y, wx, wy) < 1e-9);
        }
    }
}
