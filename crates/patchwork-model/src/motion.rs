//! Turtle motion and turtle-relative geometry.
//!
//! Headings are degrees at this API, 0 pointing along +x and growing
//! counter-clockwise. Every position change goes through one internal
//! relocation step that wraps the target, rejects it on a non-wrapping
//! edge, and moves the turtle's patch membership.

use patchwork_core::{PatchId, TurtleId};
use patchwork_space::{Connectivity, SpaceError};

use crate::error::ModelError;
use crate::model::Model;
use crate::turtle::normalize_degrees;

impl Model {
    // ── Position ────────────────────────────────────────────────

    /// Move `turtle` to `(x, y)`, wrapping on wrapping axes.
    ///
    /// A target off a non-wrapping edge is rejected and nothing moves.
    /// Move-tied descendants follow by the same displacement.
    pub fn set_xy(&mut self, turtle: TurtleId, x: f64, y: f64) -> Result<(), ModelError> {
        let t = self.turtle_ref(turtle)?;
        let (dx, dy) = (x - t.xcor(), y - t.ycor());
        self.relocate(turtle, x, y)?;
        if dx != 0.0 || dy != 0.0 {
            self.drag_tied(turtle, dx, dy);
        }
        Ok(())
    }

    /// Move `turtle` straight along its heading by `distance` in one step.
    pub fn jump(&mut self, turtle: TurtleId, distance: f64) -> Result<(), ModelError> {
        let t = self.turtle_ref(turtle)?;
        let (sin, cos) = t.heading_radians().sin_cos();
        let (x, y) = (t.xcor() + distance * cos, t.ycor() + distance * sin);
        self.set_xy(turtle, x, y)
    }

    /// Walk `distance` along the heading in unit steps, then one final
    /// fractional step. Patch membership is updated after every step.
    ///
    /// A step rejected by a non-wrapping edge leaves the turtle where it is
    /// and the walk carries on. The first rejection is returned once every
    /// step has been tried.
    pub fn forward(&mut self, turtle: TurtleId, distance: f64) -> Result<(), ModelError> {
        self.turtle_ref(turtle)?;
        let sign = distance.signum();
        let mut remaining = distance.abs();
        let mut rejected = None;
        let mut step = |m: &mut Model, length: f64| match m.jump(turtle, length) {
            Err(e @ ModelError::OutOfBounds(_)) => {
                rejected.get_or_insert(e);
                Ok(())
            }
            other => other,
        };
        while remaining >= 1.0 {
            step(self, sign)?;
            remaining -= 1.0;
        }
        if remaining > 0.0 {
            step(self, sign * remaining)?;
        }
        rejected.map_or(Ok(()), Err)
    }

    /// Walk backwards; the same as `forward(-distance)`.
    pub fn back(&mut self, turtle: TurtleId, distance: f64) -> Result<(), ModelError> {
        self.forward(turtle, -distance)
    }

    /// Whether a jump of `distance` along the heading stays inside the world.
    pub fn can_move(&self, turtle: TurtleId, distance: f64) -> bool {
        self.patch_ahead(turtle, distance).is_some()
    }

    /// Move to the center of `patch`.
    pub fn move_to_patch(&mut self, turtle: TurtleId, patch: PatchId) -> Result<(), ModelError> {
        let p = self.patch(patch).ok_or(ModelError::PatchNotFound(patch))?;
        let (x, y) = (f64::from(p.pxcor()), f64::from(p.pycor()));
        self.set_xy(turtle, x, y)
    }

    /// Move onto `other`'s exact position.
    pub fn move_to_turtle(&mut self, turtle: TurtleId, other: TurtleId) -> Result<(), ModelError> {
        let o = self.turtle_ref(other)?;
        let (x, y) = (o.xcor(), o.ycor());
        self.set_xy(turtle, x, y)
    }

    /// Move to the origin.
    pub fn home(&mut self, turtle: TurtleId) -> Result<(), ModelError> {
        self.set_xy(turtle, 0.0, 0.0)
    }

    // ── Heading ─────────────────────────────────────────────────

    /// Set the heading in degrees. Tied descendants turn with it.
    pub fn set_heading(&mut self, turtle: TurtleId, degrees: f64) -> Result<(), ModelError> {
        let old = self.turtle_ref(turtle)?.heading_radians();
        let new = normalize_degrees(degrees).to_radians();
        if let Some(t) = self.turtles.get_mut(turtle) {
            t.set_heading_radians(new);
        }
        let delta = new - old;
        if delta != 0.0 {
            self.turn_tied(turtle, delta);
        }
        Ok(())
    }

    /// Turn counter-clockwise by `degrees`.
    pub fn left(&mut self, turtle: TurtleId, degrees: f64) -> Result<(), ModelError> {
        let heading = self.turtle_ref(turtle)?.heading();
        self.set_heading(turtle, heading + degrees)
    }

    /// Turn clockwise by `degrees`.
    pub fn right(&mut self, turtle: TurtleId, degrees: f64) -> Result<(), ModelError> {
        self.left(turtle, -degrees)
    }

    /// Heading in degrees from `turtle` to `(x, y)`, the short way around
    /// on wrapping axes.
    pub fn towards_xy(&self, turtle: TurtleId, x: f64, y: f64) -> Result<f64, ModelError> {
        let t = self.turtle_ref(turtle)?;
        self.heading_between(t.xcor(), t.ycor(), x, y)
    }

    /// Heading in degrees from `turtle` to `other`.
    pub fn towards(&self, turtle: TurtleId, other: TurtleId) -> Result<f64, ModelError> {
        let o = self.turtle_ref(other)?;
        self.towards_xy(turtle, o.xcor(), o.ycor())
    }

    /// Turn to face `(x, y)`. Facing the turtle's own position is a no-op.
    pub fn face_xy(&mut self, turtle: TurtleId, x: f64, y: f64) -> Result<(), ModelError> {
        match self.towards_xy(turtle, x, y) {
            Ok(heading) => self.set_heading(turtle, heading),
            Err(ModelError::ZeroLengthHeading) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Turn to face `other`.
    pub fn face(&mut self, turtle: TurtleId, other: TurtleId) -> Result<(), ModelError> {
        let o = self.turtle_ref(other)?;
        let (x, y) = (o.xcor(), o.ycor());
        self.face_xy(turtle, x, y)
    }

    // ── Gradient following ──────────────────────────────────────

    /// Step to the neighboring patch (of eight) with the smallest value of
    /// `property`, if it is smaller than the current patch's value.
    pub fn downhill(&mut self, turtle: TurtleId, property: &str) -> Result<(), ModelError> {
        self.follow_gradient(turtle, property, Connectivity::Eight, false)
    }

    /// [`downhill`](Self::downhill) over the four edge-sharing neighbors.
    pub fn downhill4(&mut self, turtle: TurtleId, property: &str) -> Result<(), ModelError> {
        self.follow_gradient(turtle, property, Connectivity::Four, false)
    }

    /// Step to the neighboring patch (of eight) with the largest value of
    /// `property`, if it is larger than the current patch's value.
    pub fn uphill(&mut self, turtle: TurtleId, property: &str) -> Result<(), ModelError> {
        self.follow_gradient(turtle, property, Connectivity::Eight, true)
    }

    /// [`uphill`](Self::uphill) over the four edge-sharing neighbors.
    pub fn uphill4(&mut self, turtle: TurtleId, property: &str) -> Result<(), ModelError> {
        self.follow_gradient(turtle, property, Connectivity::Four, true)
    }

    fn follow_gradient(
        &mut self,
        turtle: TurtleId,
        property: &str,
        connectivity: Connectivity,
        ascend: bool,
    ) -> Result<(), ModelError> {
        self.check_numeric_patch_property(property)?;
        let here = self.turtle_ref(turtle)?.patch_here();
        let value_of = |m: &Model, p: PatchId| {
            m.patch(p)
                .and_then(|patch| patch.own_number(property))
                .unwrap_or(0.0)
        };
        let current = value_of(self, here);
        let Some(patch) = self.patch(here) else {
            return Err(ModelError::PatchNotFound(here));
        };
        let mut best: Option<(PatchId, f64)> = None;
        for dir in connectivity.directions() {
            let Some(n) = patch.neighbour(*dir) else {
                continue;
            };
            let v = value_of(self, n);
            let better = match best {
                None => true,
                Some((_, b)) if ascend => v > b,
                Some((_, b)) => v < b,
            };
            if better {
                best = Some((n, v));
            }
        }
        let Some((target, value)) = best else {
            return Ok(());
        };
        let improves = if ascend { value > current } else { value < current };
        if !improves {
            return Ok(());
        }
        let Some(p) = self.patch(target) else {
            return Err(ModelError::PatchNotFound(target));
        };
        let (x, y) = (f64::from(p.pxcor()), f64::from(p.pycor()));
        self.face_xy(turtle, x, y)?;
        self.move_to_patch(turtle, target)
    }

    // ── Geometry ────────────────────────────────────────────────

    /// Distance from `turtle` to `(x, y)`.
    pub fn distance_xy(&self, turtle: TurtleId, x: f64, y: f64) -> Option<f64> {
        let t = self.turtles.get(turtle)?;
        Some(self.topology.distance(t.xcor(), t.ycor(), x, y))
    }

    /// Distance between two turtles.
    pub fn distance_to_turtle(&self, turtle: TurtleId, other: TurtleId) -> Option<f64> {
        let o = self.turtles.get(other)?;
        self.distance_xy(turtle, o.xcor(), o.ycor())
    }

    /// Distance from `turtle` to the center of `patch`.
    pub fn distance_to_patch(&self, turtle: TurtleId, patch: PatchId) -> Option<f64> {
        let p = self.patch(patch)?;
        self.distance_xy(turtle, f64::from(p.pxcor()), f64::from(p.pycor()))
    }

    /// The patch `distance` ahead along the heading, if inside the world.
    pub fn patch_ahead(&self, turtle: TurtleId, distance: f64) -> Option<PatchId> {
        let heading = self.turtles.get(turtle)?.heading();
        self.patch_at_heading_and_distance(turtle, heading, distance)
    }

    /// The patch `distance` away in absolute direction `heading` (degrees).
    pub fn patch_at_heading_and_distance(&self, turtle: TurtleId, heading: f64, distance: f64) -> Option<PatchId> {
        let t = self.turtles.get(turtle)?;
        let (sin, cos) = heading.to_radians().sin_cos();
        self.patch_at(t.xcor() + distance * cos, t.ycor() + distance * sin)
    }

    /// The patch `distance` away, `angle` degrees to the left of the heading.
    pub fn patch_left_and_ahead(&self, turtle: TurtleId, angle: f64, distance: f64) -> Option<PatchId> {
        let heading = self.turtles.get(turtle)?.heading();
        self.patch_at_heading_and_distance(turtle, heading + angle, distance)
    }

    /// The patch `distance` away, `angle` degrees to the right of the heading.
    pub fn patch_right_and_ahead(&self, turtle: TurtleId, angle: f64, distance: f64) -> Option<PatchId> {
        self.patch_left_and_ahead(turtle, -angle, distance)
    }

    /// The patch at offset `(dx, dy)` from the turtle's position.
    pub fn turtle_patch_at(&self, turtle: TurtleId, dx: f64, dy: f64) -> Option<PatchId> {
        let t = self.turtles.get(turtle)?;
        self.patch_at(t.xcor() + dx, t.ycor() + dy)
    }

    // ── Internals ───────────────────────────────────────────────

    /// Heading in degrees from one point to another.
    pub(crate) fn heading_between(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<f64, ModelError> {
        let (dx, dy) = self.topology.shortest_delta(x1, y1, x2, y2);
        if dx == 0.0 && dy == 0.0 {
            return Err(ModelError::ZeroLengthHeading);
        }
        Ok(normalize_degrees(dy.atan2(dx).to_degrees()))
    }

    /// Place `turtle` at `(x, y)` after wrapping and move its patch
    /// membership. Ties are not consulted.
    pub(crate) fn relocate(&mut self, turtle: TurtleId, x: f64, y: f64) -> Result<(), ModelError> {
        let (wx, wy) = self.topology.wrap_point(x, y)?;
        let patch = self
            .patch_at(wx, wy)
            .ok_or(ModelError::OutOfBounds(SpaceError::OutOfBounds { x, y }))?;
        let t = self
            .turtles
            .get_mut(turtle)
            .ok_or(ModelError::TurtleNotFound(turtle))?;
        let old = t.patch_here();
        t.set_position(wx, wy);
        if old != patch {
            t.patch = patch;
            let breed = t.breed().to_owned();
            if let Some(p) = self.patches.get_mut(old.0 as usize) {
                p.leave(turtle, &breed);
            }
            if let Some(p) = self.patches.get_mut(patch.0 as usize) {
                p.enter(turtle, &breed);
            }
        }
        Ok(())
    }

    pub(crate) fn check_numeric_patch_property(&self, property: &str) -> Result<(), ModelError> {
        match self.patch_template.kind_of(property) {
            None => Err(ModelError::UnknownProperty {
                name: property.into(),
            }),
            Some(patchwork_core::ValueKind::Number) => Ok(()),
            Some(_) => Err(ModelError::NotNumeric {
                name: property.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use patchwork_core::TieMode;
    use patchwork_space::WorldBounds;

    const EPS: f64 = 1e-9;

    fn model(wrap: bool) -> Model {
        Model::new(
            ModelConfig::with_bounds(WorldBounds::new(-5, 5, -5, 5), wrap, wrap)
                .patch_property("height", 0.0)
                .patch_property("name", ""),
        )
        .unwrap()
    }

    fn one(m: &mut Model) -> TurtleId {
        m.create_ordered_turtles(1, "").unwrap().first().unwrap()
    }

    fn pos(m: &Model, t: TurtleId) -> (f64, f64) {
        let t = m.turtle(t).unwrap();
        (t.xcor(), t.ycor())
    }

    // ── Movement tests ──────────────────────────────────────────

    #[test]
    fn forward_moves_along_heading() {
        let mut m = model(true);
        let t = one(&mut m);
        m.set_heading(t, 90.0).unwrap();
        m.forward(t, 2.5).unwrap();
        let (x, y) = pos(&m, t);
        assert!(x.abs() < EPS);
        assert!((y - 2.5).abs() < EPS);
        assert_eq!(m.turtle(t).unwrap().patch_here(), m.patch_at_coords(0, 3).unwrap());
    }

    #[test]
    fn forward_wraps_on_torus() {
        let mut m = model(true);
        let t = one(&mut m);
        m.forward(t, 7.0).unwrap();
        let (x, _) = pos(&m, t);
        assert!((x - -4.0).abs() < EPS);
    }

    #[test]
    fn forward_skips_steps_past_absorbing_edge() {
        let mut m = model(false);
        let t = one(&mut m);
        let err = m.forward(t, 8.0).unwrap_err();
        assert!(matches!(err, ModelError::OutOfBounds(_)));
        let (x, _) = pos(&m, t);
        assert!((x - 5.0).abs() < EPS);
        assert!(!m.can_move(t, 1.0));
        assert!(m.can_move(t, 0.4));
    }

    #[test]
    fn forward_takes_fractional_step_after_rejected_unit_step() {
        let mut m = model(false);
        let t = one(&mut m);
        m.set_xy(t, 5.0, 0.0).unwrap();
        let err = m.forward(t, 1.4).unwrap_err();
        assert!(matches!(err, ModelError::OutOfBounds(_)));
        let (x, y) = pos(&m, t);
        assert!((x - 5.4).abs() < EPS);
        assert!(y.abs() < EPS);
        assert_eq!(m.turtle(t).unwrap().patch_here(), m.patch_at_coords(5, 0).unwrap());
    }

    #[test]
    fn back_reverses() {
        let mut m = model(true);
        let t = one(&mut m);
        m.back(t, 1.5).unwrap();
        assert!((pos(&m, t).0 + 1.5).abs() < EPS);
    }

    #[test]
    fn set_xy_rejection_leaves_turtle() {
        let mut m = model(false);
        let t = one(&mut m);
        m.set_xy(t, 1.0, 1.0).unwrap();
        assert!(m.set_xy(t, 9.0, 0.0).is_err());
        assert_eq!(pos(&m, t), (1.0, 1.0));
    }

    #[test]
    fn patch_membership_follows_turtle() {
        let mut m = model(true);
        let t = one(&mut m);
        let origin = m.patch_at_coords(0, 0).unwrap();
        m.set_xy(t, 3.2, -1.7).unwrap();
        let target = m.patch_at_coords(3, -2).unwrap();
        assert!(!m.patch(origin).unwrap().turtles_here().contains(t));
        assert!(m.patch(target).unwrap().turtles_here().contains(t));
        assert_eq!(m.turtle(t).unwrap().patch_here(), target);
    }

    #[test]
    fn move_to_patch_and_home() {
        let mut m = model(true);
        let t = one(&mut m);
        let p = m.patch_at_coords(-2, 4).unwrap();
        m.move_to_patch(t, p).unwrap();
        assert_eq!(pos(&m, t), (-2.0, 4.0));
        m.home(t).unwrap();
        assert_eq!(pos(&m, t), (0.0, 0.0));
    }

    // ── Heading tests ───────────────────────────────────────────

    #[test]
    fn left_and_right_normalize() {
        let mut m = model(true);
        let t = one(&mut m);
        m.right(t, 30.0).unwrap();
        assert!((m.turtle(t).unwrap().heading() - 330.0).abs() < EPS);
        m.left(t, 60.0).unwrap();
        assert!((m.turtle(t).unwrap().heading() - 30.0).abs() < EPS);
    }

    #[test]
    fn towards_takes_short_way_around() {
        let mut m = model(true);
        let t = one(&mut m);
        m.set_xy(t, 4.0, 0.0).unwrap();
        // (-4, 0) lies three units east, across the seam.
        assert!(m.towards_xy(t, -4.0, 0.0).unwrap().abs() < EPS);
        assert_eq!(m.towards_xy(t, 4.0, 0.0), Err(ModelError::ZeroLengthHeading));
    }

    #[test]
    fn face_own_position_is_noop() {
        let mut m = model(true);
        let t = one(&mut m);
        m.set_heading(t, 123.0).unwrap();
        m.face_xy(t, 0.0, 0.0).unwrap();
        assert!((m.turtle(t).unwrap().heading() - 123.0).abs() < EPS);
        m.face_xy(t, 0.0, -3.0).unwrap();
        assert!((m.turtle(t).unwrap().heading() - 270.0).abs() < EPS);
    }

    // ── Tie tests ───────────────────────────────────────────────

    #[test]
    fn move_tied_follows() {
        let mut m = model(true);
        let set = m.create_ordered_turtles(2, "").unwrap();
        let (a, b) = (set.get(0).unwrap(), set.get(1).unwrap());
        m.set_xy(b, 1.0, 1.0).unwrap();
        let l = m.create_link_to(a, b, "").unwrap();
        m.link_mut(l).unwrap().set_tie_mode(TieMode {
            move_tied: true,
            ..TieMode::NONE
        });
        m.set_xy(a, 2.0, 0.0).unwrap();
        assert_eq!(pos(&m, b), (3.0, 1.0));
    }

    #[test]
    fn swivel_orbits_root() {
        let mut m = model(true);
        let set = m.create_ordered_turtles(2, "").unwrap();
        let (a, b) = (set.get(0).unwrap(), set.get(1).unwrap());
        m.set_heading(a, 0.0).unwrap();
        m.set_xy(b, 2.0, 0.0).unwrap();
        let l = m.create_link_to(a, b, "").unwrap();
        m.link_mut(l).unwrap().tie();
        let before = m.turtle(b).unwrap().heading();
        m.left(a, 90.0).unwrap();
        let (x, y) = pos(&m, b);
        assert!(x.abs() < EPS);
        assert!((y - 2.0).abs() < EPS);
        let after = m.turtle(b).unwrap().heading();
        assert!((normalize_degrees(after - before) - 90.0).abs() < EPS);
    }

    #[test]
    fn untied_link_does_not_drag() {
        let mut m = model(true);
        let set = m.create_ordered_turtles(2, "").unwrap();
        let (a, b) = (set.get(0).unwrap(), set.get(1).unwrap());
        m.create_link_to(a, b, "").unwrap();
        m.set_xy(a, 2.0, 2.0).unwrap();
        assert_eq!(pos(&m, b), (0.0, 0.0));
    }

    // ── Gradient tests ──────────────────────────────────────────

    #[test]
    fn uphill_climbs_to_best_neighbour() {
        let mut m = model(true);
        let t = one(&mut m);
        let peak = m.patch_at_coords(1, 1).unwrap();
        m.patch_mut(peak).unwrap().set_own("height", 5.0);
        let side = m.patch_at_coords(1, 0).unwrap();
        m.patch_mut(side).unwrap().set_own("height", 3.0);
        m.uphill(t, "height").unwrap();
        assert_eq!(pos(&m, t), (1.0, 1.0));
        assert!((m.turtle(t).unwrap().heading() - 45.0).abs() < EPS);
    }

    #[test]
    fn uphill4_ignores_diagonals() {
        let mut m = model(true);
        let t = one(&mut m);
        let peak = m.patch_at_coords(1, 1).unwrap();
        m.patch_mut(peak).unwrap().set_own("height", 5.0);
        let side = m.patch_at_coords(0, -1).unwrap();
        m.patch_mut(side).unwrap().set_own("height", 3.0);
        m.uphill4(t, "height").unwrap();
        assert_eq!(pos(&m, t), (0.0, -1.0));
    }

    #[test]
    fn downhill_stays_in_local_minimum() {
        let mut m = model(true);
        let t = one(&mut m);
        m.downhill(t, "height").unwrap();
        assert_eq!(pos(&m, t), (0.0, 0.0));
    }

    #[test]
    fn gradient_needs_numeric_property() {
        let mut m = model(true);
        let t = one(&mut m);
        assert_eq!(
            m.uphill(t, "missing"),
            Err(ModelError::UnknownProperty { name: "missing".into() })
        );
        assert_eq!(m.uphill(t, "name"), Err(ModelError::NotNumeric { name: "name".into() }));
    }

    // ── Geometry tests ──────────────────────────────────────────

    #[test]
    fn patch_ahead_and_sides() {
        let mut m = model(false);
        let t = one(&mut m);
        assert_eq!(m.patch_ahead(t, 2.0), m.patch_at_coords(2, 0));
        assert_eq!(m.patch_left_and_ahead(t, 90.0, 3.0), m.patch_at_coords(0, 3));
        assert_eq!(m.patch_right_and_ahead(t, 90.0, 3.0), m.patch_at_coords(0, -3));
        assert_eq!(m.patch_ahead(t, 6.0), None);
        assert_eq!(m.turtle_patch_at(t, -1.0, 2.0), m.patch_at_coords(-1, 2));
    }

    #[test]
    fn distances_wrap() {
        let mut m = model(true);
        let t = one(&mut m);
        m.set_xy(t, -5.0, 0.0).unwrap();
        assert!((m.distance_xy(t, 5.0, 0.0).unwrap() - 1.0).abs() < EPS);
        let p = m.patch_at_coords(4, 0).unwrap();
        assert!((m.distance_to_patch(t, p).unwrap() - 2.0).abs() < EPS);
    }
}
