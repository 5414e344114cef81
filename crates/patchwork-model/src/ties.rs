//! Tie propagation.
//!
//! A tied link carries its source's motion to the other end. The set of
//! turtles affected by a move or turn of `root` is everything reachable
//! from it over outgoing links (directed-out and undirected) whose tie
//! mode has the relevant flag, found breadth-first with a visited set so
//! cycles and mutual links terminate.

use indexmap::IndexSet;
use patchwork_core::{TieMode, TurtleId};

use crate::adjacency::Reach;
use crate::model::Model;

impl Model {
    /// Turtles tied to `root` through links whose mode satisfies `flag`,
    /// in breadth-first order. `root` itself is excluded.
    pub(crate) fn tied_descendants(&self, root: TurtleId, flag: fn(&TieMode) -> bool) -> Vec<TurtleId> {
        let mut visited = IndexSet::new();
        visited.insert(root);
        let mut frontier = vec![root];
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for turtle in frontier {
                let Some(t) = self.turtles.get(turtle) else {
                    continue;
                };
                for link_id in t.links.links(Reach::Out, "") {
                    let Some(link) = self.links.get(link_id) else {
                        continue;
                    };
                    if !flag(&link.tie_mode()) {
                        continue;
                    }
                    if let Some(other) = link.other_end(turtle) {
                        if visited.insert(other) {
                            next.push(other);
                        }
                    }
                }
            }
            frontier = next;
        }
        visited.into_iter().skip(1).collect()
    }

    /// Translate every move-tied descendant of `root` by `(dx, dy)`.
    ///
    /// A descendant that would leave the world on a non-wrapping axis
    /// stays where it is.
    pub(crate) fn drag_tied(&mut self, root: TurtleId, dx: f64, dy: f64) {
        for turtle in self.tied_descendants(root, |m| m.move_tied) {
            let Some(t) = self.turtles.get(turtle) else {
                continue;
            };
            let (x, y) = (t.xcor() + dx, t.ycor() + dy);
            if let Err(e) = self.relocate(turtle, x, y) {
                log::trace!("tied {turtle} not dragged: {e}");
            }
        }
    }

    /// Apply a turn of `delta` radians by `root` to its tied descendants:
    /// swivel-tied ones orbit `root`'s position, rotate-tied ones turn
    /// their own heading.
    pub(crate) fn turn_tied(&mut self, root: TurtleId, delta: f64) {
        let Some(r) = self.turtles.get(root) else {
            return;
        };
        let (rx, ry) = (r.xcor(), r.ycor());
        let (sin, cos) = delta.sin_cos();
        for turtle in self.tied_descendants(root, |m| m.swivel_tied) {
            let Some(t) = self.turtles.get(turtle) else {
                continue;
            };
            let (dx, dy) = self.topology.shortest_delta(rx, ry, t.xcor(), t.ycor());
            let x = rx + dx * cos - dy * sin;
            let y = ry + dx * sin + dy * cos;
            if let Err(e) = self.relocate(turtle, x, y) {
                log::trace!("tied {turtle} not swivelled: {e}");
            }
        }
        for turtle in self.tied_descendants(root, |m| m.rotate_tied) {
            if let Some(t) = self.turtles.get_mut(turtle) {
                let heading = t.heading_radians() + delta;
                t.set_heading_radians(heading);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use patchwork_space::WorldBounds;

    fn world() -> (Model, Vec<TurtleId>) {
        let mut m = Model::new(ModelConfig::with_bounds(WorldBounds::new(-5, 5, -5, 5), false, false)).unwrap();
        let ts = m.create_ordered_turtles(4, "").unwrap().to_vec();
        (m, ts)
    }

    // ── Traversal tests ─────────────────────────────────────────

    #[test]
    fn untied_links_do_not_propagate() {
        let (mut m, t) = world();
        m.create_link_to(t[0], t[1], "").unwrap();
        assert!(m.tied_descendants(t[0], TieMode::is_tied).is_empty());
    }

    #[test]
    fn chain_is_breadth_first() {
        let (mut m, t) = world();
        for (a, b) in [(0, 1), (1, 2), (0, 3)] {
            let l = m.create_link_to(t[a], t[b], "").unwrap();
            m.link_mut(l).unwrap().tie();
        }
        assert_eq!(m.tied_descendants(t[0], |m| m.move_tied), vec![t[1], t[3], t[2]]);
    }

    #[test]
    fn incoming_links_do_not_propagate() {
        let (mut m, t) = world();
        let l = m.create_link_to(t[1], t[0], "").unwrap();
        m.link_mut(l).unwrap().tie();
        assert!(m.tied_descendants(t[0], |m| m.move_tied).is_empty());
        assert_eq!(m.tied_descendants(t[1], |m| m.move_tied), vec![t[0]]);
    }

    #[test]
    fn mutual_links_terminate() {
        let (mut m, t) = world();
        let a = m.create_link_to(t[0], t[1], "").unwrap();
        let b = m.create_link_to(t[1], t[0], "").unwrap();
        m.link_mut(a).unwrap().tie();
        m.link_mut(b).unwrap().tie();
        assert_eq!(m.tied_descendants(t[0], |m| m.move_tied), vec![t[1]]);
    }

    #[test]
    fn flag_filters_links() {
        let (mut m, t) = world();
        let l = m.create_link_with(t[0], t[1], "").unwrap();
        m.link_mut(l).unwrap().set_tie_mode(TieMode::FREE);
        assert_eq!(m.tied_descendants(t[0], |m| m.swivel_tied), vec![t[1]]);
        assert!(m.tied_descendants(t[0], |m| m.rotate_tied).is_empty());
        assert_eq!(m.tied_descendants(t[1], |m| m.move_tied), vec![t[0]]);
    }
}
