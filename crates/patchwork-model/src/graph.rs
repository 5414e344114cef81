//! Links between turtles: creation, destruction, breed changes, and the
//! neighbor and incidence queries served by each turtle's link index.
//!
//! Breed arguments name a link breed of the matching directedness. In
//! queries, `""` matches links of any breed.

use patchwork_agentset::{LinkSet, TurtleSet};
use patchwork_core::{LinkId, TurtleId};

use crate::adjacency::Reach;
use crate::error::ModelError;
use crate::link::Link;
use crate::model::Model;

impl Model {
    // ── Creation ────────────────────────────────────────────────

    /// Create a directed link of `breed` from `from` to `to`.
    pub fn create_link_to(&mut self, from: TurtleId, to: TurtleId, breed: &str) -> Result<LinkId, ModelError> {
        self.create_link(from, to, breed, true)
    }

    /// Create a directed link of `breed` from `from` to `to`, seen from
    /// the target's side.
    pub fn create_link_from(&mut self, to: TurtleId, from: TurtleId, breed: &str) -> Result<LinkId, ModelError> {
        self.create_link(from, to, breed, true)
    }

    /// Create an undirected link of `breed` between `a` and `b`; `a`
    /// becomes end1.
    pub fn create_link_with(&mut self, a: TurtleId, b: TurtleId, breed: &str) -> Result<LinkId, ModelError> {
        self.create_link(a, b, breed, false)
    }

    /// Directed links from `from` to every member of `targets`.
    ///
    /// Targets that would produce a self-link or a duplicate are skipped.
    pub fn create_links_to(&mut self, from: TurtleId, targets: &TurtleSet, breed: &str) -> Result<LinkSet, ModelError> {
        self.create_links(from, targets, breed, |me, other| (me, other), true)
    }

    /// Directed links from every member of `sources` to `to`.
    pub fn create_links_from(&mut self, to: TurtleId, sources: &TurtleSet, breed: &str) -> Result<LinkSet, ModelError> {
        self.create_links(to, sources, breed, |me, other| (other, me), true)
    }

    /// Undirected links between `turtle` and every member of `others`.
    pub fn create_links_with(&mut self, turtle: TurtleId, others: &TurtleSet, breed: &str) -> Result<LinkSet, ModelError> {
        self.create_links(turtle, others, breed, |me, other| (me, other), false)
    }

    fn create_links(
        &mut self,
        me: TurtleId,
        others: &TurtleSet,
        breed: &str,
        ends: fn(TurtleId, TurtleId) -> (TurtleId, TurtleId),
        directed: bool,
    ) -> Result<LinkSet, ModelError> {
        self.turtle_ref(me)?;
        self.check_link_breed(breed, directed)?;
        let mut created = LinkSet::new();
        for other in others.iter() {
            let (end1, end2) = ends(me, other);
            match self.create_link(end1, end2, breed, directed) {
                Ok(link) => {
                    created.insert(link);
                }
                Err(e) => log::trace!("skipped link {end1} -> {end2}: {e}"),
            }
        }
        Ok(created)
    }

    fn create_link(&mut self, end1: TurtleId, end2: TurtleId, breed: &str, directed: bool) -> Result<LinkId, ModelError> {
        let a = self.turtle_ref(end1)?;
        let b = self.turtle_ref(end2)?;
        if end1 == end2 {
            return Err(ModelError::SelfLink { who: a.who() });
        }
        let shape = self
            .check_link_breed(breed, directed)?
            .unwrap_or(self.default_link_shape.as_str())
            .to_owned();
        if a.links.has_exact(end2, breed, directed) {
            return Err(ModelError::DuplicateLink {
                breed: breed.into(),
                end1: a.who(),
                end2: b.who(),
                directed,
            });
        }
        let id = self.links.insert(Link::new(end1, end2, directed, breed, shape))?;
        self.all_links.insert(id);
        self.file_in_breed(id, breed, directed);
        self.index_link(id, end1, end2, breed, directed);
        Ok(id)
    }

    /// The breed's default shape, or an error if no such breed exists for
    /// this directedness.
    fn check_link_breed(&self, breed: &str, directed: bool) -> Result<Option<&str>, ModelError> {
        self.link_breed_table(directed)
            .get(breed)
            .map(|b| b.default_shape())
            .ok_or_else(|| ModelError::UnknownLinkBreed {
                name: breed.into(),
                directed,
            })
    }

    fn file_in_breed(&mut self, link: LinkId, breed: &str, directed: bool) {
        let table = self.link_breed_table_mut(directed);
        if let Some(general) = table.get_mut("") {
            general.members.insert(link);
        }
        if !breed.is_empty() {
            if let Some(b) = table.get_mut(breed) {
                b.members.insert(link);
            }
        }
    }

    fn unfile_from_breed(&mut self, link: LinkId, breed: &str, directed: bool) {
        let table = self.link_breed_table_mut(directed);
        if let Some(general) = table.get_mut("") {
            general.members.remove(link);
        }
        if !breed.is_empty() {
            if let Some(b) = table.get_mut(breed) {
                b.members.remove(link);
            }
        }
    }

    fn index_link(&mut self, link: LinkId, end1: TurtleId, end2: TurtleId, breed: &str, directed: bool) {
        if let Some(t) = self.turtles.get_mut(end1) {
            if directed {
                t.links.add_out(end2, breed, link);
            } else {
                t.links.add_undirected(end2, breed, link);
            }
        }
        if let Some(t) = self.turtles.get_mut(end2) {
            if directed {
                t.links.add_in(end1, breed, link);
            } else {
                t.links.add_undirected(end1, breed, link);
            }
        }
    }

    fn unindex_link(&mut self, link: LinkId, end1: TurtleId, end2: TurtleId, breed: &str, directed: bool) {
        if let Some(t) = self.turtles.get_mut(end1) {
            if directed {
                t.links.remove_out(end2, breed, link);
            } else {
                t.links.remove_undirected(end2, breed, link);
            }
        }
        if let Some(t) = self.turtles.get_mut(end2) {
            if directed {
                t.links.remove_in(end1, breed, link);
            } else {
                t.links.remove_undirected(end1, breed, link);
            }
        }
    }

    // ── Destruction and breed changes ───────────────────────────

    /// Kill `link`, removing it from every registry and both ends' indexes.
    pub fn kill_link(&mut self, link: LinkId) -> Result<(), ModelError> {
        let dead = self.links.remove(link).ok_or(ModelError::LinkNotFound(link))?;
        self.all_links.remove(link);
        self.unfile_from_breed(link, dead.breed(), dead.is_directed());
        self.unindex_link(link, dead.end1(), dead.end2(), dead.breed(), dead.is_directed());
        log::trace!("killed {link} ({} -> {})", dead.end1(), dead.end2());
        Ok(())
    }

    /// Move `link` into `breed` of its own directedness.
    ///
    /// Unknown breeds, and changes that would duplicate an existing link,
    /// are ignored. Returns `true` when the link ends up in `breed`.
    pub fn set_link_breed(&mut self, link: LinkId, breed: &str) -> bool {
        let Some(l) = self.links.get(link) else {
            return false;
        };
        let (end1, end2, directed) = (l.end1(), l.end2(), l.is_directed());
        let old = l.breed().to_owned();
        if old == breed {
            return true;
        }
        if self.check_link_breed(breed, directed).is_err() {
            log::debug!("ignored change of {link} to unknown breed '{breed}'");
            return false;
        }
        let duplicate = self
            .turtles
            .get(end1)
            .is_some_and(|t| t.links.has_exact(end2, breed, directed));
        if duplicate {
            log::debug!("ignored change of {link} to breed '{breed}': link exists");
            return false;
        }
        self.unfile_from_breed(link, &old, directed);
        self.unindex_link(link, end1, end2, &old, directed);
        self.file_in_breed(link, breed, directed);
        self.index_link(link, end1, end2, breed, directed);
        if let Some(l) = self.links.get_mut(link) {
            l.set_breed(breed);
        }
        log::trace!("{link} changed breed '{old}' -> '{breed}'");
        true
    }

    // ── Link geometry ───────────────────────────────────────────

    /// The end of `link` that is not `turtle`.
    pub fn other_end(&self, link: LinkId, turtle: TurtleId) -> Option<TurtleId> {
        self.links.get(link)?.other_end(turtle)
    }

    /// Distance between the ends, the short way around on wrapping axes.
    pub fn link_length(&self, link: LinkId) -> Option<f64> {
        let l = self.links.get(link)?;
        self.distance_to_turtle(l.end1(), l.end2())
    }

    /// Heading in degrees from end1 to end2.
    pub fn link_heading(&self, link: LinkId) -> Result<f64, ModelError> {
        let l = self.link_ref(link)?;
        let a = self.turtle_ref(l.end1())?;
        let b = self.turtle_ref(l.end2())?;
        self.heading_between(a.xcor(), a.ycor(), b.xcor(), b.ycor())
    }

    /// The link of exactly `breed` from `end1` to `end2` (directed), or
    /// between them (undirected, either order).
    pub fn link_between(&self, end1: TurtleId, end2: TurtleId, breed: &str, directed: bool) -> Option<LinkId> {
        let t = self.turtles.get(end1)?;
        t.links.exact(end2, breed, directed)
    }

    // ── Neighbor queries ────────────────────────────────────────

    /// Turtles joined to `turtle` by any link of `breed`.
    pub fn link_neighbors(&self, turtle: TurtleId, breed: &str) -> TurtleSet {
        self.neighbour_set(turtle, Reach::Any, breed)
    }

    /// Turtles with a link of `breed` into `turtle` (undirected links count).
    pub fn in_link_neighbors(&self, turtle: TurtleId, breed: &str) -> TurtleSet {
        self.neighbour_set(turtle, Reach::In, breed)
    }

    /// Turtles `turtle` has a link of `breed` out to (undirected links count).
    pub fn out_link_neighbors(&self, turtle: TurtleId, breed: &str) -> TurtleSet {
        self.neighbour_set(turtle, Reach::Out, breed)
    }

    /// Every link of `breed` touching `turtle`.
    pub fn my_links(&self, turtle: TurtleId, breed: &str) -> LinkSet {
        self.link_set(turtle, Reach::Any, breed)
    }

    /// Links of `breed` arriving at `turtle`, undirected ones included.
    pub fn my_in_links(&self, turtle: TurtleId, breed: &str) -> LinkSet {
        self.link_set(turtle, Reach::In, breed)
    }

    /// Links of `breed` leaving `turtle`, undirected ones included.
    pub fn my_out_links(&self, turtle: TurtleId, breed: &str) -> LinkSet {
        self.link_set(turtle, Reach::Out, breed)
    }

    /// Whether a link of `breed` joins the two turtles.
    pub fn is_link_neighbor(&self, turtle: TurtleId, other: TurtleId, breed: &str) -> bool {
        self.reaches(turtle, Reach::Any, other, breed)
    }

    /// Whether `other` has a link of `breed` into `turtle`.
    pub fn is_in_link_neighbor(&self, turtle: TurtleId, other: TurtleId, breed: &str) -> bool {
        self.reaches(turtle, Reach::In, other, breed)
    }

    /// Whether `turtle` has a link of `breed` out to `other`.
    pub fn is_out_link_neighbor(&self, turtle: TurtleId, other: TurtleId, breed: &str) -> bool {
        self.reaches(turtle, Reach::Out, other, breed)
    }

    /// A link of `breed` from `other` into `turtle`.
    pub fn in_link_from(&self, turtle: TurtleId, other: TurtleId, breed: &str) -> Option<LinkId> {
        self.turtles.get(turtle)?.links.link_with(Reach::In, other, breed)
    }

    /// A link of `breed` from `turtle` out to `other`.
    pub fn out_link_to(&self, turtle: TurtleId, other: TurtleId, breed: &str) -> Option<LinkId> {
        self.turtles.get(turtle)?.links.link_with(Reach::Out, other, breed)
    }

    /// A link of `breed` joining the two turtles in either direction.
    pub fn link_with(&self, turtle: TurtleId, other: TurtleId, breed: &str) -> Option<LinkId> {
        self.turtles.get(turtle)?.links.link_with(Reach::Any, other, breed)
    }

    /// Number of distinct links touching `turtle`.
    pub fn link_degree(&self, turtle: TurtleId) -> usize {
        self.turtles.get(turtle).map_or(0, |t| t.links.degree())
    }

    fn neighbour_set(&self, turtle: TurtleId, reach: Reach, breed: &str) -> TurtleSet {
        self.turtles
            .get(turtle)
            .map(|t| t.links.neighbours(reach, breed).into_iter().collect())
            .unwrap_or_default()
    }

    fn link_set(&self, turtle: TurtleId, reach: Reach, breed: &str) -> LinkSet {
        self.turtles
            .get(turtle)
            .map(|t| t.links.links(reach, breed).into_iter().collect())
            .unwrap_or_default()
    }

    fn reaches(&self, turtle: TurtleId, reach: Reach, other: TurtleId, breed: &str) -> bool {
        self.turtles
            .get(turtle)
            .is_some_and(|t| t.links.is_neighbour(reach, other, breed))
    }
}
