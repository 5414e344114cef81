//! Per-turtle link index.
//!
//! Every turtle carries a [`TurtleLinks`] with three partitions:
//! directed links leaving it, directed links arriving at it, and
//! undirected links touching it. Each partition is indexed twice:
//!
//! ```text
//! Partition
//! ├── by_neighbour: neighbour -> ordered set of links   (any breed)
//! └── by_breed:     breed -> neighbour -> link          (one per pair)
//! ```
//!
//! The breed map is a plain map because a (breed, ends, directedness)
//! triple identifies at most one link. Unbred links are filed under `""`
//! there. Queries that take a breed treat `""` as "any breed" and read
//! `by_neighbour`; a named breed reads `by_breed`. Every query is
//! O(degree) or better.

use indexmap::{IndexMap, IndexSet};
use patchwork_core::{LinkId, TurtleId};

/// Which partitions a query reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reach {
    /// Outgoing directed and undirected links.
    Out,
    /// Incoming directed and undirected links.
    In,
    /// Every incident link.
    Any,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Partition {
    by_neighbour: IndexMap<TurtleId, IndexSet<LinkId>>,
    by_breed: IndexMap<String, IndexMap<TurtleId, LinkId>>,
}

impl Partition {
    fn insert(&mut self, neighbour: TurtleId, breed: &str, link: LinkId) {
        self.by_neighbour.entry(neighbour).or_default().insert(link);
        self.by_breed
            .entry(breed.to_owned())
            .or_default()
            .insert(neighbour, link);
    }

    fn remove(&mut self, neighbour: TurtleId, breed: &str, link: LinkId) {
        if let Some(links) = self.by_neighbour.get_mut(&neighbour) {
            links.shift_remove(&link);
            if links.is_empty() {
                self.by_neighbour.shift_remove(&neighbour);
            }
        }
        if let Some(pairs) = self.by_breed.get_mut(breed) {
            if pairs.get(&neighbour) == Some(&link) {
                pairs.shift_remove(&neighbour);
            }
            if pairs.is_empty() {
                self.by_breed.shift_remove(breed);
            }
        }
    }

    /// The link of exactly `breed` (`""` meaning unbred) to `neighbour`.
    fn exact(&self, neighbour: TurtleId, breed: &str) -> Option<LinkId> {
        self.by_breed.get(breed)?.get(&neighbour).copied()
    }

    /// A link to `neighbour`, of any breed when `breed` is `""`.
    fn link_to(&self, neighbour: TurtleId, breed: &str) -> Option<LinkId> {
        if breed.is_empty() {
            self.by_neighbour
                .get(&neighbour)
                .and_then(|links| links.first().copied())
        } else {
            self.exact(neighbour, breed)
        }
    }

    fn neighbours<'a>(&'a self, breed: &str) -> Box<dyn Iterator<Item = TurtleId> + 'a> {
        if breed.is_empty() {
            Box::new(self.by_neighbour.keys().copied())
        } else {
            match self.by_breed.get(breed) {
                Some(pairs) => Box::new(pairs.keys().copied()),
                None => Box::new(std::iter::empty()),
            }
        }
    }

    fn links<'a>(&'a self, breed: &str) -> Box<dyn Iterator<Item = LinkId> + 'a> {
        if breed.is_empty() {
            Box::new(self.by_neighbour.values().flat_map(|s| s.iter().copied()))
        } else {
            match self.by_breed.get(breed) {
                Some(pairs) => Box::new(pairs.values().copied()),
                None => Box::new(std::iter::empty()),
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.by_neighbour.is_empty()
    }
}

/// The three-way link index of one turtle.
#[derive(Clone, Debug, Default)]
pub(crate) struct TurtleLinks {
    out: Partition,
    incoming: Partition,
    undirected: Partition,
}

impl TurtleLinks {
    /// Record a directed link from this turtle to `to`.
    pub(crate) fn add_out(&mut self, to: TurtleId, breed: &str, link: LinkId) {
        self.out.insert(to, breed, link);
    }

    /// Record a directed link from `from` to this turtle.
    pub(crate) fn add_in(&mut self, from: TurtleId, breed: &str, link: LinkId) {
        self.incoming.insert(from, breed, link);
    }

    /// Record an undirected link between this turtle and `other`.
    pub(crate) fn add_undirected(&mut self, other: TurtleId, breed: &str, link: LinkId) {
        self.undirected.insert(other, breed, link);
    }

    pub(crate) fn remove_out(&mut self, to: TurtleId, breed: &str, link: LinkId) {
        self.out.remove(to, breed, link);
    }

    pub(crate) fn remove_in(&mut self, from: TurtleId, breed: &str, link: LinkId) {
        self.incoming.remove(from, breed, link);
    }

    pub(crate) fn remove_undirected(&mut self, other: TurtleId, breed: &str, link: LinkId) {
        self.undirected.remove(other, breed, link);
    }

    /// Whether a link with exactly this breed, neighbour, and direction
    /// exists. Used to enforce link uniqueness.
    pub(crate) fn has_exact(&self, neighbour: TurtleId, breed: &str, directed: bool) -> bool {
        self.exact(neighbour, breed, directed).is_some()
    }

    /// The link of exactly this breed (`""` meaning unbred) leaving this
    /// turtle for `neighbour`, or the undirected one between them.
    pub(crate) fn exact(&self, neighbour: TurtleId, breed: &str, directed: bool) -> Option<LinkId> {
        if directed {
            self.out.exact(neighbour, breed)
        } else {
            self.undirected.exact(neighbour, breed)
        }
    }

    fn partitions(&self, reach: Reach) -> [Option<&Partition>; 3] {
        match reach {
            Reach::Out => [Some(&self.out), Some(&self.undirected), None],
            Reach::In => [Some(&self.incoming), Some(&self.undirected), None],
            Reach::Any => [Some(&self.out), Some(&self.incoming), Some(&self.undirected)],
        }
    }

    /// Distinct neighbours reachable in `reach`, in partition order.
    pub(crate) fn neighbours(&self, reach: Reach, breed: &str) -> IndexSet<TurtleId> {
        self.partitions(reach)
            .into_iter()
            .flatten()
            .flat_map(|p| p.neighbours(breed))
            .collect()
    }

    /// Whether `other` is a neighbour in `reach`.
    pub(crate) fn is_neighbour(&self, reach: Reach, other: TurtleId, breed: &str) -> bool {
        self.link_with(reach, other, breed).is_some()
    }

    /// Incident links in `reach`, in partition order.
    pub(crate) fn links(&self, reach: Reach, breed: &str) -> IndexSet<LinkId> {
        self.partitions(reach)
            .into_iter()
            .flatten()
            .flat_map(|p| p.links(breed))
            .collect()
    }

    /// The first link to `other` found in `reach`.
    pub(crate) fn link_with(&self, reach: Reach, other: TurtleId, breed: &str) -> Option<LinkId> {
        self.partitions(reach)
            .into_iter()
            .flatten()
            .find_map(|p| p.link_to(other, breed))
    }

    /// Whether no links touch this turtle.
    pub(crate) fn is_empty(&self) -> bool {
        self.out.is_empty() && self.incoming.is_empty() && self.undirected.is_empty()
    }

    /// Number of distinct incident links.
    pub(crate) fn degree(&self) -> usize {
        self.links(Reach::Any, "").len()
    }
}
