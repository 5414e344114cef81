//! Edge (boundary) behavior for a single world axis.

/// How an axis treats coordinates and neighbors beyond its edge.
///
/// # Examples
///
/// ```
/// use patchwork_space::{EdgeBehavior, Topology, WorldBounds};
///
/// // Absorb on both axes: a corner patch has 3 neighbors.
/// let flat = Topology::new(WorldBounds::new(-2, 2, -2, 2), EdgeBehavior::Absorb, EdgeBehavior::Absorb);
/// let corner = flat.index_of(-2, -2).unwrap();
/// assert_eq!(flat.neighbours(corner, patchwork_space::Connectivity::Eight).len(), 3);
///
/// // Wrap on both axes: every patch has 8.
/// let torus = Topology::new(WorldBounds::new(-2, 2, -2, 2), EdgeBehavior::Wrap, EdgeBehavior::Wrap);
/// assert_eq!(torus.neighbours(corner, patchwork_space::Connectivity::Eight).len(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-range coordinates wrap to the opposite side (periodic).
    Wrap,
    /// Out-of-range coordinates are rejected; edge patches have fewer neighbors.
    Absorb,
}

impl EdgeBehavior {
    /// `Wrap` if `wraps`, else `Absorb`.
    pub fn from_wrapping(wraps: bool) -> Self {
        if wraps {
            Self::Wrap
        } else {
            Self::Absorb
        }
    }

    /// Whether this is [`EdgeBehavior::Wrap`].
    pub fn wraps(self) -> bool {
        matches!(self, Self::Wrap)
    }
}
