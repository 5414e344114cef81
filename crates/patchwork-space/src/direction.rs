//! Compass directions between neighboring patches.

/// One of the eight directions from a patch to a neighbor.
///
/// Headings follow the world convention: 0 degrees is +x (east) and
/// angles grow counter-clockwise, so north (+y) is 90.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// +x.
    East,
    /// +x, +y.
    NorthEast,
    /// +y.
    North,
    /// -x, +y.
    NorthWest,
    /// -x.
    West,
    /// -x, -y.
    SouthWest,
    /// -y.
    South,
    /// +x, -y.
    SouthEast,
}

impl Direction {
    /// All eight directions, counter-clockwise from east.
    pub const ALL: [Direction; 8] = [
        Self::East,
        Self::NorthEast,
        Self::North,
        Self::NorthWest,
        Self::West,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
    ];

    /// The four edge-sharing directions, counter-clockwise from east.
    pub const CARDINAL: [Direction; 4] = [Self::East, Self::North, Self::West, Self::South];

    /// Patch offset `(dx, dy)` to the neighbor in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::NorthEast => (1, 1),
            Self::North => (0, 1),
            Self::NorthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::SouthWest => (-1, -1),
            Self::South => (0, -1),
            Self::SouthEast => (1, -1),
        }
    }

    /// Heading in degrees pointing toward the neighbor.
    pub fn heading(self) -> f64 {
        45.0 * self.slot() as f64
    }

    /// Position of this direction in [`Direction::ALL`].
    pub fn slot(self) -> usize {
        self as usize
    }
}

/// Which neighbors count as adjacent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// Edge-sharing neighbors only (Von Neumann).
    Four,
    /// Edge- and corner-sharing neighbors (Moore).
    Eight,
}

impl Connectivity {
    /// The directions this connectivity includes.
    pub fn directions(self) -> &'static [Direction] {
        match self {
            Self::Four => &Direction::CARDINAL,
            Self::Eight => &Direction::ALL,
        }
    }

    /// Number of neighbors of an interior patch.
    pub fn degree(self) -> usize {
        self.directions().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_step_by_45() {
        let hs: Vec<f64> = Direction::ALL.iter().map(|d| d.heading()).collect();
        assert_eq!(hs, vec![0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0]);
    }

    #[test]
    fn offsets_match_headings() {
        for d in Direction::ALL {
            let (dx, dy) = d.offset();
            let rad = d.heading().to_radians();
            assert!((rad.cos().round() as i32 - dx).abs() == 0, "{d:?}");
            assert!((rad.sin().round() as i32 - dy).abs() == 0, "{d:?}");
        }
    }

    #[test]
    fn connectivity_degree() {
        assert_eq!(Connectivity::Four.degree(), 4);
        assert_eq!(Connectivity::Eight.degree(), 8);
    }
}
