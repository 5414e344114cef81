//! Integer patch-coordinate bounds of a world.

/// Inclusive patch-coordinate bounds.
///
/// Bounds are valid when, on each axis, `min <= 0 <= max` and `min < max`.
/// [`resolved`](Self::resolved) substitutes [`WorldBounds::DEFAULT`] for
/// invalid input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldBounds {
    /// Leftmost patch column.
    pub min_pxcor: i32,
    /// Rightmost patch column.
    pub max_pxcor: i32,
    /// Bottom patch row.
    pub min_pycor: i32,
    /// Top patch row.
    pub max_pycor: i32,
}

impl WorldBounds {
    /// `[-15, 15] x [-15, 15]`.
    pub const DEFAULT: Self = Self {
        min_pxcor: -15,
        max_pxcor: 15,
        min_pycor: -15,
        max_pycor: 15,
    };

    /// Bounds from their four corners.
    pub const fn new(min_pxcor: i32, max_pxcor: i32, min_pycor: i32, max_pycor: i32) -> Self {
        Self {
            min_pxcor,
            max_pxcor,
            min_pycor,
            max_pycor,
        }
    }

    /// Whether these bounds describe a usable world.
    pub fn is_valid(&self) -> bool {
        axis_valid(self.min_pxcor, self.max_pxcor) && axis_valid(self.min_pycor, self.max_pycor)
    }

    /// These bounds, or [`WorldBounds::DEFAULT`] if they are invalid.
    pub fn resolved(self) -> Self {
        if self.is_valid() {
            self
        } else {
            log::warn!("invalid world bounds {self:?}, using {:?}", Self::DEFAULT);
            Self::DEFAULT
        }
    }

    /// Number of patch columns.
    pub fn width(&self) -> u32 {
        (i64::from(self.max_pxcor) - i64::from(self.min_pxcor) + 1) as u32
    }

    /// Number of patch rows.
    pub fn height(&self) -> u32 {
        (i64::from(self.max_pycor) - i64::from(self.min_pycor) + 1) as u32
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn axis_valid(min: i32, max: i32) -> bool {
    min <= 0 && max >= 0 && max > min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_31_square() {
        let b = WorldBounds::default();
        assert_eq!((b.width(), b.height()), (31, 31));
    }

    #[test]
    fn invalid_bounds_fall_back() {
        for bad in [
            WorldBounds::new(0, 0, 0, 0),
            WorldBounds::new(1, 5, -1, 1),
            WorldBounds::new(-5, -1, -1, 1),
            WorldBounds::new(-1, 1, 2, 2),
        ] {
            assert!(!bad.is_valid(), "{bad:?}");
            assert_eq!(bad.resolved(), WorldBounds::DEFAULT);
        }
    }

    #[test]
    fn asymmetric_bounds_are_kept() {
        let b = WorldBounds::new(0, 4, -1, 1).resolved();
        assert_eq!(b, WorldBounds::new(0, 4, -1, 1));
        assert_eq!((b.width(), b.height()), (5, 3));
    }
}
