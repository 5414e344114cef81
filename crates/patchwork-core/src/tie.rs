//! Tie modes controlling how a link propagates motion from end1 to end2.

/// Which transformations of a link's source turtle cascade to its target.
///
/// - `move_tied`: translating the source translates the target by the
///   same delta.
/// - `swivel_tied`: rotating the source swings the target around the
///   source's position.
/// - `rotate_tied`: rotating the source turns the target's heading by
///   the same angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TieMode {
    /// Translation propagates.
    pub move_tied: bool,
    /// Rotation swings the target about the source.
    pub swivel_tied: bool,
    /// Rotation turns the target's heading.
    pub rotate_tied: bool,
}

impl TieMode {
    /// No propagation.
    pub const NONE: Self = Self {
        move_tied: false,
        swivel_tied: false,
        rotate_tied: false,
    };

    /// Everything propagates; the target behaves as if welded to the source.
    pub const FIXED: Self = Self {
        move_tied: true,
        swivel_tied: true,
        rotate_tied: true,
    };

    /// Position follows the source but the target keeps its own heading.
    pub const FREE: Self = Self {
        move_tied: true,
        swivel_tied: true,
        rotate_tied: false,
    };

    /// Whether any flag is set.
    pub fn is_tied(&self) -> bool {
        self.move_tied || self.swivel_tied || self.rotate_tied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert!(!TieMode::NONE.is_tied());
        assert!(TieMode::FIXED.rotate_tied);
        assert!(TieMode::FREE.move_tied && !TieMode::FREE.rotate_tied);
        assert_eq!(TieMode::default(), TieMode::NONE);
    }
}
