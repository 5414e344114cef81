//! Strongly-typed identifiers for patches, turtles, links, and ticks.

use std::fmt;

/// A generation-scoped handle into an entity arena.
///
/// Implemented by the identifier types of entities that can die
/// (turtles and links). The `generation` lets an arena reject a handle
/// whose slot has since been freed and reused.
pub trait EntityKey: Copy + Eq + std::hash::Hash + fmt::Debug {
    /// Build a key from its raw slot index and generation.
    fn from_raw(index: u32, generation: u32) -> Self;

    /// Slot index within the owning arena.
    fn index(&self) -> u32;

    /// Generation of the slot when this key was issued.
    fn generation(&self) -> u32;
}

/// Identifies a patch by its row-major position in the lattice.
///
/// Patches are never destroyed individually, so a `PatchId` stays valid
/// until the world is resized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatchId(pub u32);

impl fmt::Display for PatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "patch#{}", self.0)
    }
}

impl From<u32> for PatchId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Handle to a live turtle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurtleId {
    index: u32,
    generation: u32,
}

impl EntityKey for TurtleId {
    fn from_raw(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for TurtleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turtle#{}v{}", self.index, self.generation)
    }
}

/// Handle to a live link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId {
    index: u32,
    generation: u32,
}

impl EntityKey for LinkId {
    fn from_raw(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    fn index(&self) -> u32 {
        self.index
    }

    fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link#{}v{}", self.index, self.generation)
    }
}

/// A turtle's permanent "who" number.
///
/// Assigned from a per-model monotonic counter and never reused, even
/// after the turtle dies or all turtles are cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Who(pub u64);

impl fmt::Display for Who {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Who {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time the model advances one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_keys_round_trip_raw_parts() {
        let t = TurtleId::from_raw(7, 3);
        assert_eq!(t.index(), 7);
        assert_eq!(t.generation(), 3);
        let l = LinkId::from_raw(0, 9);
        assert_eq!((l.index(), l.generation()), (0, 9));
    }

    #[test]
    fn keys_with_different_generations_differ() {
        assert_ne!(TurtleId::from_raw(1, 0), TurtleId::from_raw(1, 1));
    }

    #[test]
    fn display_formats() {
        assert_eq!(PatchId(4).to_string(), "patch#4");
        assert_eq!(TurtleId::from_raw(2, 1).to_string(), "turtle#2v1");
        assert_eq!(Who(12).to_string(), "12");
        assert_eq!(TickId(5).to_string(), "5");
    }
}
