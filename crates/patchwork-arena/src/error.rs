//! Arena-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// Every addressable slot is occupied.
    CapacityExceeded {
        /// Number of slots in the arena.
        capacity: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { capacity } => {
                write!(f, "arena capacity exceeded: {capacity} slots in use")
            }
        }
    }
}

impl Error for ArenaError {}
