//! Error types for coordinate operations.

use std::fmt;

/// Errors arising from coordinate conversion.
#[derive(Clone, Debug, PartialEq)]
pub enum SpaceError {
    /// A point lies outside the world on an axis that does not wrap, or
    /// is not a finite number.
    OutOfBounds {
        /// Requested x coordinate.
        x: f64,
        /// Requested y coordinate.
        y: f64,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { x, y } => {
                write!(f, "point ({x}, {y}) is outside the world")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
