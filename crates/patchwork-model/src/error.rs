//! Error type for model operations.
//!
//! Every fallible [`Model`](crate::Model) operation validates its input
//! before mutating anything, so an `Err` always means the model is
//! unchanged by that call. Lookups of missing agents return `Option`
//! instead of an error.

use std::error::Error;
use std::fmt;

use patchwork_arena::ArenaError;
use patchwork_core::{LinkId, PatchId, TurtleId, Who};
use patchwork_space::SpaceError;

use crate::config::ConfigError;

/// Errors from model operations.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// No turtle breed has this name.
    UnknownBreed {
        /// The requested breed.
        name: String,
    },
    /// No link breed of the requested directedness has this name.
    UnknownLinkBreed {
        /// The requested breed.
        name: String,
        /// Directedness that was searched.
        directed: bool,
    },
    /// A link with the same breed, ends, and directedness already exists.
    DuplicateLink {
        /// Breed of the existing link.
        breed: String,
        /// Who number of the first end.
        end1: Who,
        /// Who number of the second end.
        end2: Who,
        /// Directedness of the existing link.
        directed: bool,
    },
    /// A turtle cannot link to itself.
    SelfLink {
        /// The turtle.
        who: Who,
    },
    /// A heading was requested between two coincident points.
    ZeroLengthHeading,
    /// Diffusion percentage outside `[0, 1]`.
    InvalidDiffusionPercent {
        /// The rejected value.
        value: f64,
    },
    /// A target position is outside the world on an axis that does not wrap.
    OutOfBounds(SpaceError),
    /// The turtle handle is stale or was never issued.
    TurtleNotFound(TurtleId),
    /// The link handle is stale or was never issued.
    LinkNotFound(LinkId),
    /// The patch id is outside the lattice.
    PatchNotFound(PatchId),
    /// No patch property with this name is declared.
    UnknownProperty {
        /// The requested property.
        name: String,
    },
    /// A property used numerically does not hold a number.
    NotNumeric {
        /// The offending property.
        name: String,
    },
    /// Agent storage is exhausted.
    Arena(ArenaError),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::UnknownBreed { name } => write!(f, "unknown turtle breed '{name}'"),
            Self::UnknownLinkBreed { name, directed } => {
                let kind = if *directed { "directed" } else { "undirected" };
                write!(f, "unknown {kind} link breed '{name}'")
            }
            Self::DuplicateLink {
                breed,
                end1,
                end2,
                directed,
            } => {
                let arrow = if *directed { "->" } else { "--" };
                write!(f, "link {end1} {arrow} {end2} of breed '{breed}' already exists")
            }
            Self::SelfLink { who } => write!(f, "turtle {who} cannot link to itself"),
            Self::ZeroLengthHeading => write!(f, "no heading between coincident points"),
            Self::InvalidDiffusionPercent { value } => {
                write!(f, "diffusion percentage must be within [0, 1], got {value}")
            }
            Self::OutOfBounds(e) => write!(f, "{e}"),
            Self::TurtleNotFound(id) => write!(f, "{id} is not alive"),
            Self::LinkNotFound(id) => write!(f, "{id} is not alive"),
            Self::PatchNotFound(id) => write!(f, "{id} is outside the world"),
            Self::UnknownProperty { name } => write!(f, "unknown property '{name}'"),
            Self::NotNumeric { name } => write!(f, "property '{name}' is not numeric"),
            Self::Arena(e) => write!(f, "arena: {e}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::OutOfBounds(e) => Some(e),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for ModelError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SpaceError> for ModelError {
    fn from(e: SpaceError) -> Self {
        Self::OutOfBounds(e)
    }
}

impl From<ArenaError> for ModelError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}
