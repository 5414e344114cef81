//! Patch lattice topology for Patchwork.
//!
//! A world is a rectangle of unit patches centered on integer coordinates
//! `[min_pxcor, max_pxcor] x [min_pycor, max_pycor]`. Continuous
//! coordinates run half a patch beyond the outermost centers on each side.
//! Each axis independently either wraps (periodic) or absorbs (hard edge).
//!
//! [`Topology`] owns the bounds and edge behavior and answers every
//! coordinate question: which patch encloses a point, how to bring a
//! point back inside a wrapping world, how far apart two points are, and
//! which patches neighbor a given one.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod direction;
pub mod edge;
pub mod error;
pub mod topology;

pub use bounds::WorldBounds;
pub use direction::{Connectivity, Direction};
pub use edge::EdgeBehavior;
pub use error::SpaceError;
pub use topology::Topology;
