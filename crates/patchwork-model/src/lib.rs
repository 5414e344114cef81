//! The Patchwork model: patches, turtles, links, and the operations that
//! keep them consistent.
//!
//! A [`Model`] owns every registry of one simulation: the patch lattice,
//! the turtle and link arenas with their ordered global sets, the breed
//! tables, the who-number index, the seeded RNG, and the tick counter.
//! Agents are addressed by generation-checked handles ([`TurtleId`],
//! [`LinkId`]) or lattice indexes ([`PatchId`]); a handle to a dead agent
//! resolves to `None` rather than to a reused slot.
//!
//! Operations that span entities (moving a turtle between patches,
//! cascading a kill to incident links, propagating motion through tied
//! links) are methods on [`Model`], grouped by concern:
//!
//! - [`create`]: bulk creation, sprouting, hatching, breed changes, death.
//! - [`motion`]: position, heading, gradient following, turtle geometry.
//! - [`graph`]: link creation, destruction, and neighbor queries.
//! - [`query`]: spatial queries and layout.
//! - [`diffuse`]: patch-variable diffusion.
//! - [`snapshot`]: owned views for presentation layers.
//! - [`driver`]: the serialized [`Runner`] for [`Simulation`]s.
//!
//! [`TurtleId`]: patchwork_core::TurtleId
//! [`LinkId`]: patchwork_core::LinkId
//! [`PatchId`]: patchwork_core::PatchId

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod adjacency;
pub mod breed;
pub mod config;
pub mod create;
pub mod diffuse;
pub mod driver;
pub mod error;
pub mod graph;
pub mod link;
pub mod model;
pub mod motion;
pub mod patch;
pub mod query;
pub mod snapshot;
mod ties;
pub mod turtle;

pub use breed::{LinkBreed, TurtleBreed};
pub use config::{ConfigError, LinkBreedDef, ModelConfig, RunnerConfig, TurtleBreedDef};
pub use driver::{RunError, RunReport, Runner, Simulation, StopReason};
pub use error::ModelError;
pub use link::Link;
pub use model::{Agent, Model};
pub use patch::Patch;
pub use snapshot::{LinkView, PatchView, TurtleView, WorldSnapshot};
pub use turtle::{Turtle, DEFAULT_TURTLE_SIZE};
