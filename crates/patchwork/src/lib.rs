//! Patchwork: an agent-based modeling engine in the style of NetLogo.
//!
//! A world is a fixed lattice of patches that may wrap on either axis.
//! Turtles move over it with continuous positions and headings; links
//! join pairs of turtles as directed or undirected, optionally breeded,
//! edges. This facade re-exports every sub-crate; for most users adding
//! `patchwork` as a single dependency is enough.
//!
//! # Quick start
//!
//! ```rust
//! use patchwork::prelude::*;
//!
//! let config = ModelConfig::with_bounds(WorldBounds::new(-5, 5, -5, 5), true, true)
//!     .seed(42)
//!     .turtle_breed(TurtleBreedDef::new("ants"))
//!     .patch_property("pheromone", 0.0);
//! let mut model = Model::new(config).unwrap();
//!
//! // Eight ants facing every 45 degrees, each walking two steps out.
//! let ants = model.create_ordered_turtles(8, "ants").unwrap();
//! model.try_ask(&ants, |m, ant| m.forward(ant, 2.0)).unwrap();
//!
//! // Mark the center and let the mark spread.
//! let center = model.patch_at_coords(0, 0).unwrap();
//! model.patch_mut(center).unwrap().set_own("pheromone", 8.0);
//! model.diffuse("pheromone", 0.5).unwrap();
//! model.tick();
//!
//! let snapshot = model.snapshot();
//! assert_eq!(snapshot.tick, TickId(1));
//! assert_eq!(snapshot.turtles.len(), 8);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `patchwork-core` | IDs, colors, property values, tie modes |
//! | [`arena`] | `patchwork-arena` | Generational entity storage |
//! | [`agentset`] | `patchwork-agentset` | Ordered agent sets and cursors |
//! | [`space`] | `patchwork-space` | Bounds, edge behavior, topology |
//! | [`model`] | `patchwork-model` | The model, its operations, and the runner |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Identifiers, colors, property values, and tie modes (`patchwork-core`).
pub use patchwork_core as types;

/// Generational slot arena (`patchwork-arena`).
pub use patchwork_arena as arena;

/// Ordered agent sets with set algebra (`patchwork-agentset`).
///
/// [`agentset::TurtleSet`], [`agentset::PatchSet`], and
/// [`agentset::LinkSet`] are the set types every query returns.
pub use patchwork_agentset as agentset;

/// World bounds and lattice topology (`patchwork-space`).
pub use patchwork_space as space;

/// The model, agents, snapshots, and simulation driver (`patchwork-model`).
///
/// [`model::Model`] is the entry point; [`model::Runner`] drives a
/// [`model::Simulation`] with serialized access.
pub use patchwork_model as model;

/// Common imports for typical Patchwork usage.
///
/// ```rust
/// use patchwork::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use patchwork_core::{Color, LinkId, PatchId, TickId, TieMode, TurtleId, Value, Who};

    // Agent sets
    pub use patchwork_agentset::{LinkSet, OrderedAgentSet, PatchSet, TurtleSet};

    // Space
    pub use patchwork_space::{EdgeBehavior, WorldBounds};

    // Model
    pub use patchwork_model::{
        ConfigError, LinkBreedDef, Model, ModelConfig, ModelError, TurtleBreedDef, WorldSnapshot,
    };

    // Driver
    pub use patchwork_model::{RunError, RunReport, Runner, RunnerConfig, Simulation, StopReason};
}
