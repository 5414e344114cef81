//! Test fixtures and scripted simulations for Patchwork development.
//!
//! Provides small prebuilt worlds, a breed-heavy [`zoo_config`], and two
//! [`Simulation`] implementations for driver tests:
//!
//! - [`RandomWalkers`]: turtles wander one step per tick.
//! - [`Grazers`]: sheep eat regrowing grass, breed, and starve, so the
//!   population rises and falls.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{Grazers, RandomWalkers};

use patchwork_model::{LinkBreedDef, Model, ModelConfig, TurtleBreedDef};
use patchwork_space::WorldBounds;

/// Absolute tolerance for coordinate and heading comparisons.
pub const EPS: f64 = 1e-9;

/// Assert two floats agree within [`EPS`].
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

/// A 3x3 world spanning `-1..=1` on both axes.
pub fn small_world(wrap: bool) -> Model {
    Model::new(ModelConfig::with_bounds(
        WorldBounds::new(-1, 1, -1, 1),
        wrap,
        wrap,
    ))
    .unwrap()
}

/// A square world spanning `-half..=half` on both axes.
pub fn square_world(half: i32, wrap: bool) -> Model {
    Model::new(square_config(half, wrap)).unwrap()
}

/// Configuration for a square world spanning `-half..=half`.
pub fn square_config(half: i32, wrap: bool) -> ModelConfig {
    ModelConfig::with_bounds(WorldBounds::new(-half, half, -half, half), wrap, wrap)
}

/// A seeded 11x11 torus with two turtle breeds, a directed and an
/// undirected link breed, and a few declared properties.
///
/// - `wolves` (shape `"wolf"`, own `hunger`), `sheep` (own `wool`)
/// - `streets` (directed), `friendships` (undirected, shape `"dashed"`)
/// - turtles own `energy`, patches own `grass` and `chemical`
/// - global `population`
pub fn zoo_config(seed: u64) -> ModelConfig {
    square_config(5, true)
        .seed(seed)
        .turtle_breed(
            TurtleBreedDef::new("wolves")
                .with_shape("wolf")
                .with_property("hunger", 0.0),
        )
        .turtle_breed(TurtleBreedDef::new("sheep").with_property("wool", 1.0))
        .directed_link_breed(LinkBreedDef::new("streets"))
        .undirected_link_breed(LinkBreedDef::new("friendships").with_shape("dashed"))
        .turtle_property("energy", 10.0)
        .patch_property("grass", 1.0)
        .patch_property("chemical", 0.0)
        .global("population", 0.0)
}

/// [`zoo_config`] built into a model.
pub fn zoo(seed: u64) -> Model {
    Model::new(zoo_config(seed)).unwrap()
}
