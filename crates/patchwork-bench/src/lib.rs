//! Benchmark profiles for the Patchwork engine.
//!
//! - [`reference_profile`]: 101x101 torus (10K patches) with a scattered
//!   population and a diffusing patch variable.
//! - [`stress_profile`]: 317x317 torus (~100K patches) for stress testing.
//! - [`ring_network`]: turtles on a circle, each linked to its next
//!   `degree` neighbors.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use patchwork_agentset::TurtleSet;
use patchwork_core::TurtleId;
use patchwork_model::{LinkBreedDef, Model, ModelConfig, ModelError, TurtleBreedDef};
use patchwork_space::WorldBounds;

/// Build a reference benchmark model: 101x101 torus, `turtles` walkers
/// scattered uniformly, and a `heat` patch variable seeded on every tenth
/// patch.
pub fn reference_profile(seed: u64, turtles: usize) -> Result<Model, ModelError> {
    profile(50, seed, turtles)
}

/// Build a stress benchmark model: 317x317 torus, otherwise as
/// [`reference_profile`].
pub fn stress_profile(seed: u64, turtles: usize) -> Result<Model, ModelError> {
    profile(158, seed, turtles)
}

fn profile(half: i32, seed: u64, turtles: usize) -> Result<Model, ModelError> {
    let config = ModelConfig::with_bounds(WorldBounds::new(-half, half, -half, half), true, true)
        .seed(seed)
        .turtle_breed(TurtleBreedDef::new("walkers"))
        .patch_property("heat", 0.0);
    let mut model = Model::new(config)?;

    let patches = model.patches().clone();
    for (i, p) in patches.iter().enumerate() {
        if i % 10 == 0 {
            if let Some(patch) = model.patch_mut(p) {
                patch.set_own("heat", 100.0);
            }
        }
    }

    let walkers = model.create_turtles(turtles, "walkers")?;
    model.try_ask(&walkers, |m, t| {
        let (x, y) = (m.random_xcor(), m.random_ycor());
        m.set_xy(t, x, y)
    })?;
    Ok(model)
}

/// Build `n` turtles laid out on a circle, each with an undirected
/// `roads` link to its next `degree` neighbors around the ring.
///
/// Returns the model and the turtles in ring order.
pub fn ring_network(n: usize, degree: usize) -> Result<(Model, Vec<TurtleId>), ModelError> {
    let config = ModelConfig::default()
        .seed(n as u64)
        .undirected_link_breed(LinkBreedDef::new("roads"));
    let mut model = Model::new(config)?;
    let ring = model.create_ordered_turtles(n, "")?;
    model.layout_circle(&ring, 12.0)?;

    let ids = ring.to_vec();
    for (i, t) in ids.iter().enumerate() {
        let ahead: TurtleSet = (1..=degree).map(|step| ids[(i + step) % n]).collect();
        model.create_links_with(*t, &ahead, "roads")?;
    }
    Ok((model, ids))
}
