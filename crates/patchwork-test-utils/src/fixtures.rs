//! Scripted simulations for driver and replay tests.
//!
//! Both fixtures are deterministic for a given seed: all randomness comes
//! from the model's RNG.

use patchwork_core::TurtleId;
use patchwork_model::{Model, ModelError, Simulation};

use crate::{square_config, zoo_config};

// ── RandomWalkers ───────────────────────────────────────────────

/// `population` turtles that wiggle and step forward once per tick.
///
/// With [`failing_on`](Self::failing_on), `go` diffuses an undeclared
/// patch variable at the chosen tick and returns that error.
pub struct RandomWalkers {
    pub model: Model,
    pub population: usize,
    pub fail_on_tick: Option<u64>,
}

impl RandomWalkers {
    pub fn new(seed: u64, population: usize) -> Self {
        Self {
            model: Model::new(square_config(8, true).seed(seed)).unwrap(),
            population,
            fail_on_tick: None,
        }
    }

    /// Fail `go` once the model reaches `tick`.
    pub fn failing_on(mut self, tick: u64) -> Self {
        self.fail_on_tick = Some(tick);
        self
    }
}

impl Simulation for RandomWalkers {
    fn setup(&mut self) -> Result<(), ModelError> {
        self.model.clear_all();
        self.model.create_turtles(self.population, "")?;
        Ok(())
    }

    fn go(&mut self) -> Result<(), ModelError> {
        if self.fail_on_tick == Some(self.model.ticks()) {
            self.model.diffuse("undeclared", 0.5)?;
        }
        let walkers = self.model.turtles().clone();
        self.model.try_ask(&walkers, |m, t| {
            let wiggle = m.random_float(40.0) - 20.0;
            m.right(t, wiggle)?;
            m.forward(t, 1.0)
        })
    }

    fn model(&self) -> &Model {
        &self.model
    }

    fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    fn stats(&self) -> Vec<(String, f64)> {
        vec![("walkers".into(), self.model.turtle_count() as f64)]
    }
}

// ── Grazers ─────────────────────────────────────────────────────

/// Energy gained from a full patch of grass.
pub const GRASS_ENERGY: f64 = 4.0;
/// Grass regrown on every patch per tick, up to 1.
pub const REGROWTH: f64 = 0.1;
/// Energy above which a sheep splits in two.
pub const BIRTH_THRESHOLD: f64 = 16.0;

/// Sheep on the [`zoo_config`] world eating regrowing grass.
///
/// Each tick every sheep wiggles, steps, pays one energy, eats the grass
/// on its patch if it is fully grown, splits when it has enough energy,
/// and dies when it runs out. Stops when no sheep remain.
pub struct Grazers {
    pub model: Model,
    pub initial: usize,
}

impl Grazers {
    pub fn new(seed: u64, initial: usize) -> Self {
        Self {
            model: Model::new(zoo_config(seed)).unwrap(),
            initial,
        }
    }

    fn graze(m: &mut Model, sheep: TurtleId) -> Result<(), ModelError> {
        let wiggle = m.random_float(100.0) - 50.0;
        m.left(sheep, wiggle)?;
        m.forward(sheep, 1.0)?;

        let here = m.turtle(sheep).map(|t| t.patch_here());
        let mut energy = m
            .turtle(sheep)
            .and_then(|t| t.own_number("energy"))
            .unwrap_or(0.0)
            - 1.0;
        if let Some(patch) = here.and_then(|p| m.patch_mut(p)) {
            if patch.own_number("grass").unwrap_or(0.0) >= 1.0 {
                patch.set_own("grass", 0.0);
                energy += GRASS_ENERGY;
            }
        }

        if energy <= 0.0 {
            return m.kill_turtle(sheep);
        }
        if energy > BIRTH_THRESHOLD {
            energy /= 2.0;
            let lambs = m.hatch(sheep, 1)?;
            for lamb in lambs.iter() {
                if let Some(t) = m.turtle_mut(lamb) {
                    t.set_own("energy", energy);
                }
            }
        }
        if let Some(t) = m.turtle_mut(sheep) {
            t.set_own("energy", energy);
        }
        Ok(())
    }
}

impl Simulation for Grazers {
    fn setup(&mut self) -> Result<(), ModelError> {
        self.model.clear_all();
        let flock = self.model.create_turtles(self.initial, "sheep")?;
        self.model.try_ask(&flock, |m, t| {
            let (x, y) = (m.random_xcor(), m.random_ycor());
            m.set_xy(t, x, y)
        })?;
        self.model.set_global("population", self.initial as f64);
        Ok(())
    }

    fn go(&mut self) -> Result<(), ModelError> {
        let Some(flock) = self.model.turtles_of("sheep").cloned() else {
            return Ok(());
        };
        self.model.try_ask(&flock, Self::graze)?;

        let patches = self.model.patches().clone();
        self.model.ask(&patches, |m, p| {
            if let Some(patch) = m.patch_mut(p) {
                let grass = patch.own_number("grass").unwrap_or(0.0);
                patch.set_own("grass", (grass + REGROWTH).min(1.0));
            }
        });

        let population = self.model.turtle_count() as f64;
        self.model.set_global("population", population);
        Ok(())
    }

    fn model(&self) -> &Model {
        &self.model
    }

    fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    fn stop(&self) -> bool {
        self.model.turtle_count() == 0
    }

    fn stats(&self) -> Vec<(String, f64)> {
        let grass: f64 = self
            .model
            .patches()
            .iter()
            .filter_map(|p| self.model.patch(p)?.own_number("grass"))
            .sum();
        vec![
            ("sheep".into(), self.model.turtle_count() as f64),
            ("grass".into(), grass),
        ]
    }
}
