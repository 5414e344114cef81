//! Turtle lifecycle: bulk creation, sprouting, hatching, breed changes,
//! and death.
//!
//! Every constructor validates the breed before drawing a who number or
//! touching the RNG, so a rejected call leaves the model untouched.

use std::f64::consts::TAU;

use patchwork_agentset::TurtleSet;
use patchwork_core::{Color, PatchId, Properties, TurtleId, Who, BASE_COLORS};
use patchwork_space::SpaceError;
use rand::Rng;

use crate::adjacency::Reach;
use crate::error::ModelError;
use crate::model::Model;
use crate::turtle::Turtle;

impl Model {
    /// Create `n` turtles of `breed` (`""` for the general population) at
    /// the origin, each with a uniformly random heading and a random base
    /// color.
    pub fn create_turtles(&mut self, n: usize, breed: &str) -> Result<TurtleSet, ModelError> {
        self.check_breed(breed)?;
        let mut created = TurtleSet::with_capacity(n);
        for _ in 0..n {
            let heading = self.rng.random::<f64>() * TAU;
            let color = BASE_COLORS[self.rng.random_range(0..BASE_COLORS.len())];
            let id = self.spawn(0.0, 0.0, breed)?;
            self.dress(id, heading, Some(color));
            created.insert(id);
        }
        Ok(created)
    }

    /// Create `n` turtles of `breed` at the origin with headings evenly
    /// spaced around the circle starting at 0, and colors cycling through
    /// the base palette.
    pub fn create_ordered_turtles(&mut self, n: usize, breed: &str) -> Result<TurtleSet, ModelError> {
        self.check_breed(breed)?;
        let mut created = TurtleSet::with_capacity(n);
        for i in 0..n {
            let heading = i as f64 * TAU / n as f64;
            let color = BASE_COLORS[i % BASE_COLORS.len()];
            let id = self.spawn(0.0, 0.0, breed)?;
            self.dress(id, heading, Some(color));
            created.insert(id);
        }
        Ok(created)
    }

    /// Create `n` turtles of `breed` at the center of `patch`, each facing
    /// a random whole number of degrees.
    pub fn sprout(&mut self, patch: PatchId, n: usize, breed: &str) -> Result<TurtleSet, ModelError> {
        self.check_breed(breed)?;
        let p = self.patch(patch).ok_or(ModelError::PatchNotFound(patch))?;
        let (x, y) = (f64::from(p.pxcor()), f64::from(p.pycor()));
        let mut created = TurtleSet::with_capacity(n);
        for _ in 0..n {
            let degrees = self.rng.random_range(0..360u32);
            let id = self.spawn(x, y, breed)?;
            self.dress(id, f64::from(degrees).to_radians(), None);
            created.insert(id);
        }
        Ok(created)
    }

    /// Create `n` copies of `parent`, each with a fresh who number and
    /// every attribute and property of the parent. Links are not copied.
    pub fn hatch(&mut self, parent: TurtleId, n: usize) -> Result<TurtleSet, ModelError> {
        let template = self.turtle_ref(parent)?.hatchling(Who(0));
        let mut created = TurtleSet::with_capacity(n);
        for _ in 0..n {
            let who = self.next_who();
            let child = template.hatchling(who);
            let id = self.register(child)?;
            created.insert(id);
        }
        Ok(created)
    }

    /// Move `turtle` into `breed` (`""` for the general population).
    ///
    /// Breed set and patch membership follow the turtle; breed-layer
    /// properties are replaced by the new breed's defaults. Shape and
    /// general properties are kept.
    pub fn set_breed(&mut self, turtle: TurtleId, breed: &str) -> Result<(), ModelError> {
        self.check_breed(breed)?;
        let t = self.turtle_ref(turtle)?;
        let old = t.breed().to_owned();
        let patch = t.patch_here();
        if old == breed {
            return Ok(());
        }
        if let Some(b) = self.turtle_breeds.get_mut(&old) {
            b.members.remove(turtle);
        }
        if let Some(b) = self.turtle_breeds.get_mut(breed) {
            b.members.insert(turtle);
        }
        if let Some(p) = self.patches.get_mut(patch.0 as usize) {
            p.leave(turtle, &old);
            p.enter(turtle, breed);
        }
        let props = self.breed_properties(breed);
        if let Some(t) = self.turtles.get_mut(turtle) {
            t.set_breed(breed, props);
        }
        log::trace!("{turtle} changed breed '{old}' -> '{breed}'");
        Ok(())
    }

    /// Kill `turtle` and every link touching it.
    pub fn kill_turtle(&mut self, turtle: TurtleId) -> Result<(), ModelError> {
        let incident = self.turtle_ref(turtle)?.links.links(Reach::Any, "");
        for link in incident {
            self.kill_link(link)?;
        }
        let Some(dead) = self.turtles.remove(turtle) else {
            return Err(ModelError::TurtleNotFound(turtle));
        };
        self.all_turtles.remove(turtle);
        self.who_index.shift_remove(&dead.who());
        if let Some(b) = self.turtle_breeds.get_mut(dead.breed()) {
            b.members.remove(turtle);
        }
        if let Some(p) = self.patches.get_mut(dead.patch_here().0 as usize) {
            p.leave(turtle, dead.breed());
        }
        log::trace!("killed turtle {} ({turtle})", dead.who());
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────

    pub(crate) fn check_breed(&self, breed: &str) -> Result<(), ModelError> {
        if breed.is_empty() || self.turtle_breeds.contains_key(breed) {
            Ok(())
        } else {
            Err(ModelError::UnknownBreed { name: breed.into() })
        }
    }

    fn breed_properties(&self, breed: &str) -> Properties {
        self.turtle_breeds
            .get(breed)
            .map(|b| b.properties().instantiate())
            .unwrap_or_else(Properties::empty)
    }

    fn next_who(&mut self) -> Who {
        let who = Who(self.next_who);
        self.next_who += 1;
        who
    }

    /// Build and register a fresh turtle of `breed` at `(x, y)`.
    fn spawn(&mut self, x: f64, y: f64, breed: &str) -> Result<TurtleId, ModelError> {
        let patch = self
            .patch_at(x, y)
            .ok_or(ModelError::OutOfBounds(SpaceError::OutOfBounds { x, y }))?;
        let shape = self
            .turtle_breeds
            .get(breed)
            .and_then(|b| b.default_shape())
            .unwrap_or(self.default_turtle_shape.as_str())
            .to_owned();
        let general = self.turtle_template.instantiate();
        let breed_props = self.breed_properties(breed);
        let who = self.next_who();
        let turtle = Turtle::new(who, x, y, patch, breed, shape, general, breed_props);
        self.register(turtle)
    }

    /// Insert `turtle` into the arena and every registry it belongs to.
    fn register(&mut self, turtle: Turtle) -> Result<TurtleId, ModelError> {
        let who = turtle.who();
        let patch = turtle.patch_here();
        let breed = turtle.breed().to_owned();
        let id = self.turtles.insert(turtle)?;
        self.all_turtles.insert(id);
        self.who_index.insert(who, id);
        if let Some(b) = self.turtle_breeds.get_mut(&breed) {
            b.members.insert(id);
        }
        if let Some(p) = self.patches.get_mut(patch.0 as usize) {
            p.enter(id, &breed);
        }
        Ok(id)
    }

    fn dress(&mut self, id: TurtleId, heading: f64, color: Option<Color>) {
        if let Some(t) = self.turtles.get_mut(id) {
            t.set_heading_radians(heading);
            if let Some(color) = color {
                t.set_color(color);
            }
        }
    }
}
