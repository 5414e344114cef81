//! The model: owner of every registry and the entry point for all operations.
//!
//! [`Model`] holds the patch lattice, the turtle and link arenas with their
//! ordered global sets, the breed tables, the who-number index, the seeded
//! RNG, and the tick counter. Operations are split across sibling modules
//! (`create`, `motion`, `graph`, `ties`, `query`, `diffuse`, `snapshot`),
//! each adding an `impl Model` block.

use std::time::Instant;

use indexmap::IndexMap;
use patchwork_agentset::{AgentKey, LinkSet, OrderedAgentSet, PatchSet, TurtleSet};
use patchwork_arena::Arena;
use patchwork_core::{
    Color, LinkId, PatchId, Properties, PropertyTemplate, TickId, TurtleId, Value, Who, BASE_COLORS,
};
use patchwork_space::{EdgeBehavior, Topology, WorldBounds};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::breed::{link_breed_table, turtle_breed_table, LinkBreed, TurtleBreed};
use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::link::Link;
use crate::patch::Patch;
use crate::turtle::Turtle;

/// An agent key whose liveness the model can check.
///
/// Used by [`Model::ask`] to skip members that died earlier in the batch.
pub trait Agent: AgentKey {
    /// Whether this key still refers to a live agent of `model`.
    fn is_alive(self, model: &Model) -> bool;
}

impl Agent for TurtleId {
    fn is_alive(self, model: &Model) -> bool {
        model.turtles.contains(self)
    }
}

impl Agent for LinkId {
    fn is_alive(self, model: &Model) -> bool {
        model.links.contains(self)
    }
}

impl Agent for PatchId {
    fn is_alive(self, model: &Model) -> bool {
        (self.0 as usize) < model.patches.len()
    }
}

/// A running agent-based model.
///
/// Single-threaded and unsynchronized: drive it from one caller at a time
/// (see [`Runner`](crate::driver::Runner) for a serialized harness).
#[derive(Clone, Debug)]
pub struct Model {
    pub(crate) topology: Topology,
    pub(crate) patches: Vec<Patch>,
    pub(crate) all_patches: PatchSet,
    pub(crate) turtles: Arena<TurtleId, Turtle>,
    pub(crate) all_turtles: TurtleSet,
    pub(crate) who_index: IndexMap<Who, TurtleId>,
    pub(crate) next_who: u64,
    pub(crate) links: Arena<LinkId, Link>,
    pub(crate) all_links: LinkSet,
    pub(crate) turtle_breeds: IndexMap<String, TurtleBreed>,
    pub(crate) directed_breeds: IndexMap<String, LinkBreed>,
    pub(crate) undirected_breeds: IndexMap<String, LinkBreed>,
    pub(crate) turtle_template: PropertyTemplate,
    pub(crate) patch_template: PropertyTemplate,
    globals_template: PropertyTemplate,
    globals: Properties,
    pub(crate) default_turtle_shape: String,
    pub(crate) default_link_shape: String,
    pub(crate) rng: ChaCha8Rng,
    seed: u64,
    ticks: TickId,
    timer: Instant,
}

impl Model {
    /// Validate `config` and build a model with an empty population.
    pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
        config.validate()?;
        let topology = Topology::new(
            config.bounds,
            EdgeBehavior::from_wrapping(config.wrap_x),
            EdgeBehavior::from_wrapping(config.wrap_y),
        );
        let (patches, all_patches) = build_patches(&topology, &config.patch_properties);
        log::debug!(
            "model built: {}x{} patches, wrap ({}, {}), seed {}",
            topology.width(),
            topology.height(),
            config.wrap_x,
            config.wrap_y,
            config.seed
        );
        Ok(Self {
            topology,
            patches,
            all_patches,
            turtles: Arena::new(),
            all_turtles: TurtleSet::new(),
            who_index: IndexMap::new(),
            next_who: 0,
            links: Arena::new(),
            all_links: LinkSet::new(),
            turtle_breeds: turtle_breed_table(&config.turtle_breeds),
            directed_breeds: link_breed_table(&config.directed_link_breeds, true),
            undirected_breeds: link_breed_table(&config.undirected_link_breeds, false),
            turtle_template: config.turtle_properties,
            patch_template: config.patch_properties,
            globals: config.globals.instantiate(),
            globals_template: config.globals,
            default_turtle_shape: config.default_turtle_shape,
            default_link_shape: config.default_link_shape,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
            ticks: TickId(0),
            timer: Instant::now(),
        })
    }

    // ── World geometry ──────────────────────────────────────────

    /// The world's topology.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Resolved patch bounds.
    pub fn bounds(&self) -> WorldBounds {
        self.topology.bounds()
    }

    /// Smallest patch x coordinate.
    pub fn min_pxcor(&self) -> i32 {
        self.bounds().min_pxcor
    }

    /// Largest patch x coordinate.
    pub fn max_pxcor(&self) -> i32 {
        self.bounds().max_pxcor
    }

    /// Smallest patch y coordinate.
    pub fn min_pycor(&self) -> i32 {
        self.bounds().min_pycor
    }

    /// Largest patch y coordinate.
    pub fn max_pycor(&self) -> i32 {
        self.bounds().max_pycor
    }

    /// Number of patch columns.
    pub fn world_width(&self) -> u32 {
        self.topology.width()
    }

    /// Number of patch rows.
    pub fn world_height(&self) -> u32 {
        self.topology.height()
    }

    /// Whether the x axis wraps.
    pub fn wraps_x(&self) -> bool {
        self.topology.edge_x().wraps()
    }

    /// Whether the y axis wraps.
    pub fn wraps_y(&self) -> bool {
        self.topology.edge_y().wraps()
    }

    /// Turn x wrapping on or off, recomputing every patch's neighbors.
    pub fn set_wrap_x(&mut self, wraps: bool) {
        self.topology = self.topology.with_edge_x(EdgeBehavior::from_wrapping(wraps));
        self.rebuild_neighbours();
    }

    /// Turn y wrapping on or off, recomputing every patch's neighbors.
    pub fn set_wrap_y(&mut self, wraps: bool) {
        self.topology = self.topology.with_edge_y(EdgeBehavior::from_wrapping(wraps));
        self.rebuild_neighbours();
    }

    fn rebuild_neighbours(&mut self) {
        for (i, patch) in self.patches.iter_mut().enumerate() {
            patch.set_neighbours(neighbour_ids(&self.topology, i));
        }
    }

    /// Rebuild the lattice with new bounds. Every turtle (and so every
    /// link) is killed first; patch state starts from the template.
    pub fn resize_world(&mut self, bounds: WorldBounds) {
        self.clear_turtles();
        self.topology = Topology::new(bounds, self.topology.edge_x(), self.topology.edge_y());
        let (patches, all_patches) = build_patches(&self.topology, &self.patch_template);
        self.patches = patches;
        self.all_patches = all_patches;
        log::debug!(
            "world resized to {}x{}",
            self.topology.width(),
            self.topology.height()
        );
    }

    /// Distance between two points, the short way around on wrapping axes.
    pub fn distance_between_points(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
        self.topology.distance(x1, y1, x2, y2)
    }

    // ── Ticks and timer ─────────────────────────────────────────

    /// Current tick count.
    pub fn ticks(&self) -> u64 {
        self.ticks.0
    }

    /// Current tick as a [`TickId`].
    pub fn tick_id(&self) -> TickId {
        self.ticks
    }

    /// Advance the tick counter by one.
    pub fn tick(&mut self) {
        self.ticks.0 += 1;
    }

    /// Advance the tick counter by `n`.
    pub fn tick_advance(&mut self, n: u64) {
        self.ticks.0 += n;
    }

    /// Reset the tick counter to zero.
    pub fn reset_ticks(&mut self) {
        self.ticks = TickId(0);
    }

    /// Reset the tick counter to zero.
    pub fn clear_ticks(&mut self) {
        log::debug!("clear ticks");
        self.reset_ticks();
    }

    /// Restart the wall-clock timer.
    pub fn reset_timer(&mut self) {
        self.timer = Instant::now();
    }

    /// Seconds since the model was built or the timer was last reset.
    pub fn timer(&self) -> f64 {
        self.timer.elapsed().as_secs_f64()
    }

    // ── Clearing ────────────────────────────────────────────────

    /// Reset ticks, patches, turtles, links, and globals.
    pub fn clear_all(&mut self) {
        log::debug!("clear all");
        self.clear_ticks();
        self.clear_patches();
        self.clear_turtles();
        self.clear_globals();
    }

    /// Kill every turtle and every link. Who numbers keep counting up.
    pub fn clear_turtles(&mut self) {
        log::debug!("clear turtles: {} turtles", self.turtles.len());
        self.clear_links();
        self.turtles.clear();
        self.all_turtles.clear();
        self.who_index.clear();
        for breed in self.turtle_breeds.values_mut() {
            breed.members.clear();
        }
        for patch in &mut self.patches {
            patch.clear_turtles();
        }
    }

    /// Kill every link.
    pub fn clear_links(&mut self) {
        log::debug!("clear links: {} links", self.links.len());
        self.links.clear();
        self.all_links.clear();
        for breed in self
            .directed_breeds
            .values_mut()
            .chain(self.undirected_breeds.values_mut())
        {
            breed.members.clear();
        }
        for (_, turtle) in self.turtles.iter_mut() {
            turtle.links = Default::default();
        }
    }

    /// Restore every patch's color, label, and properties to their defaults.
    pub fn clear_patches(&mut self) {
        log::debug!("clear patches");
        for patch in &mut self.patches {
            patch.reset(self.patch_template.instantiate());
        }
    }

    /// Restore every global to its declared default.
    pub fn clear_globals(&mut self) {
        self.globals = self.globals_template.instantiate();
    }

    // ── Globals ─────────────────────────────────────────────────

    /// A declared global.
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    /// Write a declared global. Undeclared names and kind changes are
    /// ignored; returns `true` when applied.
    pub fn set_global(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let applied = self.globals.set(name, value);
        if !applied {
            log::debug!("ignored write to global '{name}'");
        }
        applied
    }

    /// All globals.
    pub fn globals(&self) -> &Properties {
        &self.globals
    }

    // ── Shapes ──────────────────────────────────────────────────

    /// Shape for new turtles whose breed has none.
    pub fn default_turtle_shape(&self) -> &str {
        &self.default_turtle_shape
    }

    /// Set the shape for new turtles whose breed has none.
    pub fn set_default_turtle_shape(&mut self, shape: impl Into<String>) {
        self.default_turtle_shape = shape.into();
    }

    /// Shape for new links whose breed has none.
    pub fn default_link_shape(&self) -> &str {
        &self.default_link_shape
    }

    /// Set the shape for new links whose breed has none.
    pub fn set_default_link_shape(&mut self, shape: impl Into<String>) {
        self.default_link_shape = shape.into();
    }

    /// Set or clear a turtle breed's default shape.
    pub fn set_breed_default_shape(&mut self, breed: &str, shape: Option<String>) -> Result<(), ModelError> {
        let entry = self
            .turtle_breeds
            .get_mut(breed)
            .ok_or_else(|| ModelError::UnknownBreed { name: breed.into() })?;
        entry.set_default_shape(shape);
        Ok(())
    }

    /// Set or clear a link breed's default shape.
    pub fn set_link_breed_default_shape(
        &mut self,
        breed: &str,
        directed: bool,
        shape: Option<String>,
    ) -> Result<(), ModelError> {
        let entry = self
            .link_breed_table_mut(directed)
            .get_mut(breed)
            .ok_or_else(|| ModelError::UnknownLinkBreed {
                name: breed.into(),
                directed,
            })?;
        entry.set_default_shape(shape);
        Ok(())
    }

    // ── Patch lookup ────────────────────────────────────────────

    /// Every patch, row-major from the bottom-left corner.
    pub fn patches(&self) -> &PatchSet {
        &self.all_patches
    }

    /// Number of patches.
    pub fn patch_count(&self) -> usize {
        self.patches.len()
    }

    /// A patch by id.
    pub fn patch(&self, id: PatchId) -> Option<&Patch> {
        self.patches.get(id.0 as usize)
    }

    /// A patch by id, mutably.
    pub fn patch_mut(&mut self, id: PatchId) -> Option<&mut Patch> {
        self.patches.get_mut(id.0 as usize)
    }

    /// The patch at integer coordinates, wrapping where the world wraps.
    pub fn patch_at_coords(&self, pxcor: i32, pycor: i32) -> Option<PatchId> {
        let (px, py) = self.topology.offset_coords(pxcor, pycor, 0, 0)?;
        self.topology.index_of(px, py).map(|i| PatchId(i as u32))
    }

    /// The patch enclosing a continuous point, wrapping where the world
    /// wraps. `None` off a non-wrapping edge.
    pub fn patch_at(&self, x: f64, y: f64) -> Option<PatchId> {
        self.topology.patch_index(x, y).map(|i| PatchId(i as u32))
    }

    // ── Turtle lookup ───────────────────────────────────────────

    /// Every live turtle in creation order.
    pub fn turtles(&self) -> &TurtleSet {
        &self.all_turtles
    }

    /// Live turtles of `breed`; `""` means every turtle.
    pub fn turtles_of(&self, breed: &str) -> Option<&TurtleSet> {
        if breed.is_empty() {
            Some(&self.all_turtles)
        } else {
            self.turtle_breeds.get(breed).map(TurtleBreed::members)
        }
    }

    /// Number of live turtles.
    pub fn turtle_count(&self) -> usize {
        self.turtles.len()
    }

    /// A live turtle.
    pub fn turtle(&self, id: TurtleId) -> Option<&Turtle> {
        self.turtles.get(id)
    }

    /// A live turtle, mutably.
    pub fn turtle_mut(&mut self, id: TurtleId) -> Option<&mut Turtle> {
        self.turtles.get_mut(id)
    }

    /// The live turtle with who number `who`.
    pub fn turtle_by_who(&self, who: impl Into<Who>) -> Option<TurtleId> {
        self.who_index.get(&who.into()).copied()
    }

    /// A turtle breed.
    pub fn turtle_breed(&self, name: &str) -> Option<&TurtleBreed> {
        self.turtle_breeds.get(name)
    }

    /// Every turtle breed in declaration order.
    pub fn turtle_breeds(&self) -> impl Iterator<Item = &TurtleBreed> {
        self.turtle_breeds.values()
    }

    pub(crate) fn turtle_ref(&self, id: TurtleId) -> Result<&Turtle, ModelError> {
        self.turtles.get(id).ok_or(ModelError::TurtleNotFound(id))
    }

    // ── Link lookup ─────────────────────────────────────────────

    /// Every live link in creation order.
    pub fn links(&self) -> &LinkSet {
        &self.all_links
    }

    /// Live links of `breed` and directedness; `""` means every link of
    /// that directedness.
    pub fn links_of(&self, breed: &str, directed: bool) -> Option<&LinkSet> {
        self.link_breed_table(directed).get(breed).map(LinkBreed::members)
    }

    /// Number of live links.
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// A live link.
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    /// A live link, mutably.
    pub fn link_mut(&mut self, id: LinkId) -> Option<&mut Link> {
        self.links.get_mut(id)
    }

    /// A link breed.
    pub fn link_breed(&self, name: &str, directed: bool) -> Option<&LinkBreed> {
        self.link_breed_table(directed).get(name)
    }

    pub(crate) fn link_breed_table(&self, directed: bool) -> &IndexMap<String, LinkBreed> {
        if directed {
            &self.directed_breeds
        } else {
            &self.undirected_breeds
        }
    }

    pub(crate) fn link_breed_table_mut(&mut self, directed: bool) -> &mut IndexMap<String, LinkBreed> {
        if directed {
            &mut self.directed_breeds
        } else {
            &mut self.undirected_breeds
        }
    }

    pub(crate) fn link_ref(&self, id: LinkId) -> Result<&Link, ModelError> {
        self.links.get(id).ok_or(ModelError::LinkNotFound(id))
    }

    // ── Batch application ───────────────────────────────────────

    /// Apply `op` to each member of a snapshot of `set`, in order.
    ///
    /// Members killed by an earlier call in the same batch are skipped;
    /// agents created during the batch are not visited.
    pub fn ask<K: Agent>(&mut self, set: &OrderedAgentSet<K>, mut op: impl FnMut(&mut Model, K)) {
        for key in set.to_vec() {
            if key.is_alive(self) {
                op(self, key);
            }
        }
    }

    /// Like [`ask`](Self::ask), stopping at the first error.
    pub fn try_ask<K: Agent, E>(
        &mut self,
        set: &OrderedAgentSet<K>,
        mut op: impl FnMut(&mut Model, K) -> Result<(), E>,
    ) -> Result<(), E> {
        for key in set.to_vec() {
            if key.is_alive(self) {
                op(self, key)?;
            }
        }
        Ok(())
    }

    // ── Randomness ──────────────────────────────────────────────

    /// The seed the RNG was last seeded with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the RNG stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// The model's RNG, for draws not covered by the helpers below.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// A uniform integer between 0 (inclusive) and `n` (exclusive),
    /// carrying the sign of `n`. `0` for `n == 0`.
    pub fn random_int(&mut self, n: i64) -> i64 {
        match n {
            0 => 0,
            n if n > 0 => self.rng.random_range(0..n),
            n => -(self.rng.random_range(0..n.unsigned_abs()) as i64),
        }
    }

    /// A uniform float between 0 (inclusive) and `x` (exclusive).
    pub fn random_float(&mut self, x: f64) -> f64 {
        self.rng.random::<f64>() * x
    }

    /// A uniform continuous x coordinate inside the world.
    pub fn random_xcor(&mut self) -> f64 {
        let min = self.topology.min_xcor();
        min + self.rng.random::<f64>() * f64::from(self.topology.width())
    }

    /// A uniform continuous y coordinate inside the world.
    pub fn random_ycor(&mut self) -> f64 {
        let min = self.topology.min_ycor();
        min + self.rng.random::<f64>() * f64::from(self.topology.height())
    }

    /// A uniform patch x coordinate.
    pub fn random_pxcor(&mut self) -> i32 {
        self.rng.random_range(self.min_pxcor()..=self.max_pxcor())
    }

    /// A uniform patch y coordinate.
    pub fn random_pycor(&mut self) -> i32 {
        self.rng.random_range(self.min_pycor()..=self.max_pycor())
    }

    /// A uniform pick from the base palette.
    pub fn random_color(&mut self) -> Color {
        BASE_COLORS[self.rng.random_range(0..BASE_COLORS.len())]
    }

    /// A uniform pick from `items`, or `None` if empty.
    pub fn one_of<T: Clone>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.rng.random_range(0..items.len())).cloned()
    }

    /// A uniform member of `set`, or `None` if empty.
    pub fn one_of_set<K: AgentKey>(&mut self, set: &OrderedAgentSet<K>) -> Option<K> {
        set.one_of(&mut self.rng)
    }

    /// Exactly `n` random members of `set` in set order, or `None` if
    /// `set` has fewer.
    pub fn n_of<K: AgentKey>(&mut self, set: &OrderedAgentSet<K>, n: usize) -> Option<OrderedAgentSet<K>> {
        set.n_of(n, &mut self.rng)
    }

    /// Up to `n` random members of `set` in set order.
    pub fn up_to_n_of<K: AgentKey>(&mut self, set: &OrderedAgentSet<K>, n: usize) -> OrderedAgentSet<K> {
        set.up_to_n_of(n, &mut self.rng)
    }
}

fn neighbour_ids(topology: &Topology, index: usize) -> [Option<PatchId>; 8] {
    topology
        .neighbour_table(index)
        .map(|n| n.map(|i| PatchId(i as u32)))
}

fn build_patches(topology: &Topology, template: &PropertyTemplate) -> (Vec<Patch>, PatchSet) {
    let count = topology.patch_count();
    let mut patches = Vec::with_capacity(count);
    let mut set = PatchSet::with_capacity(count);
    for i in 0..count {
        let (px, py) = topology.coords_of(i);
        patches.push(Patch::new(px, py, template.instantiate(), neighbour_ids(topology, i)));
        set.insert(PatchId(i as u32));
    }
    (patches, set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TurtleBreedDef;

    fn model() -> Model {
        Model::new(
            ModelConfig::with_bounds(WorldBounds::new(-2, 2, -2, 2), true, true)
                .patch_property("grass", 1.0)
                .global("count", 0)
                .turtle_breed(TurtleBreedDef::new("sheep")),
        )
        .unwrap()
    }

    // ── Construction tests ──────────────────────────────────────

    #[test]
    fn builds_lattice() {
        let m = model();
        assert_eq!(m.patch_count(), 25);
        assert_eq!(m.patches().len(), 25);
        let p = m.patch(PatchId(0)).unwrap();
        assert_eq!((p.pxcor(), p.pycor()), (-2, -2));
        assert_eq!(p.own_number("grass"), Some(1.0));
    }

    #[test]
    fn invalid_bounds_fall_back_to_default() {
        let m = Model::new(ModelConfig::with_bounds(WorldBounds::new(3, 1, 0, 0), false, false)).unwrap();
        assert_eq!(m.bounds(), WorldBounds::DEFAULT);
        assert_eq!(m.patch_count(), 31 * 31);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let cfg = ModelConfig::default().turtle_breed(TurtleBreedDef::new(""));
        assert!(matches!(Model::new(cfg), Err(ModelError::Config(_))));
    }

    // ── Patch lookup tests ──────────────────────────────────────

    #[test]
    fn patch_at_wraps() {
        let m = model();
        assert_eq!(m.patch_at(3.0, 0.0), m.patch_at_coords(-2, 0));
        assert_eq!(m.patch_at_coords(7, 7), m.patch_at_coords(2, 2));
    }

    #[test]
    fn toggling_wrap_rebuilds_neighbours() {
        let mut m = model();
        let corner = m.patch_at_coords(-2, -2).unwrap();
        let west = patchwork_space::Direction::West;
        assert!(m.patch(corner).unwrap().neighbour(west).is_some());
        m.set_wrap_x(false);
        assert!(m.patch(corner).unwrap().neighbour(west).is_none());
        assert_eq!(m.patch_at(2.6, 0.0), None);
    }

    // ── Ticks and globals tests ─────────────────────────────────

    #[test]
    fn tick_counter() {
        let mut m = model();
        m.tick();
        m.tick_advance(4);
        assert_eq!(m.ticks(), 5);
        m.clear_ticks();
        assert_eq!(m.ticks(), 0);
    }

    #[test]
    fn globals_follow_template() {
        let mut m = model();
        assert!(m.set_global("count", 3));
        assert!(!m.set_global("missing", 3));
        assert_eq!(m.global("count"), Some(&Value::Number(3.0)));
        m.clear_all();
        assert_eq!(m.global("count"), Some(&Value::Number(0.0)));
    }

    #[test]
    fn clear_patches_restores_template() {
        let mut m = model();
        let p = m.patch_at_coords(0, 0).unwrap();
        m.patch_mut(p).unwrap().set_own("grass", 0.0);
        m.patch_mut(p).unwrap().set_color(Color::GREEN);
        m.clear_patches();
        let patch = m.patch(p).unwrap();
        assert_eq!(patch.own_number("grass"), Some(1.0));
        assert_eq!(patch.color(), Color::BLACK);
    }

    // ── Randomness tests ────────────────────────────────────────

    #[test]
    fn random_int_carries_sign() {
        let mut m = model();
        assert_eq!(m.random_int(0), 0);
        for _ in 0..50 {
            let v = m.random_int(5);
            assert!((0..5).contains(&v));
            let w = m.random_int(-5);
            assert!((-4..=0).contains(&w));
        }
    }

    #[test]
    fn random_coordinates_stay_inside() {
        let mut m = model();
        for _ in 0..100 {
            let (x, y) = (m.random_xcor(), m.random_ycor());
            assert!(m.topology().contains_point(x, y));
            let px = m.random_pxcor();
            assert!((-2..=2).contains(&px));
        }
    }

    #[test]
    fn one_of_covers_index_zero() {
        let mut m = model();
        let items = [10, 20];
        let mut saw_first = false;
        for _ in 0..64 {
            saw_first |= m.one_of(&items) == Some(10);
        }
        assert!(saw_first);
        assert_eq!(m.one_of::<u8>(&[]), None);
    }

    #[test]
    fn reseed_restarts_stream() {
        let mut m = model();
        m.reseed(99);
        let a = m.random_float(1.0);
        m.reseed(99);
        assert_eq!(m.random_float(1.0), a);
        assert_eq!(m.seed(), 99);
    }
}
