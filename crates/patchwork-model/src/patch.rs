//! Patches: the fixed cells of the world lattice.

use indexmap::IndexMap;
use patchwork_agentset::TurtleSet;
use patchwork_core::{Color, PatchId, Properties, TurtleId, Value};
use patchwork_space::Direction;

/// One lattice cell.
///
/// Position and neighbors are fixed when the world is built. Display
/// attributes and declared properties are freely mutable; the set of
/// turtles standing on the patch is maintained by the model.
#[derive(Clone, Debug)]
pub struct Patch {
    pxcor: i32,
    pycor: i32,
    color: Color,
    label: String,
    label_color: Color,
    properties: Properties,
    turtles_here: TurtleSet,
    breeds_here: IndexMap<String, TurtleSet>,
    neighbours: [Option<PatchId>; 8],
}

impl Patch {
    pub(crate) fn new(
        pxcor: i32,
        pycor: i32,
        properties: Properties,
        neighbours: [Option<PatchId>; 8],
    ) -> Self {
        Self {
            pxcor,
            pycor,
            color: Color::BLACK,
            label: String::new(),
            label_color: Color::WHITE,
            properties,
            turtles_here: TurtleSet::new(),
            breeds_here: IndexMap::new(),
            neighbours,
        }
    }

    /// Integer x coordinate of the patch center.
    pub fn pxcor(&self) -> i32 {
        self.pxcor
    }

    /// Integer y coordinate of the patch center.
    pub fn pycor(&self) -> i32 {
        self.pycor
    }

    /// Fill color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the fill color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Label text. Empty when unlabeled.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the label text.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Label color.
    pub fn label_color(&self) -> Color {
        self.label_color
    }

    /// Set the label color.
    pub fn set_label_color(&mut self, color: Color) {
        self.label_color = color;
    }

    /// A declared patch property.
    pub fn own(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// A declared patch property as a number.
    pub fn own_number(&self, name: &str) -> Option<f64> {
        self.properties.number(name)
    }

    /// Write a declared patch property.
    ///
    /// Undeclared names and values of the wrong kind are ignored; returns
    /// `true` when the write was applied.
    pub fn set_own(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let applied = self.properties.set(name, value);
        if !applied {
            log::debug!("patch ({}, {}) ignored write to '{name}'", self.pxcor, self.pycor);
        }
        applied
    }

    /// All declared properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Turtles standing on this patch.
    pub fn turtles_here(&self) -> &TurtleSet {
        &self.turtles_here
    }

    /// Turtles of `breed` standing on this patch; `""` means all.
    pub fn breed_here(&self, breed: &str) -> Option<&TurtleSet> {
        if breed.is_empty() {
            Some(&self.turtles_here)
        } else {
            self.breeds_here.get(breed)
        }
    }

    /// The neighboring patch in `dir`, absent at a non-wrapping edge.
    pub fn neighbour(&self, dir: Direction) -> Option<PatchId> {
        self.neighbours[dir.slot()]
    }

    pub(crate) fn set_neighbours(&mut self, neighbours: [Option<PatchId>; 8]) {
        self.neighbours = neighbours;
    }

    pub(crate) fn reset(&mut self, properties: Properties) {
        self.color = Color::BLACK;
        self.label.clear();
        self.label_color = Color::WHITE;
        self.properties = properties;
    }

    pub(crate) fn enter(&mut self, turtle: TurtleId, breed: &str) {
        self.turtles_here.insert(turtle);
        if !breed.is_empty() {
            self.breeds_here
                .entry(breed.to_owned())
                .or_default()
                .insert(turtle);
        }
    }

    pub(crate) fn leave(&mut self, turtle: TurtleId, breed: &str) {
        self.turtles_here.remove(turtle);
        if let Some(set) = self.breeds_here.get_mut(breed) {
            set.remove(turtle);
            if set.is_empty() {
                self.breeds_here.shift_remove(breed);
            }
        }
    }

    pub(crate) fn clear_turtles(&mut self) {
        self.turtles_here.clear();
        self.breeds_here.clear();
    }
}
