//! Breed registries.
//!
//! Turtle breeds live in one namespace. Link breeds live in two disjoint
//! namespaces, directed and undirected, each seeded with the implicit
//! `""` breed whose member set holds every link of that directedness.

use indexmap::IndexMap;
use patchwork_agentset::{LinkSet, TurtleSet};
use patchwork_core::PropertyTemplate;

use crate::config::{LinkBreedDef, TurtleBreedDef};

/// A named turtle sub-population.
#[derive(Clone, Debug)]
pub struct TurtleBreed {
    name: String,
    default_shape: Option<String>,
    properties: PropertyTemplate,
    pub(crate) members: TurtleSet,
}

impl TurtleBreed {
    pub(crate) fn from_def(def: &TurtleBreedDef) -> Self {
        Self {
            name: def.name.clone(),
            default_shape: def.default_shape.clone(),
            properties: def.properties.clone(),
            members: TurtleSet::new(),
        }
    }

    /// Breed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shape for new members, if set.
    pub fn default_shape(&self) -> Option<&str> {
        self.default_shape.as_deref()
    }

    pub(crate) fn set_default_shape(&mut self, shape: Option<String>) {
        self.default_shape = shape;
    }

    /// Breed-scoped property template.
    pub fn properties(&self) -> &PropertyTemplate {
        &self.properties
    }

    /// Live members in creation order.
    pub fn members(&self) -> &TurtleSet {
        &self.members
    }
}

/// A named link sub-type with fixed directedness.
#[derive(Clone, Debug)]
pub struct LinkBreed {
    name: String,
    directed: bool,
    default_shape: Option<String>,
    pub(crate) members: LinkSet,
}

impl LinkBreed {
    pub(crate) fn new(name: &str, directed: bool, default_shape: Option<String>) -> Self {
        Self {
            name: name.to_owned(),
            directed,
            default_shape,
            members: LinkSet::new(),
        }
    }

    /// Breed name; `""` for the implicit general breed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether members are directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Shape for new members, if set.
    pub fn default_shape(&self) -> Option<&str> {
        self.default_shape.as_deref()
    }

    pub(crate) fn set_default_shape(&mut self, shape: Option<String>) {
        self.default_shape = shape;
    }

    /// Live members in creation order.
    pub fn members(&self) -> &LinkSet {
        &self.members
    }
}

/// Link breeds of one directedness, keyed by name.
pub(crate) fn link_breed_table(defs: &[LinkBreedDef], directed: bool) -> IndexMap<String, LinkBreed> {
    let mut table = IndexMap::with_capacity(defs.len() + 1);
    table.insert(String::new(), LinkBreed::new("", directed, None));
    for def in defs {
        table.insert(
            def.name.clone(),
            LinkBreed::new(&def.name, directed, def.default_shape.clone()),
        );
    }
    table
}

/// Turtle breeds keyed by name.
pub(crate) fn turtle_breed_table(defs: &[TurtleBreedDef]) -> IndexMap<String, TurtleBreed> {
    defs.iter()
        .map(|def| (def.name.clone(), TurtleBreed::from_def(def)))
        .collect()
}
