//! Model configuration, validation, and error types.
//!
//! [`ModelConfig`] is the input to [`Model::new`](crate::Model::new).
//! [`validate()`](ModelConfig::validate) checks structural invariants
//! before anything is built, so a model either starts complete or not
//! at all. [`RunnerConfig`] configures the
//! [`Runner`](crate::driver::Runner) loop.

use std::error::Error;
use std::fmt;

use indexmap::IndexSet;
use patchwork_core::{PropertyTemplate, Value};
use patchwork_space::WorldBounds;

// ── Breed definitions ──────────────────────────────────────────────

/// Declaration of a turtle breed.
#[derive(Clone, Debug, PartialEq)]
pub struct TurtleBreedDef {
    /// Breed name. Must be non-empty and unique among turtle breeds.
    pub name: String,
    /// Shape given to new members; falls back to the model default.
    pub default_shape: Option<String>,
    /// Breed-scoped properties, copied into each new member.
    pub properties: PropertyTemplate,
}

impl TurtleBreedDef {
    /// A breed with no default shape and no breed-scoped properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_shape: None,
            properties: PropertyTemplate::new(),
        }
    }

    /// Set the default shape.
    pub fn with_shape(mut self, shape: impl Into<String>) -> Self {
        self.default_shape = Some(shape.into());
        self
    }

    /// Declare a breed-scoped property.
    pub fn with_property(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.properties.declare(name, default);
        self
    }
}

/// Declaration of a link breed. Directedness comes from the list it is
/// placed in on [`ModelConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct LinkBreedDef {
    /// Breed name. Must be non-empty and unique within its directedness.
    pub name: String,
    /// Shape given to new members; falls back to the model default.
    pub default_shape: Option<String>,
}

impl LinkBreedDef {
    /// A link breed with no default shape.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_shape: None,
        }
    }

    /// Set the default shape.
    pub fn with_shape(mut self, shape: impl Into<String>) -> Self {
        self.default_shape = Some(shape.into());
        self
    }
}

// ── RunnerConfig ───────────────────────────────────────────────────

/// Configuration for [`Runner`](crate::driver::Runner).
#[derive(Clone, Debug, PartialEq)]
pub struct RunnerConfig {
    /// Target ticks per second for [`Runner::run`](crate::driver::Runner::run).
    /// `None` runs unpaced. Default: `Some(10.0)`.
    pub tick_rate_hz: Option<f64>,
    /// Stop after this many ticks of a single run. Default: `None`.
    pub max_ticks: Option<u64>,
    /// Number of recent snapshots retained. Default: 16. Minimum: 1.
    pub history_capacity: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: Some(10.0),
            max_ticks: None,
            history_capacity: 16,
        }
    }
}

impl RunnerConfig {
    /// Validate the runner settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(hz) = self.tick_rate_hz {
            if !hz.is_finite() || hz <= 0.0 || !(1.0 / hz).is_finite() {
                return Err(ConfigError::InvalidTickRate { value: hz });
            }
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::HistoryCapacityZero);
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`ModelConfig::validate()`] or
/// [`RunnerConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A breed was declared with the empty name, which is reserved for
    /// the general population.
    EmptyBreedName,
    /// Two turtle breeds share a name.
    DuplicateTurtleBreed {
        /// The repeated name.
        name: String,
    },
    /// Two link breeds of the same directedness share a name.
    DuplicateLinkBreed {
        /// The repeated name.
        name: String,
        /// Whether the clash is among directed breeds.
        directed: bool,
    },
    /// A shape name is empty.
    EmptyShape,
    /// tick_rate_hz is NaN, infinite, zero, or negative.
    InvalidTickRate {
        /// The invalid value.
        value: f64,
    },
    /// history_capacity is zero.
    HistoryCapacityZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBreedName => write!(f, "breed name must not be empty"),
            Self::DuplicateTurtleBreed { name } => {
                write!(f, "turtle breed '{name}' declared more than once")
            }
            Self::DuplicateLinkBreed { name, directed } => {
                let kind = if *directed { "directed" } else { "undirected" };
                write!(f, "{kind} link breed '{name}' declared more than once")
            }
            Self::EmptyShape => write!(f, "shape name must not be empty"),
            Self::InvalidTickRate { value } => {
                write!(f, "tick_rate_hz must be finite and positive, got {value}")
            }
            Self::HistoryCapacityZero => write!(f, "history_capacity must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── ModelConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a [`Model`](crate::Model).
///
/// Property templates declare every variable an agent can hold; writes
/// to anything undeclared are ignored at run time.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    /// Patch-coordinate bounds. Invalid bounds fall back to
    /// [`WorldBounds::DEFAULT`].
    pub bounds: WorldBounds,
    /// Whether the x axis wraps. Default: `true`.
    pub wrap_x: bool,
    /// Whether the y axis wraps. Default: `true`.
    pub wrap_y: bool,
    /// RNG seed. Default: 0.
    pub seed: u64,
    /// Turtle breeds.
    pub turtle_breeds: Vec<TurtleBreedDef>,
    /// Directed link breeds.
    pub directed_link_breeds: Vec<LinkBreedDef>,
    /// Undirected link breeds.
    pub undirected_link_breeds: Vec<LinkBreedDef>,
    /// Properties every turtle carries.
    pub turtle_properties: PropertyTemplate,
    /// Properties every patch carries.
    pub patch_properties: PropertyTemplate,
    /// Model-wide global variables.
    pub globals: PropertyTemplate,
    /// Shape for turtles whose breed has none. Default: `"circle"`.
    pub default_turtle_shape: String,
    /// Shape for links whose breed has none. Default: `"default"`.
    pub default_link_shape: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            bounds: WorldBounds::DEFAULT,
            wrap_x: true,
            wrap_y: true,
            seed: 0,
            turtle_breeds: Vec::new(),
            directed_link_breeds: Vec::new(),
            undirected_link_breeds: Vec::new(),
            turtle_properties: PropertyTemplate::new(),
            patch_properties: PropertyTemplate::new(),
            globals: PropertyTemplate::new(),
            default_turtle_shape: "circle".to_owned(),
            default_link_shape: "default".to_owned(),
        }
    }
}

impl ModelConfig {
    /// A default configuration with the given bounds and wrapping.
    pub fn with_bounds(bounds: WorldBounds, wrap_x: bool, wrap_y: bool) -> Self {
        Self {
            bounds,
            wrap_x,
            wrap_y,
            ..Self::default()
        }
    }

    /// Set the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Add a turtle breed.
    pub fn turtle_breed(mut self, def: TurtleBreedDef) -> Self {
        self.turtle_breeds.push(def);
        self
    }

    /// Add a directed link breed.
    pub fn directed_link_breed(mut self, def: LinkBreedDef) -> Self {
        self.directed_link_breeds.push(def);
        self
    }

    /// Add an undirected link breed.
    pub fn undirected_link_breed(mut self, def: LinkBreedDef) -> Self {
        self.undirected_link_breeds.push(def);
        self
    }

    /// Declare a general turtle property.
    pub fn turtle_property(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.turtle_properties.declare(name, default);
        self
    }

    /// Declare a patch property.
    pub fn patch_property(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.patch_properties.declare(name, default);
        self
    }

    /// Declare a global variable.
    pub fn global(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.globals.declare(name, default);
        self
    }

    /// Validate breed and shape declarations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_turtle_shape.is_empty() || self.default_link_shape.is_empty() {
            return Err(ConfigError::EmptyShape);
        }
        let mut seen = IndexSet::new();
        for def in &self.turtle_breeds {
            if def.name.is_empty() {
                return Err(ConfigError::EmptyBreedName);
            }
            if !seen.insert(def.name.as_str()) {
                return Err(ConfigError::DuplicateTurtleBreed {
                    name: def.name.clone(),
                });
            }
        }
        for (defs, directed) in [
            (&self.directed_link_breeds, true),
            (&self.undirected_link_breeds, false),
        ] {
            let mut seen = IndexSet::new();
            for def in defs {
                if def.name.is_empty() {
                    return Err(ConfigError::EmptyBreedName);
                }
                if !seen.insert(def.name.as_str()) {
                    return Err(ConfigError::DuplicateLinkBreed {
                        name: def.name.clone(),
                        directed,
                    });
                }
            }
        }
        Ok(())
    }
}
