//! Tagged property values, declared templates, and per-agent property bags.
//!
//! A [`PropertyTemplate`] is declared once when a model is configured. Each
//! agent gets a [`Properties`] bag cloned from its template, so the set of
//! keys and the kind of every value are fixed for the agent's lifetime.

use indexmap::IndexMap;
use std::fmt;

// ── Value ───────────────────────────────────────────────────────────

/// The kind of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A 64-bit float.
    Number,
    /// A string.
    Text,
    /// A boolean.
    Bool,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::Text => write!(f, "text"),
            Self::Bool => write!(f, "bool"),
        }
    }
}

/// A property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A number. Integers are widened to `f64`.
    Number(f64),
    /// A string.
    Text(String),
    /// A boolean.
    Bool(bool),
}

impl Value {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Number,
            Self::Text(_) => ValueKind::Text,
            Self::Bool(_) => ValueKind::Bool,
        }
    }

    /// The number, if this is a [`Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string, if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

// ── PropertyTemplate ────────────────────────────────────────────────

/// Declared property names with their default values, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyTemplate {
    defaults: IndexMap<String, Value>,
}

impl PropertyTemplate {
    /// An empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property, builder style. A later declaration of the same
    /// name replaces the earlier default.
    pub fn with(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.declare(name, default);
        self
    }

    /// Declare a property in place.
    pub fn declare(&mut self, name: impl Into<String>, default: impl Into<Value>) {
        self.defaults.insert(name.into(), default.into());
    }

    /// Whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.defaults.contains_key(name)
    }

    /// The declared kind of `name`.
    pub fn kind_of(&self, name: &str) -> Option<ValueKind> {
        self.defaults.get(name).map(Value::kind)
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// Whether nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// Declared names and defaults in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.defaults.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A fresh bag holding the defaults.
    pub fn instantiate(&self) -> Properties {
        Properties {
            values: self.defaults.clone(),
        }
    }
}

// ── Properties ──────────────────────────────────────────────────────

/// A property bag instantiated from a [`PropertyTemplate`].
///
/// Keys and value kinds are fixed at instantiation. [`set`](Self::set)
/// refuses undeclared keys and kind changes by returning `false` and
/// leaving the bag untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Properties {
    values: IndexMap<String, Value>,
}

impl Properties {
    /// An empty bag with no declared keys.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The current value of `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The current value of `name` as a number.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_number)
    }

    /// Whether `name` is declared in this bag.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Write `value` to a declared key of the same kind.
    ///
    /// Returns `true` if the write was applied.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        match self.values.get_mut(name) {
            Some(slot) if slot.kind() == value.kind() => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    /// Names and values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys are declared.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
