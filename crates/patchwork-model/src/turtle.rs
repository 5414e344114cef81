//! Turtles: mobile agents with a continuous position and heading.

use std::f64::consts::TAU;

use patchwork_core::{Color, PatchId, Properties, Value, Who};

use crate::adjacency::TurtleLinks;

/// Default turtle size in patches.
pub const DEFAULT_TURTLE_SIZE: f64 = 0.8;

/// A turtle.
///
/// Position, heading, and breed change only through [`Model`](crate::Model)
/// so that patch membership and tie propagation stay consistent. Display
/// attributes and properties can be edited through
/// [`Model::turtle_mut`](crate::Model::turtle_mut).
#[derive(Clone, Debug)]
pub struct Turtle {
    who: Who,
    x: f64,
    y: f64,
    heading: f64,
    breed: String,
    size: f64,
    shape: String,
    color: Color,
    label: String,
    label_color: Color,
    hidden: bool,
    general: Properties,
    breed_props: Properties,
    pub(crate) patch: PatchId,
    pub(crate) links: TurtleLinks,
}

impl Turtle {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        who: Who,
        x: f64,
        y: f64,
        patch: PatchId,
        breed: &str,
        shape: String,
        general: Properties,
        breed_props: Properties,
    ) -> Self {
        Self {
            who,
            x,
            y,
            heading: 0.0,
            breed: breed.to_owned(),
            size: DEFAULT_TURTLE_SIZE,
            shape,
            color: Color::BLACK,
            label: String::new(),
            label_color: Color::BLACK,
            hidden: false,
            general,
            breed_props,
            patch,
            links: TurtleLinks::default(),
        }
    }

    /// A copy with a new identity, keeping every attribute and property
    /// but none of the links.
    pub(crate) fn hatchling(&self, who: Who) -> Self {
        Self {
            who,
            links: TurtleLinks::default(),
            ..self.clone()
        }
    }

    // ── Identity and geometry ───────────────────────────────────

    /// Permanent who number.
    pub fn who(&self) -> Who {
        self.who
    }

    /// Continuous x coordinate.
    pub fn xcor(&self) -> f64 {
        self.x
    }

    /// Continuous y coordinate.
    pub fn ycor(&self) -> f64 {
        self.y
    }

    /// Heading in degrees, in `[0, 360)`. 0 is +x, counter-clockwise positive.
    pub fn heading(&self) -> f64 {
        let deg = self.heading.to_degrees();
        if deg >= 360.0 {
            0.0
        } else {
            deg
        }
    }

    /// Heading in radians, in `[0, 2π)`.
    pub fn heading_radians(&self) -> f64 {
        self.heading
    }

    /// Breed name; empty for the general population.
    pub fn breed(&self) -> &str {
        &self.breed
    }

    /// The patch under the turtle.
    pub fn patch_here(&self) -> PatchId {
        self.patch
    }

    pub(crate) fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub(crate) fn set_heading_radians(&mut self, radians: f64) {
        self.heading = normalize_radians(radians);
    }

    pub(crate) fn set_breed(&mut self, breed: &str, breed_props: Properties) {
        self.breed = breed.to_owned();
        self.breed_props = breed_props;
    }

    // ── Display ─────────────────────────────────────────────────

    /// Size in patches.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Set the size.
    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    /// Shape name.
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Set the shape name.
    pub fn set_shape(&mut self, shape: impl Into<String>) {
        self.shape = shape.into();
    }

    /// Color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Label text.
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

    /// Whether the turtle is hidden from display.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Hide the turtle.
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Show the turtle.
    pub fn show(&mut self) {
        self.hidden = false;
    }

    // ── Properties ──────────────────────────────────────────────

    /// A property, looked up in the breed layer first, then the general one.
    pub fn own(&self, name: &str) -> Option<&Value> {
        self.breed_props
            .get(name)
            .or_else(|| self.general.get(name))
    }

    /// A property as a number.
    pub fn own_number(&self, name: &str) -> Option<f64> {
        self.own(name).and_then(Value::as_number)
    }

    /// Write a property to the layer that declares it, breed layer first.
    ///
    /// Writes to undeclared names, or of the wrong value kind, are ignored.
    /// Returns `true` when the write was applied.
    pub fn set_own(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        let applied = if self.breed_props.contains(name) {
            self.breed_props.set(name, value)
        } else {
            self.general.set(name, value)
        };
        if !applied {
            log::debug!("turtle {} ignored write to '{name}'", self.who);
        }
        applied
    }

    /// General-layer properties.
    pub fn general_properties(&self) -> &Properties {
        &self.general
    }

    /// Breed-layer properties.
    pub fn breed_properties(&self) -> &Properties {
        &self.breed_props
    }
}

/// Fold an angle into `[0, 2π)`.
pub(crate) fn normalize_radians(radians: f64) -> f64 {
    let r = radians.rem_euclid(TAU);
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Fold an angle in degrees into `[0, 360)`.
pub(crate) fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchwork_core::PropertyTemplate;

    fn turtle() -> Turtle {
        Turtle::new(
            Who(3),
            0.0,
            0.0,
            PatchId(0),
            "wolves",
            "wolf".into(),
            PropertyTemplate::new()
                .with("energy", 5)
                .with("name", "")
                .instantiate(),
            PropertyTemplate::new().with("energy", 20).instantiate(),
        )
    }

    #[test]
    fn breed_layer_shadows_general() {
        let mut t = turtle();
        assert_eq!(t.own_number("energy"), Some(20.0));
        assert!(t.set_own("energy", 7));
        assert_eq!(t.own_number("energy"), Some(7.0));
        assert_eq!(t.general_properties().number("energy"), Some(5.0));
    }

    #[test]
    fn falls_back_to_general_layer() {
        let mut t = turtle();
        assert!(t.set_own("name", "akela"));
        assert_eq!(t.own("name"), Some(&Value::from("akela")));
    }

    #[test]
    fn unknown_key_is_silent_noop() {
        let mut t = turtle();
        assert!(!t.set_own("speed", 1.0));
        assert_eq!(t.own("speed"), None);
    }

    #[test]
    fn heading_normalizes_to_degrees() {
        let mut t = turtle();
        t.set_heading_radians(-std::f64::consts::FRAC_PI_2);
        assert!((t.heading() - 270.0).abs() < 1e-9);
        t.set_heading_radians(TAU + 1.0);
        assert!((t.heading_radians() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_helpers() {
        assert!((normalize_degrees(-45.0) - 315.0).abs() < 1e-12);
        assert!((normalize_degrees(720.0)).abs() < 1e-12);
        assert!(normalize_radians(-1e-300) < TAU);
    }

    #[test]
    fn defaults() {
        let t = turtle();
        assert_eq!(t.size(), DEFAULT_TURTLE_SIZE);
        assert_eq!(t.label(), "");
        assert!(!t.is_hidden());
        assert_eq!(t.breed(), "wolves");
    }
}
