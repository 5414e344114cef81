//! Links: typed edges between two turtles.

use patchwork_core::{Color, TieMode, TurtleId};

/// A link between two turtles.
///
/// Ends, directedness, and breed change only through
/// [`Model`](crate::Model); display attributes and the tie mode can be
/// edited through [`Model::link_mut`](crate::Model::link_mut).
#[derive(Clone, Debug)]
pub struct Link {
    end1: TurtleId,
    end2: TurtleId,
    directed: bool,
    breed: String,
    color: Color,
    label: String,
    label_color: Color,
    shape: String,
    thickness: f64,
    size: f64,
    hidden: bool,
    tie_mode: TieMode,
}

impl Link {
    pub(crate) fn new(end1: TurtleId, end2: TurtleId, directed: bool, breed: &str, shape: String) -> Self {
        Self {
            end1,
            end2,
            directed,
            breed: breed.to_owned(),
            color: Color::WHITE,
            label: String::new(),
            label_color: Color::WHITE,
            shape,
            thickness: 0.0,
            size: 1.0,
            hidden: false,
            tie_mode: TieMode::NONE,
        }
    }

    /// Source end; for undirected links, the end that created it.
    pub fn end1(&self) -> TurtleId {
        self.end1
    }

    /// Target end.
    pub fn end2(&self) -> TurtleId {
        self.end2
    }

    /// Both ends as `(end1, end2)`.
    pub fn both_ends(&self) -> (TurtleId, TurtleId) {
        (self.end1, self.end2)
    }

    /// The end that is not `turtle`, or `None` if `turtle` is not an end.
    pub fn other_end(&self, turtle: TurtleId) -> Option<TurtleId> {
        if turtle == self.end1 {
            Some(self.end2)
        } else if turtle == self.end2 {
            Some(self.end1)
        } else {
            None
        }
    }

    /// Whether the link points from end1 to end2.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Breed name; empty for unbred links.
    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub(crate) fn set_breed(&mut self, breed: &str) {
        self.breed = breed.to_owned();
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

    /// Shape name.
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// Set the shape name.
    pub fn set_shape(&mut self, shape: impl Into<String>) {
        self.shape = shape.into();
    }

    /// Line thickness.
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Set the line thickness.
    pub fn set_thickness(&mut self, thickness: f64) {
        self.thickness = thickness;
    }

    /// Display size.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Set the display size.
    pub fn set_size(&mut self, size: f64) {
        self.size = size;
    }

    /// Whether the link is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Hide the link.
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Show the link.
    pub fn show(&mut self) {
        self.hidden = false;
    }

    /// Current tie mode.
    pub fn tie_mode(&self) -> TieMode {
        self.tie_mode
    }

    /// Set the tie mode.
    pub fn set_tie_mode(&mut self, mode: TieMode) {
        self.tie_mode = mode;
    }

    /// Tie with [`TieMode::FIXED`].
    pub fn tie(&mut self) {
        self.tie_mode = TieMode::FIXED;
    }

    /// Remove any tie.
    pub fn untie(&mut self) {
        self.tie_mode = TieMode::NONE;
    }
}
