//! Owned, read-only views of world state for presentation layers.
//!
//! A [`WorldSnapshot`] copies everything a renderer needs (bounds, tick,
//! and the display attributes of every agent) without exposing the
//! model's registries or link indexes. Snapshots are plain data and can be
//! kept, compared, or sent to another thread.

use patchwork_core::{Color, TickId, Who};
use patchwork_space::WorldBounds;

use crate::model::Model;

/// Display state of one patch.
#[derive(Clone, Debug, PartialEq)]
pub struct PatchView {
    /// Integer x coordinate.
    pub pxcor: i32,
    /// Integer y coordinate.
    pub pycor: i32,
    /// Fill color.
    pub color: Color,
    /// Label text.
    pub label: String,
    /// Label color.
    pub label_color: Color,
}

/// Display state of one turtle.
#[derive(Clone, Debug, PartialEq)]
pub struct TurtleView {
    /// Who number.
    pub who: Who,
    /// Breed name; empty for the general population.
    pub breed: String,
    /// Continuous x coordinate.
    pub x: f64,
    /// Continuous y coordinate.
    pub y: f64,
    /// Heading in degrees.
    pub heading: f64,
    /// Color.
    pub color: Color,
    /// Shape name.
    pub shape: String,
    /// Size in patches.
    pub size: f64,
    /// Label text.
    pub label: String,
    /// Label color.
    pub label_color: Color,
    /// Whether the turtle is hidden.
    pub hidden: bool,
}

/// Display state of one link.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkView {
    /// Who number of end1.
    pub end1: Who,
    /// Who number of end2.
    pub end2: Who,
    /// Whether the link is directed.
    pub directed: bool,
    /// Breed name; empty for unbred links.
    pub breed: String,
    /// Color.
    pub color: Color,
    /// Shape name.
    pub shape: String,
    /// Line thickness.
    pub thickness: f64,
    /// Label text.
    pub label: String,
    /// Label color.
    pub label_color: Color,
    /// Whether the link is hidden.
    pub hidden: bool,
}

/// A consistent copy of the world at one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    /// Tick at which the copy was taken.
    pub tick: TickId,
    /// Patch bounds.
    pub bounds: WorldBounds,
    /// Whether the x axis wraps.
    pub wrap_x: bool,
    /// Whether the y axis wraps.
    pub wrap_y: bool,
    /// Every patch, row-major from the bottom-left corner.
    pub patches: Vec<PatchView>,
    /// Every live turtle in creation order.
    pub turtles: Vec<TurtleView>,
    /// Every live link in creation order.
    pub links: Vec<LinkView>,
}

impl WorldSnapshot {
    /// The turtle with who number `who`.
    pub fn turtle(&self, who: Who) -> Option<&TurtleView> {
        self.turtles.iter().find(|t| t.who == who)
    }
}

impl Model {
    /// Copy the displayable state of the whole world.
    pub fn snapshot(&self) -> WorldSnapshot {
        let patches = self
            .patches
            .iter()
            .map(|p| PatchView {
                pxcor: p.pxcor(),
                pycor: p.pycor(),
                color: p.color(),
                label: p.label().to_owned(),
                label_color: p.label_color(),
            })
            .collect();
        let turtles = self
            .turtles()
            .iter()
            .filter_map(|id| self.turtle(id))
            .map(|t| TurtleView {
                who: t.who(),
                breed: t.breed().to_owned(),
                x: t.xcor(),
                y: t.ycor(),
                heading: t.heading(),
                color: t.color(),
                shape: t.shape().to_owned(),
                size: t.size(),
                label: t.label().to_owned(),
                label_color: t.label_color(),
                hidden: t.is_hidden(),
            })
            .collect();
        let links = self
            .links()
            .iter()
            .filter_map(|id| self.link(id))
            .filter_map(|l| {
                let end1 = self.turtle(l.end1())?.who();
                let end2 = self.turtle(l.end2())?.who();
                Some(LinkView {
                    end1,
                    end2,
                    directed: l.is_directed(),
                    breed: l.breed().to_owned(),
                    color: l.color(),
                    shape: l.shape().to_owned(),
                    thickness: l.thickness(),
                    label: l.label().to_owned(),
                    label_color: l.label_color(),
                    hidden: l.is_hidden(),
                })
            })
            .collect();
        WorldSnapshot {
            tick: self.tick_id(),
            bounds: self.bounds(),
            wrap_x: self.wraps_x(),
            wrap_y: self.wraps_y(),
            patches,
            turtles,
            links,
        }
    }
}
