//! Spatial queries over patches and turtles.
//!
//! Radius queries scan the candidate set and keep members whose wrap-aware
//! distance is within the radius, preserving the candidate set's order.

use std::f64::consts::TAU;

use patchwork_agentset::{PatchSet, TurtleSet};
use patchwork_core::{PatchId, TurtleId};
use patchwork_space::Connectivity;

use crate::error::ModelError;
use crate::model::Model;

impl Model {
    // ── Turtles by location ─────────────────────────────────────

    /// Turtles standing on the patch that contains `(x, y)`.
    pub fn turtles_at(&self, x: f64, y: f64) -> TurtleSet {
        self.patch_at(x, y)
            .map(|p| self.turtles_on_patch(p))
            .unwrap_or_default()
    }

    /// Turtles standing on `patch`.
    pub fn turtles_on_patch(&self, patch: PatchId) -> TurtleSet {
        self.patch(patch)
            .map(|p| p.turtles_here().clone())
            .unwrap_or_default()
    }

    /// Turtles standing on any patch of `patches`, patch by patch.
    pub fn turtles_on_patches(&self, patches: &PatchSet) -> TurtleSet {
        patches
            .iter()
            .filter_map(|p| self.patch(p))
            .flat_map(|p| p.turtles_here().iter())
            .collect()
    }

    /// Turtles sharing `turtle`'s patch, `turtle` included.
    pub fn turtles_here(&self, turtle: TurtleId) -> TurtleSet {
        self.turtle(turtle)
            .map(|t| self.turtles_on_patch(t.patch_here()))
            .unwrap_or_default()
    }

    /// Turtles of `breed` (`""` for all) within `radius` of `(x, y)`.
    pub fn turtles_in_radius(&self, x: f64, y: f64, radius: f64, breed: &str) -> TurtleSet {
        let Some(candidates) = self.turtles_of(breed) else {
            return TurtleSet::new();
        };
        candidates.with(|t| {
            self.distance_xy(*t, x, y)
                .is_some_and(|d| d <= radius)
        })
    }

    /// Patches whose centers lie within `radius` of `(x, y)`.
    pub fn patches_in_radius(&self, x: f64, y: f64, radius: f64) -> PatchSet {
        self.all_patches.with(|p| {
            self.patch_distance_xy(*p, x, y)
                .is_some_and(|d| d <= radius)
        })
    }

    // ── Patch neighborhoods ─────────────────────────────────────

    /// The eight surrounding patches, fewer at a non-wrapping edge.
    pub fn neighbors(&self, patch: PatchId) -> PatchSet {
        self.neighbourhood(patch, Connectivity::Eight)
    }

    /// The four edge-sharing patches, fewer at a non-wrapping edge.
    pub fn neighbors4(&self, patch: PatchId) -> PatchSet {
        self.neighbourhood(patch, Connectivity::Four)
    }

    fn neighbourhood(&self, patch: PatchId, connectivity: Connectivity) -> PatchSet {
        let Some(p) = self.patch(patch) else {
            return PatchSet::new();
        };
        connectivity
            .directions()
            .iter()
            .filter_map(|d| p.neighbour(*d))
            .collect()
    }

    /// The patch `(dx, dy)` away from `patch`, wrapping where allowed.
    pub fn patch_at_offset(&self, patch: PatchId, dx: i32, dy: i32) -> Option<PatchId> {
        let p = self.patch(patch)?;
        let (px, py) = self.topology.offset_coords(p.pxcor(), p.pycor(), dx, dy)?;
        self.patch_at_coords(px, py)
    }

    /// Distance from the center of `patch` to `(x, y)`.
    pub fn patch_distance_xy(&self, patch: PatchId, x: f64, y: f64) -> Option<f64> {
        let p = self.patch(patch)?;
        Some(
            self.topology
                .distance(f64::from(p.pxcor()), f64::from(p.pycor()), x, y),
        )
    }

    /// Heading in degrees from the center of `patch` to `(x, y)`.
    pub fn patch_towards_xy(&self, patch: PatchId, x: f64, y: f64) -> Result<f64, ModelError> {
        let p = self.patch(patch).ok_or(ModelError::PatchNotFound(patch))?;
        self.heading_between(f64::from(p.pxcor()), f64::from(p.pycor()), x, y)
    }

    // ── Layout ──────────────────────────────────────────────────

    /// Spread `turtles` evenly around a circle of `radius` centered on the
    /// origin, in set order, each facing outward.
    pub fn layout_circle(&mut self, turtles: &TurtleSet, radius: f64) -> Result<(), ModelError> {
        let n = turtles.len();
        for (i, turtle) in turtles.iter().enumerate() {
            let angle = i as f64 * TAU / n as f64;
            let (sin, cos) = angle.sin_cos();
            self.set_xy(turtle, radius * cos, radius * sin)?;
            self.set_heading(turtle, angle.to_degrees())?;
        }
        Ok(())
    }
}
