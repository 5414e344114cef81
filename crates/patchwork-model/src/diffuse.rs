//! Patch-variable diffusion.
//!
//! One diffusion step reads every patch's value from a snapshot, so the
//! result does not depend on patch order. Only patches with a complete
//! neighborhood (eight or four neighbors) take part: they send
//! `value * pct / N` to each complete neighbor and keep the shares bound
//! for incomplete ones. Patches on a non-wrapping edge neither send nor
//! receive and keep their value. On a torus every patch is complete and
//! the total is conserved.

use patchwork_core::PatchId;
use patchwork_space::Connectivity;

use crate::error::ModelError;
use crate::model::Model;

impl Model {
    /// Share `pct` of each patch's `property` equally among its eight
    /// neighbors.
    ///
    /// `pct` must lie in `[0, 1]` and `property` must be a declared
    /// numeric patch property; otherwise nothing changes.
    pub fn diffuse(&mut self, property: &str, pct: f64) -> Result<(), ModelError> {
        self.diffuse_with(property, pct, Connectivity::Eight)
    }

    /// [`diffuse`](Self::diffuse) over the four edge-sharing neighbors.
    pub fn diffuse4(&mut self, property: &str, pct: f64) -> Result<(), ModelError> {
        self.diffuse_with(property, pct, Connectivity::Four)
    }

    fn diffuse_with(&mut self, property: &str, pct: f64, connectivity: Connectivity) -> Result<(), ModelError> {
        if !(0.0..=1.0).contains(&pct) {
            return Err(ModelError::InvalidDiffusionPercent { value: pct });
        }
        self.check_numeric_patch_property(property)?;

        let degree = connectivity.degree();
        let values: Vec<f64> = self
            .patches
            .iter()
            .map(|p| p.own_number(property).unwrap_or(0.0))
            .collect();
        let neighbours: Vec<Vec<PatchId>> = self
            .patches
            .iter()
            .map(|p| {
                connectivity
                    .directions()
                    .iter()
                    .filter_map(|d| p.neighbour(*d))
                    .collect()
            })
            .collect();
        let complete = |i: usize| neighbours[i].len() == degree;

        let mut next = values.clone();
        for (i, &value) in values.iter().enumerate() {
            if !complete(i) {
                continue;
            }
            let share = value * pct / degree as f64;
            for n in &neighbours[i] {
                let j = n.0 as usize;
                if complete(j) {
                    next[i] -= share;
                    next[j] += share;
                }
            }
        }

        for (patch, value) in self.patches.iter_mut().zip(next) {
            patch.set_own(property, value);
        }
        Ok(())
    }
}
