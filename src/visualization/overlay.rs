//! Renderer-facing overlay primitives
//!
//! The core does no drawing. Forces and constraints expose optional
//! overlay hooks (a connector segment, a pin halo) and this module
//! collects them, plus current particle positions, for whatever
//! renderer sits outside the crate.

use crate::simulation::constraints::ConstraintSet;
use crate::simulation::forces::ForceSet;
use crate::simulation::states::{NVec2, SimState};

/// What a segment overlay represents, for styling by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Spring,
    Rod,
}

/// A single overlay primitive in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// Connector between two points (spring or rod)
    Segment { a: NVec2, b: NVec2, kind: OverlayKind },
    /// Marker at a pinned particle
    Halo { at: NVec2 },
}

/// Gather every force and constraint overlay for the current state
pub fn collect_overlays(
    state: &SimState,
    forces: &ForceSet,
    constraints: &ConstraintSet,
) -> Vec<Overlay> {
    let mut out = Vec::new();

    for f in forces.iter() {
        if let Some(o) = f.overlay(state) {
            out.push(o);
        }
    }

    for c in constraints.iter() {
        if let Some(o) = c.overlay(state) {
            out.push(o);
        }
    }

    out
}

/// Current particle positions, one per particle, for drawing
pub fn particle_positions(state: &SimState) -> Vec<NVec2> {
    (0..state.n).map(|i| state.position(i)).collect()
}
