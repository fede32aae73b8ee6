//! External force generators for the particle system
//!
//! Each generator implements [`Force`] and adds its contribution into the
//! shared force buffer of a [`SimState`]. The stepper zeroes the buffer,
//! then lets every registered generator accumulate, in order.

use tracing::warn;

use super::states::{SimState, DF};
use crate::visualization::overlay::{Overlay, OverlayKind};

/// Collection of force generators (gravity, springs, ...)
/// Contributions are summed into the state's force buffer
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force generator
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Zero the force buffer and let every generator accumulate into it
    pub fn apply_all(&self, state: &mut SimState) {
        state.force.zero();
        for term in &self.terms {
            term.apply(state);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn Force + Send + Sync)> {
        self.terms.iter().map(|b| b.as_ref())
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A force generator. Read-only during a step; the stepper never mutates
/// or frees it. The overlay hook is for the external renderer only.
pub trait Force {
    /// Add this generator's contribution into `state.force`
    fn apply(&self, state: &mut SimState);

    /// Optional visualization primitive for the external renderer
    fn overlay(&self, _state: &SimState) -> Option<Overlay> {
        None
    }
}

/// Uniform gravity: adds `m_i * a` to every particle's y force, i.e.
/// constant downward acceleration `a` regardless of mass (screen
/// coordinates, y grows downward)
pub struct Gravity {
    pub a: f64, // acceleration
}

impl Force for Gravity {
    fn apply(&self, state: &mut SimState) {
        for i in 0..state.n {
            let m = state.mass(i);
            state.force[i * DF + 1] += m * self.a;
        }
    }
}

/// Hookean spring between two particles.
///
/// `F = -k * (d - rest_length)` along the separation direction, applied
/// with opposite signs to both endpoints. With this sign convention a
/// negative `k` (what the editor passes for its spring tools) restores
/// toward the rest length; a positive `k` pushes away from it.
pub struct Spring {
    pub a: usize,        // first particle index
    pub b: usize,        // second particle index
    pub rest_length: f64,
    pub k: f64,          // stiffness, see sign convention above
}

impl Force for Spring {
    fn apply(&self, state: &mut SimState) {
        let pa = state.position(self.a);
        let pb = state.position(self.b);

        let delta = pa - pb;
        let d = delta.norm();

        // Coincident endpoints leave no defined direction; contribute
        // nothing this sub-step, mirroring the constraint convention
        if d == 0.0 {
            warn!(a = self.a, b = self.b, "zero-length spring, skipping");
            return;
        }

        let x = d - self.rest_length;
        let f = -self.k * x;

        let unit = delta / d;
        state.add_force(self.a, -unit * f);
        state.add_force(self.b, unit * f);
    }

    fn overlay(&self, state: &SimState) -> Option<Overlay> {
        Some(Overlay::Segment {
            a: state.position(self.a),
            b: state.position(self.b),
            kind: OverlayKind::Spring,
        })
    }
}
