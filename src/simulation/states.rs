//! Core state types for the constrained particle simulation
//!
//! Defines the editor-facing `Particle` snapshot and the live `SimState`
//! the stepper mutates. All per-coordinate buffers are laid out as
//! `N * DF` contiguous scalars, with particle `i`'s x and y at offsets
//! `i * DF` and `i * DF + 1`.

use nalgebra::Vector2;

use crate::linalg::dense::{DMat, DVec};

pub type NVec2 = Vector2<f64>;

/// Degrees of freedom per particle (x, y)
pub const DF: usize = 2;

/// A point mass as placed by the editor: position and mass only.
/// Velocity lives in `SimState`, not here.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64, // position x
    pub y: f64, // position y
    pub m: f64, // mass, must be > 0
}

/// Live simulation state, constructed once per run from a particle
/// snapshot and fully overwritten buffer-by-buffer each sub-step.
///
/// Force and constraint objects are NOT owned here; they stay with the
/// editor/collector and are passed to the stepper by reference.
#[derive(Debug, Clone)]
pub struct SimState {
    pub n: usize,  // particle count
    pub nc: usize, // constraint count

    pub pos: DVec,      // positions, len n*DF
    pub vel: DVec,      // velocities, len n*DF
    pub force: DVec,    // force accumulator, len n*DF
    pub mass_inv: DVec, // inverse masses per coordinate, len n*DF, constant
    pub w: DMat,        // diagonal inverse-mass matrix, w[k][k] = mass_inv[k], constant

    pub c: DVec,  // constraint values, len nc
    pub cd: DVec, // constraint velocities, len nc
    pub j: DMat,  // Jacobian, nc x n*DF
    pub jd: DMat, // Jacobian time derivative, nc x n*DF

    pub ks: f64, // Baumgarte position-feedback gain
    pub kd: f64, // Baumgarte velocity-feedback gain

    pub total_error: f64, // sum of |c[i]| after the last sub-step
}

impl SimState {
    /// Build the run-time state from an editor snapshot. Particles start
    /// at rest. `nc` is the number of constraints that will fill rows.
    pub fn new(particles: &[Particle], nc: usize, ks: f64, kd: f64) -> Self {
        let n = particles.len();

        let mut pos = DVec::new(n * DF);
        let vel = DVec::new(n * DF);
        let force = DVec::new(n * DF);
        let mut mass_inv = DVec::new(n * DF);
        let mut w = DMat::new(n * DF, n * DF);

        for (i, p) in particles.iter().enumerate() {
            pos[i * DF] = p.x;
            pos[i * DF + 1] = p.y;

            let inv = 1.0 / p.m;
            mass_inv[i * DF] = inv;
            mass_inv[i * DF + 1] = inv;

            w[(i * DF, i * DF)] = inv;
            w[(i * DF + 1, i * DF + 1)] = inv;
        }

        Self {
            n,
            nc,
            pos,
            vel,
            force,
            mass_inv,
            w,
            c: DVec::new(nc),
            cd: DVec::new(nc),
            j: DMat::new(nc, n * DF),
            jd: DMat::new(nc, n * DF),
            ks,
            kd,
            total_error: 0.0,
        }
    }

    /// Zero the per-constraint buffers. Constraints only write their own
    /// nonzero columns, so this must run before every row-fill pass.
    pub fn reset_constraints(&mut self) {
        self.c.zero();
        self.cd.zero();
        self.j.zero();
        self.jd.zero();
    }

    /// Current position of particle `i`
    pub fn position(&self, i: usize) -> NVec2 {
        NVec2::new(self.pos[i * DF], self.pos[i * DF + 1])
    }

    /// Current velocity of particle `i`
    pub fn velocity(&self, i: usize) -> NVec2 {
        NVec2::new(self.vel[i * DF], self.vel[i * DF + 1])
    }

    /// Mass of particle `i`
    pub fn mass(&self, i: usize) -> f64 {
        1.0 / self.mass_inv[i * DF]
    }

    /// Accumulate `f` into particle `i`'s slot in the force buffer
    pub fn add_force(&mut self, i: usize, f: NVec2) {
        self.force[i * DF] += f.x;
        self.force[i * DF + 1] += f.y;
    }
}
