//! Holonomic constraints and their derivative rows
//!
//! Each constraint owns one row `i` of the shared `c`, `cd`, `j`, `jd`
//! buffers in [`SimState`]. The stepper zeroes the buffers, then calls
//! `c`, `cd`, `j`, `jd` in that order per constraint: `jd` reads the
//! `c[i]` and `j[i, ..]` entries written earlier in the same pass.
//!
//! All four quantities are evaluated against the current `pos`/`vel`,
//! before any integration this sub-step. Zero separations are degenerate;
//! every formula guards them by writing zeros (no corrective force).

use super::states::{SimState, DF};
use crate::visualization::overlay::{Overlay, OverlayKind};

/// Collection of constraints; row index == position in the set
pub struct ConstraintSet {
    terms: Vec<Box<dyn Constraint + Send + Sync>>,
}

impl ConstraintSet {
    /// Create an empty constraint set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a constraint; it takes the next row index
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Constraint + Send + Sync + 'static,
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

    /// Zero the constraint buffers and fill every row.
    /// Order matters: all four quantities for row `i` are written before
    /// moving to row `i + 1`.
    pub fn fill_rows(&self, state: &mut SimState) {
        state.reset_constraints();
        for (i, term) in self.terms.iter().enumerate() {
            term.c(state, i);
            term.cd(state, i);
            term.j(state, i);
            term.jd(state, i);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn Constraint + Send + Sync)> {
        self.terms.iter().map(|b| b.as_ref())
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self::new()
    }
}

/// A holonomic constraint `C(q) = 0` on one or two particles.
///
/// Writes the row-`i` entries of the shared buffers; only its own nonzero
/// columns are touched. Read-only during a step, shared with the editor.
pub trait Constraint {
    /// Signed constraint violation, 0 when satisfied
    fn c(&self, state: &mut SimState, i: usize);

    /// Time derivative of `C`
    fn cd(&self, state: &mut SimState, i: usize);

    /// Row of dC/dq: the constraint gradient
    fn j(&self, state: &mut SimState, i: usize);

    /// Row of d(Cd)/dq, i.e. the time derivative of the `J` row;
    /// accounts for geometric curvature of the constraint
    fn jd(&self, state: &mut SimState, i: usize);

    /// Optional visualization primitive for the external renderer
    fn overlay(&self, _state: &SimState) -> Option<Overlay> {
        None
    }
}

/// Pins particle `a` to the fixed world point `(x, y)`.
///
/// `C` is the distance to the target, so it is always >= 0 and only
/// zero when the particle sits exactly on the pin. The gradient treats
/// it as a distance magnitude; at the target itself gradient and its
/// derivative are defined as zero.
pub struct PositionConstraint {
    pub a: usize, // pinned particle index
    pub x: f64,   // target x
    pub y: f64,   // target y
}

impl Constraint for PositionConstraint {
    fn c(&self, state: &mut SimState, i: usize) {
        let p = state.position(self.a);

        let dx = self.x - p.x;
        let dy = self.y - p.y;

        state.c[i] = (dx * dx + dy * dy).sqrt();
    }

    fn cd(&self, state: &mut SimState, i: usize) {
        let p = state.position(self.a);
        let v = state.velocity(self.a);

        let dx = self.x - p.x;
        let dy = self.y - p.y;

        let d = (dx * dx + dy * dy).sqrt();
        let top = dx * v.x + dy * v.y;

        if d == 0.0 {
            state.cd[i] = 0.0;
        } else {
            state.cd[i] = -top / d;
        }
    }

    fn j(&self, state: &mut SimState, i: usize) {
        let p = state.position(self.a);

        let dx = self.x - p.x;
        let dy = self.y - p.y;

        let d = (dx * dx + dy * dy).sqrt();

        if d == 0.0 {
            state.j[(i, self.a * DF)] = 0.0;
            state.j[(i, self.a * DF + 1)] = 0.0;
        } else {
            state.j[(i, self.a * DF)] = -dx / d;
            state.j[(i, self.a * DF + 1)] = -dy / d;
        }
    }

    fn jd(&self, state: &mut SimState, i: usize) {
        let p = state.position(self.a);
        let v = state.velocity(self.a);

        let dx = self.x - p.x;
        let dy = self.y - p.y;

        let top = dx * v.x + dy * v.y;

        // Quotient rule on the gradient, reusing the C and J row entries
        // written earlier in this pass
        let c = state.c[i];
        let csq = c * c;

        if csq == 0.0 {
            state.jd[(i, self.a * DF)] = 0.0;
            state.jd[(i, self.a * DF + 1)] = 0.0;
        } else {
            let jx = state.j[(i, self.a * DF)];
            let jy = state.j[(i, self.a * DF + 1)];

            state.jd[(i, self.a * DF)] = (c * v.x - (-top) * jx) / csq;
            state.jd[(i, self.a * DF + 1)] = (c * v.y - (-top) * jy) / csq;
        }
    }

    fn overlay(&self, state: &SimState) -> Option<Overlay> {
        Some(Overlay::Halo {
            at: state.position(self.a),
        })
    }
}

/// Rigid rod: holds particles `a` and `b` at distance `dist`.
///
/// `C` is signed, positive when stretched. `Cd` projects the relative
/// velocity onto the unit separation direction; `J` places `-unit` at
/// `a` and `+unit` at `b`.
pub struct DistanceConstraint {
    pub a: usize,  // first particle index
    pub b: usize,  // second particle index
    pub dist: f64, // rest distance
}

impl Constraint for DistanceConstraint {
    fn c(&self, state: &mut SimState, i: usize) {
        let pa = state.position(self.a);
        let pb = state.position(self.b);

        let d = (pb - pa).norm();

        state.c[i] = d - self.dist;
    }

    fn cd(&self, state: &mut SimState, i: usize) {
        let pa = state.position(self.a);
        let pb = state.position(self.b);
        let va = state.velocity(self.a);
        let vb = state.velocity(self.b);

        let delta = pb - pa;
        let d = delta.norm();

        let top = delta.dot(&(vb - va));

        if d == 0.0 {
            state.cd[i] = 0.0;
        } else {
            state.cd[i] = top / d;
        }
    }

    fn j(&self, state: &mut SimState, i: usize) {
        let pa = state.position(self.a);
        let pb = state.position(self.b);

        let delta = pb - pa;
        let d = delta.norm();

        if d == 0.0 {
            state.j[(i, self.a * DF)] = 0.0;
            state.j[(i, self.a * DF + 1)] = 0.0;

            state.j[(i, self.b * DF)] = 0.0;
            state.j[(i, self.b * DF + 1)] = 0.0;
        } else {
            state.j[(i, self.a * DF)] = -delta.x / d;
            state.j[(i, self.a * DF + 1)] = -delta.y / d;

            state.j[(i, self.b * DF)] = delta.x / d;
            state.j[(i, self.b * DF + 1)] = delta.y / d;
        }
    }

    fn jd(&self, state: &mut SimState, i: usize) {
        let pa = state.position(self.a);
        let pb = state.position(self.b);
        let va = state.velocity(self.a);
        let vb = state.velocity(self.b);

        let delta = pb - pa;
        let dv = vb - va;

        let d = delta.norm();
        let top = delta.dot(&dv);
        let dsq = d * d;

        if dsq == 0.0 {
            state.jd[(i, self.a * DF)] = 0.0;
            state.jd[(i, self.a * DF + 1)] = 0.0;

            state.jd[(i, self.b * DF)] = 0.0;
            state.jd[(i, self.b * DF + 1)] = 0.0;
        } else {
            // d/dt of (+-delta / d) via the quotient rule, reusing the
            // J row entries written earlier in this pass
            let jax = state.j[(i, self.a * DF)];
            let jay = state.j[(i, self.a * DF + 1)];
            let jbx = state.j[(i, self.b * DF)];
            let jby = state.j[(i, self.b * DF + 1)];

            state.jd[(i, self.a * DF)] = (-d * dv.x - top * jax) / dsq;
            state.jd[(i, self.a * DF + 1)] = (-d * dv.y - top * jay) / dsq;

            state.jd[(i, self.b * DF)] = (d * dv.x - top * jbx) / dsq;
            state.jd[(i, self.b * DF + 1)] = (d * dv.y - top * jby) / dsq;
        }
    }

    fn overlay(&self, state: &SimState) -> Option<Overlay> {
        Some(Overlay::Segment {
            a: state.position(self.a),
            b: state.position(self.b),
            kind: OverlayKind::Rod,
        })
    }
}
