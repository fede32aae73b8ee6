//! Fixed-order solve-and-integrate step for the constrained system
//!
//! Each sub-step: accumulate forces, fill constraint rows, solve the
//! dense constraint-space system for the Lagrange multipliers, project
//! the multipliers back into the force buffer, then advance velocity and
//! position with semi-implicit Euler. Sub-stepping only shrinks the
//! effective dt for stability; the integration order is unchanged.

use super::constraints::ConstraintSet;
use super::forces::ForceSet;
use super::states::SimState;
use crate::linalg::solve::solve;

/// Advance the system by `dt`, split into `sub_steps` equal sub-steps.
///
/// Runs to completion before returning; force and constraint objects are
/// only read. `state.total_error` reflects the final sub-step's summed
/// constraint violation.
pub fn step(
    state: &mut SimState,
    forces: &ForceSet,
    constraints: &ConstraintSet,
    dt: f64,
    sub_steps: u32,
) {
    let h = dt / sub_steps as f64;

    for _ in 0..sub_steps {
        // External and internal forces into the shared buffer
        forces.apply_all(state);

        // Constraint rows: c, cd, j, jd against current pos/vel
        constraints.fill_rows(state);

        if !constraints.is_empty() {
            // (J W Jt) * lambda = -Jd qd - J W Q - ks C - kd Cd
            let jt = state.j.transposed();
            let jw = &state.j * &state.w;

            let a = &jw * &jt;

            let jd_qd = &state.jd * &state.vel;
            let jwq = &jw * &state.force;

            let mut b = jd_qd * -1.0;
            b += &(jwq * -1.0);
            b += &(state.c.clone() * -state.ks);
            b += &(state.cd.clone() * -state.kd);

            // Singular systems yield the zero multiplier vector: the
            // degenerate constraints apply no force this sub-step
            let lambda = solve(a, b);

            // Qh = Jt * lambda, the constraint force
            let qh = &jt * &lambda;
            state.force += &qh;
        }

        // Semi-implicit Euler: velocity first, then position
        let acl = state.force.clone() * &state.mass_inv;
        state.vel += &(acl * h);
        state.pos += &(state.vel.clone() * h);

        state.total_error = 0.0;
        for i in 0..state.nc {
            state.total_error += state.c[i].abs();
        }
    }
}
