//! Hand-rolled timing benchmarks for the solver and the full step

use std::time::Instant;

use crate::linalg::dense::{DMat, DVec};
use crate::linalg::solve::solve;
use crate::simulation::constraints::{ConstraintSet, DistanceConstraint, PositionConstraint};
use crate::simulation::forces::{ForceSet, Gravity};
use crate::simulation::states::{Particle, SimState};
use crate::simulation::stepper::step;

/// Time the pivoted solve over growing system sizes
pub fn bench_solve() {
    let ns = [8, 16, 32, 64, 128, 256];

    for n in ns {
        // Deterministic, diagonally dominant system; no rand needed
        let mut a = DMat::new(n, n);
        let mut b = DVec::new(n);

        for i in 0..n {
            for j in 0..n {
                let v = ((i * 31 + j * 17) as f64 * 0.13).sin();
                a[(i, j)] = v;
            }
            a[(i, i)] += n as f64;
            b[i] = (i as f64 * 0.37).cos();
        }

        // Warm up
        let _ = solve(a.clone(), b.clone());

        let t0 = Instant::now();
        let x = solve(a.clone(), b.clone());
        let dt = t0.elapsed().as_secs_f64();

        println!("n = {n:4}, solve = {dt:10.6} s, x[0] = {:+.6}", x[0]);
    }
}

/// Time full pipeline steps on a pinned chain of rods under gravity
pub fn bench_step() {
    let ns = [4, 8, 16, 32, 64];

    for n in ns {
        let particles: Vec<Particle> = (0..n)
            .map(|i| Particle {
                x: 100.0 + 30.0 * i as f64,
                y: 100.0,
                m: 1.0,
            })
            .collect();

        let mut constraints = ConstraintSet::new().with(PositionConstraint {
            a: 0,
            x: particles[0].x,
            y: particles[0].y,
        });
        for i in 0..(n - 1) {
            constraints = constraints.with(DistanceConstraint {
                a: i,
                b: i + 1,
                dist: 30.0,
            });
        }

        let forces = ForceSet::new().with(Gravity { a: 200.0 });

        let mut state = SimState::new(&particles, constraints.len(), 0.1, 0.1);

        // Warm up
        step(&mut state, &forces, &constraints, 0.016, 10);

        let t0 = Instant::now();
        step(&mut state, &forces, &constraints, 0.016, 100);
        let dt = t0.elapsed().as_secs_f64();

        println!(
            "n = {n:3}, nc = {:3}, 100 sub-steps = {dt:10.6} s, err = {:.3e}",
            state.nc, state.total_error
        );
    }
}
