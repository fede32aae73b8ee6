use cdsim::simulation::constraints::{ConstraintSet, DistanceConstraint, PositionConstraint};
use cdsim::simulation::forces::{Force, ForceSet, Gravity, Spring};
use cdsim::simulation::states::{Particle, SimState, DF};
use cdsim::simulation::stepper::step;
use cdsim::{solve, DMat, DVec, Scenario, ScenarioConfig};

/// Build a DMat from a nested array, row by row
fn mat_from(rows: &[&[f64]]) -> DMat {
    let mut m = DMat::new(rows.len(), rows[0].len());
    for (i, row) in rows.iter().enumerate() {
        for (j, v) in row.iter().enumerate() {
            m[(i, j)] = *v;
        }
    }
    m
}

/// A single unit-mass particle at rest
fn single_particle(x: f64, y: f64) -> Vec<Particle> {
    vec![Particle { x, y, m: 1.0 }]
}

/// Default stabilization gains used across the tests
const KS: f64 = 0.1;
const KD: f64 = 0.1;

// ==================================================================================
// Dense container algebra
// ==================================================================================

#[test]
fn vector_addition_is_associative() {
    let a = DVec::from_slice(&[1.0, -2.5, 3.0]);
    let b = DVec::from_slice(&[0.5, 4.0, -1.0]);
    let c = DVec::from_slice(&[2.0, 2.0, 2.0]);

    let left = (a.clone() + &b) + &c;
    let right = a + &(b + &c);

    for i in 0..3 {
        assert!((left[i] - right[i]).abs() < 1e-12);
    }
}

#[test]
fn matrix_vector_product_distributes() {
    let a = mat_from(&[&[1.0, 2.0], &[3.0, -1.0]]);
    let v = DVec::from_slice(&[0.5, -2.0]);
    let w = DVec::from_slice(&[3.0, 1.5]);

    let left = &a * &(v.clone() + &w);
    let right = (&a * &v) + &(&a * &w);

    for i in 0..2 {
        assert!((left[i] - right[i]).abs() < 1e-12);
    }
}

#[test]
fn product_transpose_identity() {
    // (A * B)^T == B^T * A^T
    let a = mat_from(&[&[1.0, 2.0, 0.0], &[-1.0, 3.0, 4.0]]);
    let b = mat_from(&[&[2.0, 1.0], &[0.0, -1.0], &[1.0, 5.0]]);

    let left = (&a * &b).transposed();
    let right = &b.transposed() * &a.transposed();

    assert_eq!(left.rows(), right.rows());
    assert_eq!(left.cols(), right.cols());
    for i in 0..left.rows() {
        for j in 0..left.cols() {
            assert!((left[(i, j)] - right[(i, j)]).abs() < 1e-12);
        }
    }
}

// ==================================================================================
// Linear solve
// ==================================================================================

#[test]
fn solve_round_trips_well_conditioned_system() {
    let a = mat_from(&[
        &[4.0, 1.0, 0.0, 0.5],
        &[1.0, 5.0, 1.0, 0.0],
        &[0.0, 1.0, 6.0, 2.0],
        &[0.5, 0.0, 2.0, 7.0],
    ]);
    let b = DVec::from_slice(&[1.0, -2.0, 3.0, 0.25]);

    let x = solve(a.clone(), b.clone());
    let back = &a * &x;

    for i in 0..4 {
        let scale = b[i].abs().max(1.0);
        assert!(
            (back[i] - b[i]).abs() / scale < 1e-9,
            "component {i}: {} vs {}",
            back[i],
            b[i]
        );
    }
}

#[test]
fn solve_all_zero_matrix_is_degenerate_not_fatal() {
    let a = DMat::new(4, 4);
    let b = DVec::from_slice(&[1.0, 1.0, 1.0, 1.0]);

    let x = solve(a, b);
    assert_eq!(x.as_slice(), &[0.0; 4]);
}

// ==================================================================================
// Forces
// ==================================================================================

#[test]
fn gravity_force_scales_with_mass() {
    let particles = vec![
        Particle { x: 0.0, y: 0.0, m: 1.0 },
        Particle { x: 10.0, y: 0.0, m: 3.0 },
    ];
    let mut state = SimState::new(&particles, 0, KS, KD);

    let forces = ForceSet::new().with(Gravity { a: 200.0 });
    forces.apply_all(&mut state);

    // y components get m * a, x components stay zero
    assert_eq!(state.force[0], 0.0);
    assert!((state.force[1] - 200.0).abs() < 1e-12);
    assert_eq!(state.force[2], 0.0);
    assert!((state.force[3] - 600.0).abs() < 1e-12);
}

#[test]
fn spring_with_negative_k_pulls_stretched_pair_together() {
    let particles = vec![
        Particle { x: 0.0, y: 0.0, m: 1.0 },
        Particle { x: 20.0, y: 0.0, m: 1.0 },
    ];
    let mut state = SimState::new(&particles, 0, KS, KD);

    // Rest length 10, currently stretched to 20; editor-style negative k
    let spring = Spring { a: 0, b: 1, rest_length: 10.0, k: -50.0 };
    spring.apply(&mut state);

    // Particle 0 pulled toward +x, particle 1 toward -x, equal magnitude
    assert!(state.force[0] > 0.0);
    assert!(state.force[2] < 0.0);
    assert!((state.force[0] + state.force[2]).abs() < 1e-12);
    assert_eq!(state.force[1], 0.0);
    assert_eq!(state.force[3], 0.0);
}

#[test]
fn spring_between_coincident_particles_applies_no_force() {
    let particles = vec![
        Particle { x: 5.0, y: 5.0, m: 1.0 },
        Particle { x: 5.0, y: 5.0, m: 1.0 },
    ];
    let mut state = SimState::new(&particles, 0, KS, KD);

    let spring = Spring { a: 0, b: 1, rest_length: 10.0, k: -50.0 };
    spring.apply(&mut state);

    for k in 0..2 * DF {
        assert_eq!(state.force[k], 0.0);
    }
}

// ==================================================================================
// Stepper: unconstrained motion
// ==================================================================================

#[test]
fn free_fall_matches_projectile_motion() {
    let g = 10.0;
    let particles = single_particle(0.0, 0.0);
    let mut state = SimState::new(&particles, 0, KS, KD);

    let forces = ForceSet::new().with(Gravity { a: g });
    let constraints = ConstraintSet::new();

    let dt = 1.0;
    let sub_steps = 1000;
    step(&mut state, &forces, &constraints, dt, sub_steps);

    // Semi-implicit Euler: velocity is exact, v = g * t
    assert!((state.vel[1] - g * dt).abs() < 1e-9);
    assert_eq!(state.vel[0], 0.0);

    // Position approaches g t^2 / 2 as h shrinks; first-order error is
    // g h t / 2 = 0.005 here
    let expected = 0.5 * g * dt * dt;
    assert!(
        (state.pos[1] - expected).abs() < 0.01,
        "y = {}, expected ~{expected}",
        state.pos[1]
    );
    assert_eq!(state.pos[0], 0.0);
}

// ==================================================================================
// Constraints under gravity
// ==================================================================================

#[test]
fn rod_pendulum_holds_rest_distance() {
    // Particle 0 pinned, particle 1 hangs off it on a horizontal rod:
    // the pair swings, the rod length must hold
    let particles = vec![
        Particle { x: 400.0, y: 100.0, m: 1.0 },
        Particle { x: 450.0, y: 100.0, m: 1.0 },
    ];
    let rest = 50.0;

    let constraints = ConstraintSet::new()
        .with(PositionConstraint { a: 0, x: 400.0, y: 100.0 })
        .with(DistanceConstraint { a: 0, b: 1, dist: rest });
    let forces = ForceSet::new().with(Gravity { a: 200.0 });

    let mut state = SimState::new(&particles, constraints.len(), KS, KD);

    for _ in 0..60 {
        step(&mut state, &forces, &constraints, 0.016, 2000);

        let d = (state.position(1) - state.position(0)).norm();
        assert!(
            (d - rest).abs() < 1.0,
            "rod length drifted to {d} (rest {rest})"
        );
        assert!(state.total_error.is_finite());
        assert!(state.total_error < 2.0, "total error {}", state.total_error);
    }

    // The free end actually moved (it is swinging, not frozen)
    let p1 = state.position(1);
    assert!((p1 - cdsim::NVec2::new(450.0, 100.0)).norm() > 1.0);
}

#[test]
fn pin_holds_particle_near_target_under_gravity() {
    let particles = single_particle(300.0, 200.0);

    let constraints = ConstraintSet::new().with(PositionConstraint {
        a: 0,
        x: 300.0,
        y: 200.0,
    });
    let forces = ForceSet::new().with(Gravity { a: 200.0 });

    let mut state = SimState::new(&particles, constraints.len(), KS, KD);

    for _ in 0..60 {
        step(&mut state, &forces, &constraints, 0.016, 2000);

        let p = state.position(0);
        let off = (p - cdsim::NVec2::new(300.0, 200.0)).norm();
        assert!(off < 1.0, "pinned particle drifted {off} from target");
    }
}

#[test]
fn coincident_pins_degenerate_but_stable() {
    // Two identical pins on one particle make J W Jt singular; the solver
    // must fall back to zero multipliers and keep stepping
    let particles = single_particle(100.0, 100.0);

    let constraints = ConstraintSet::new()
        .with(PositionConstraint { a: 0, x: 100.0, y: 100.0 })
        .with(PositionConstraint { a: 0, x: 100.0, y: 100.0 });
    let forces = ForceSet::new().with(Gravity { a: 200.0 });

    let mut state = SimState::new(&particles, constraints.len(), KS, KD);

    for _ in 0..10 {
        step(&mut state, &forces, &constraints, 0.016, 100);

        assert!(state.pos[0].is_finite());
        assert!(state.pos[1].is_finite());
        assert!(state.vel[1].is_finite());
        assert!(state.total_error.is_finite());
    }

    // Bounded over this run: at worst free fall for 0.16 s at a = 200
    assert!((state.pos[1] - 100.0).abs() < 10.0);
}

// ==================================================================================
// Scenario configuration
// ==================================================================================

fn parse_scenario(yaml: &str) -> ScenarioConfig {
    serde_yaml::from_str(yaml).expect("scenario YAML should parse")
}

#[test]
fn scenario_defaults_rest_lengths_from_initial_geometry() {
    let cfg = parse_scenario(
        r#"
parameters: { t_end: 1.0, dt: 0.016, sub_steps: 100, gravity: 200.0 }
particles:
  - { x: 0.0, y: 0.0, m: 1.0 }
  - { x: 30.0, y: 40.0, m: 2.0 }
rods:
  - { a: 0, b: 1 }
pins: [0]
"#,
    );

    let scenario = Scenario::build(cfg).expect("valid scenario");
    assert_eq!(scenario.constraints.len(), 2); // pin + rod
    assert_eq!(scenario.state.nc, 2);
    assert_eq!(scenario.parameters.ks, 0.1);

    // Stepping from the exactly-satisfied initial geometry stays tame
    let Scenario {
        parameters,
        mut state,
        forces,
        constraints,
    } = scenario;
    step(&mut state, &forces, &constraints, parameters.dt, parameters.sub_steps);
    assert!(state.total_error < 1.0);
}

#[test]
fn scenario_rejects_out_of_range_indices() {
    let cfg = parse_scenario(
        r#"
parameters: { t_end: 1.0, dt: 0.016, sub_steps: 100, gravity: 200.0 }
particles:
  - { x: 0.0, y: 0.0, m: 1.0 }
rods:
  - { a: 0, b: 5 }
"#,
    );
    assert!(Scenario::build(cfg).is_err());
}

#[test]
fn scenario_rejects_non_positive_mass() {
    let cfg = parse_scenario(
        r#"
parameters: { t_end: 1.0, dt: 0.016, sub_steps: 100, gravity: 200.0 }
particles:
  - { x: 0.0, y: 0.0, m: 0.0 }
"#,
    );
    assert!(Scenario::build(cfg).is_err());
}

// ==================================================================================
// Renderer-facing surface
// ==================================================================================

#[test]
fn overlays_expose_connectors_and_halos() {
    use cdsim::{collect_overlays, particle_positions, Overlay, OverlayKind};

    let particles = vec![
        Particle { x: 0.0, y: 0.0, m: 1.0 },
        Particle { x: 10.0, y: 0.0, m: 1.0 },
    ];

    let forces = ForceSet::new()
        .with(Gravity { a: 200.0 })
        .with(Spring { a: 0, b: 1, rest_length: 10.0, k: -15.0 });
    let constraints = ConstraintSet::new()
        .with(PositionConstraint { a: 0, x: 0.0, y: 0.0 })
        .with(DistanceConstraint { a: 0, b: 1, dist: 10.0 });

    let state = SimState::new(&particles, constraints.len(), KS, KD);

    let overlays = collect_overlays(&state, &forces, &constraints);
    // Gravity draws nothing; spring, pin, and rod each contribute one
    assert_eq!(overlays.len(), 3);

    let springs = overlays
        .iter()
        .filter(|o| matches!(o, Overlay::Segment { kind: OverlayKind::Spring, .. }))
        .count();
    let rods = overlays
        .iter()
        .filter(|o| matches!(o, Overlay::Segment { kind: OverlayKind::Rod, .. }))
        .count();
    let halos = overlays.iter().filter(|o| matches!(o, Overlay::Halo { .. })).count();
    assert_eq!((springs, rods, halos), (1, 1, 1));

    assert_eq!(particle_positions(&state).len(), 2);
}
