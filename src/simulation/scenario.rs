//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - numerical parameters (`Parameters`)
//! - simulation state (`SimState` with particles at rest)
//! - the force set (gravity plus any springs)
//! - the constraint set (pins and rods)
//!
//! The bundle owns the force and constraint objects for the whole run;
//! the state only ever borrows them during stepping. Rest lengths and rod
//! distances default to the initial particle separation, and pins target
//! the particle's initial position, matching how the editor places them.

use anyhow::{bail, Result};

use crate::configuration::config::ScenarioConfig;
use crate::simulation::constraints::{ConstraintSet, DistanceConstraint, PositionConstraint};
use crate::simulation::forces::{ForceSet, Gravity, Spring};
use crate::simulation::params::{Parameters, DEFAULT_KD, DEFAULT_KS};
use crate::simulation::states::{Particle, SimState};

/// A fully-initialized runtime scenario
pub struct Scenario {
    pub parameters: Parameters,
    pub state: SimState,
    pub forces: ForceSet,
    pub constraints: ConstraintSet,
}

impl Scenario {
    pub fn build(cfg: ScenarioConfig) -> Result<Self> {
        // Particles: validate masses up front; everything downstream
        // divides by them
        let particles: Vec<Particle> = cfg
            .particles
            .iter()
            .map(|pc| Particle {
                x: pc.x,
                y: pc.y,
                m: pc.m,
            })
            .collect();

        for (i, p) in particles.iter().enumerate() {
            if !(p.m > 0.0) || !p.m.is_finite() {
                bail!("particle {i} has non-positive mass {}", p.m);
            }
        }

        let n = particles.len();
        let check_pair = |what: &str, a: usize, b: usize| -> Result<()> {
            if a >= n || b >= n {
                bail!("{what} references particle out of range ({a}, {b}), have {n}");
            }
            if a == b {
                bail!("{what} connects particle {a} to itself");
            }
            Ok(())
        };

        let separation = |a: usize, b: usize| -> f64 {
            let dx = particles[b].x - particles[a].x;
            let dy = particles[b].y - particles[a].y;
            (dx * dx + dy * dy).sqrt()
        };

        let p_cfg = cfg.parameters;
        if p_cfg.sub_steps == 0 {
            bail!("sub_steps must be at least 1");
        }
        let parameters = Parameters {
            t_end: p_cfg.t_end,
            dt: p_cfg.dt,
            sub_steps: p_cfg.sub_steps,
            ks: p_cfg.ks.unwrap_or(DEFAULT_KS),
            kd: p_cfg.kd.unwrap_or(DEFAULT_KD),
            gravity: p_cfg.gravity,
        };

        // Forces: gravity first, then springs in scenario order
        let mut forces = ForceSet::new().with(Gravity {
            a: parameters.gravity,
        });

        for (i, s) in cfg.springs.iter().enumerate() {
            check_pair(&format!("spring {i}"), s.a, s.b)?;
            forces = forces.with(Spring {
                a: s.a,
                b: s.b,
                rest_length: s.rest_length.unwrap_or_else(|| separation(s.a, s.b)),
                k: s.k,
            });
        }

        // Constraints: pins then rods; row index == insertion order
        let mut constraints = ConstraintSet::new();

        for &p in &cfg.pins {
            if p >= n {
                bail!("pin references particle {p} out of range, have {n}");
            }
            constraints = constraints.with(PositionConstraint {
                a: p,
                x: particles[p].x,
                y: particles[p].y,
            });
        }

        for (i, r) in cfg.rods.iter().enumerate() {
            check_pair(&format!("rod {i}"), r.a, r.b)?;
            constraints = constraints.with(DistanceConstraint {
                a: r.a,
                b: r.b,
                dist: r.dist.unwrap_or_else(|| separation(r.a, r.b)),
            });
        }

        let state = SimState::new(&particles, constraints.len(), parameters.ks, parameters.kd);

        Ok(Self {
            parameters,
            state,
            forces,
            constraints,
        })
    }
}
