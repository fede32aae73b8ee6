//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ParametersConfig`] – step sizing and stabilization gains
//! - [`ParticleConfig`]   – initial position and mass per particle
//! - [`SpringConfig`]     – Hookean springs between particle pairs
//! - [`RodConfig`]        – rigid distance constraints
//! - pins                 – particle indices held at their initial position
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! parameters:
//!   t_end: 10.0        # total simulated time
//!   dt: 0.016          # outer step size
//!   sub_steps: 1000    # sub-steps per outer step
//!   ks: 0.1            # Baumgarte position gain (optional)
//!   kd: 0.1            # Baumgarte velocity gain (optional)
//!   gravity: 200.0     # downward acceleration
//!
//! particles:
//!   - { x: 400.0, y: 100.0, m: 1.0 }
//!   - { x: 500.0, y: 100.0, m: 3.0 }
//!
//! springs:
//!   - { a: 0, b: 1, k: -100.0 }   # rest_length defaults to initial separation
//!
//! rods:
//!   - { a: 0, b: 1 }              # dist defaults to initial separation
//!
//! pins: [0]                        # hold particle 0 at its initial position
//! ```

use serde::Deserialize;

/// Step sizing and stabilization parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub t_end: f64,       // total simulated time
    pub dt: f64,          // outer step size
    pub sub_steps: u32,   // sub-steps per outer step
    pub ks: Option<f64>,  // Baumgarte position gain, default 0.1
    pub kd: Option<f64>,  // Baumgarte velocity gain, default 0.1
    pub gravity: f64,     // downward acceleration (screen y)
}

/// Initial state for a single particle
#[derive(Deserialize, Debug, Clone)]
pub struct ParticleConfig {
    pub x: f64, // initial x
    pub y: f64, // initial y
    pub m: f64, // mass, must be > 0
}

/// A Hookean spring between two particles.
/// The editor passes negative `k` for attracting springs.
#[derive(Deserialize, Debug, Clone)]
pub struct SpringConfig {
    pub a: usize,                 // first particle index
    pub b: usize,                 // second particle index
    pub rest_length: Option<f64>, // default: initial separation
    pub k: f64,                   // stiffness
}

/// A rigid rod holding two particles at a fixed distance
#[derive(Deserialize, Debug, Clone)]
pub struct RodConfig {
    pub a: usize,          // first particle index
    pub b: usize,          // second particle index
    pub dist: Option<f64>, // default: initial separation
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub parameters: ParametersConfig, // step sizing and gains
    pub particles: Vec<ParticleConfig>, // initial particle snapshot

    #[serde(default)]
    pub springs: Vec<SpringConfig>, // spring forces

    #[serde(default)]
    pub rods: Vec<RodConfig>, // distance constraints

    #[serde(default)]
    pub pins: Vec<usize>, // particles pinned at their initial position
}
