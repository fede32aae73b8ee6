//! Numerical parameters for a simulation run
//!
//! `Parameters` holds the runtime settings:
//! - total simulated time and step sizing (`t_end`, `dt`, `sub_steps`),
//! - Baumgarte stabilization gains (`ks`, `kd`),
//! - gravity acceleration (`gravity`)

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64,     // total simulated time
    pub dt: f64,        // outer step size
    pub sub_steps: u32, // sub-steps per outer step
    pub ks: f64,        // Baumgarte position gain
    pub kd: f64,        // Baumgarte velocity gain
    pub gravity: f64,   // downward acceleration (screen y)
}

/// Default stabilization gains used when a scenario does not set them
pub const DEFAULT_KS: f64 = 0.1;
pub const DEFAULT_KD: f64 = 0.1;
