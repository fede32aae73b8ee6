pub mod linalg;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use linalg::dense::{DMat, DVec};
pub use linalg::solve::solve;

pub use simulation::states::{NVec2, Particle, SimState, DF};
pub use simulation::params::Parameters;
pub use simulation::forces::{Force, ForceSet, Gravity, Spring};
pub use simulation::constraints::{Constraint, ConstraintSet, DistanceConstraint, PositionConstraint};
pub use simulation::stepper::step;
pub use simulation::scenario::Scenario;

pub use configuration::config::{
    ParametersConfig, ParticleConfig, RodConfig, ScenarioConfig, SpringConfig,
};

pub use visualization::overlay::{collect_overlays, particle_positions, Overlay, OverlayKind};

pub use benchmark::benchmark::{bench_solve, bench_step};
