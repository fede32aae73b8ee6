pub mod states;
pub mod params;
pub mod forces;
pub mod constraints;
pub mod stepper;
pub mod scenario;
