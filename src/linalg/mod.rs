pub mod dense;
pub mod solve;
