//! Simulation dynamics: integration, the contact solver and friction.

pub mod friction;
pub mod integrator;
pub mod solver;

pub use integrator::Integrator;
pub use solver::{ContactSolver, SolverStepMetrics};
