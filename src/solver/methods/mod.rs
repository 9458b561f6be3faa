//! Numerical methods for the coupled flow equations
//!
//! This module contains concrete implementations of the [`Solver`](crate::solver::Solver) trait.
//!
//! # Architecture
//!
//! The separation between abstract solver interface (`solver::traits`) and concrete
//! implementations (`solver::methods`) keeps the method independent of the physics:
//! a solver only sees [`PhysicalModel::relax`](crate::physics::PhysicalModel::relax)
//! and the wall conditions of the scenario.
//!
//! # Available Methods
//!
//! - **[`PicardSolver`]**: backward Euler in time, fixed-point iteration per step
//!   - Order: first order in time
//!   - Cost: one relaxation sweep per field and iteration
//!   - Use: transient runs (`TimeEvolution`) and marching to steady state (`SteadyState`)

pub mod picard;

// Re-exports for convenience
pub use picard::PicardSolver;
