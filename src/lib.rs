//! nanocouette: Transient MHD Nanofluid Couette Flow
//!
//! Implicit finite-difference simulation of an electrically conducting
//! nanofluid sheared between a fixed plate and an impulsively started plate
//! under a transverse magnetic field, with viscous and Joule heating.
//!
//! # Architecture
//!
//! nanocouette is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define the discretized equations (what to solve)
//!    - Numerical solvers provide the time marching (how to solve)
//!
//! 2. **Post-processing as a consumer of results**
//!    - Diagnostics, sensitivity and optimization only see solve outputs
//!
//! ```text
//!   ParameterSet ─► Scenario ─► PicardSolver ─► SimulationResult
//!                                                     │
//!                          MetricsRecord, energy ◄────┤ analysis
//!                                       CSV file ◄────┘ output
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use nanocouette::prelude::*;
//!
//! # fn main() -> Result<(), SolverError> {
//! // 1. Nanofluid and dimensionless groups
//! let mixture = MixtureProperties::compute(Particle::Copper, 0.02).unwrap();
//! let params = ParameterSet::baseline().with_nanofluid(&mixture);
//!
//! // 2. Advisory checks never block the solve
//! let report = validate(&params);
//! assert!(report.is_valid());
//!
//! // 3. Solve and post-process
//! let solution = solve(&params, &SolverConfiguration::time_evolution(2.0, 0.02, 10))?;
//!
//! println!("Cf = {:.4}, Nu = {:.4}", solution.metrics.cf_final, solution.metrics.nu_final);
//! println!("Response: {}", solution.metrics.damping);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Parameters, nanofluid properties, grid, validation
//! - [`models`]: The MHD Couette flow model
//! - [`solver`]: Backward Euler / Picard time marching
//! - [`analysis`]: Diagnostics, surrogate, sensitivity, genetic optimizer
//! - [`output`]: CSV export
//!
//! # Features
//!
//! - `parallel` (default): sensitivity runs and optimizer populations are
//!   evaluated with rayon

// Core modules
pub mod physics;

pub mod models;
pub mod solver;

pub mod analysis;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use nanocouette::prelude::*;
    //! ```
    pub use crate::analysis::{DampingClass, MetricsRecord, Solution, quick_solve, solve};
    pub use crate::models::{InitialProfile, MhdCouetteFlow};
    pub use crate::physics::{
        MixtureProperties, Parameter, ParameterSet, Particle, PhysicalModel, PhysicalQuantity, PhysicalState,
        ValidationReport, validate,
    };
    pub use crate::solver::{
        PicardSolver, Scenario, SimulationResult, Solver, SolverConfiguration, SolverError, SolverType,
    };
}
