//! Numerical solvers
//!
//! This module provides traits and implementations for numerical solvers.
//! A numerical solver applies a numerical method to solve the equations
//! provided by a physical model within a specific scenario.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to solve
//!    - Physical model (equations)
//!    - Domain boundaries (wall conditions, initial state)
//!
//! 2. **Configuration** (`SolverConfiguration`) - HOW to solve
//!    - Solver type (time evolution, steady state)
//!    - Fixed-point budget (`PicardSettings`)
//!
//! 3. **Solver** (`Solver` trait) - The numerical method
//!    - Applies the numerical scheme
//!    - Returns the sampled trajectory
//!    - Independent of physics
//!
//! # Module Organization
//!
//! - **`traits`**: `Solver`, `SolverType`, `SolverConfiguration`, `SimulationResult`, `SolverError`
//! - **`boundary`**: `BoundaryCondition`, `WallBoundary`, `DomainBoundaries`
//! - **`scenario`**: `Scenario` (model + boundaries)
//! - **`methods`**: `PicardSolver`
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌─────────────────┐
//! │  ParameterSet   │
//! └────────┬────────┘
//!          │ Scenario::couette
//! ┌────────▼────────┐
//! │ Scenario        │ ← WHAT to solve
//! │ (model + walls) │
//! └────────┬────────┘
//!          │
//! ┌────────▼─────────────┐
//! │ Solver Configuration │ ← HOW to solve
//! └────────┬─────────────┘
//!          │
//! ┌────────▼────────┐
//! │ PicardSolver    │ ← The method
//! └────────┬────────┘
//!          │
//! ┌────────▼────────────┐
//! │ Simulation Result   │ ← samples + residuals
//! └─────────────────────┘
//! ```
//!
//! # Quick Start Example
//!
//! ```rust
//! use nanocouette::physics::ParameterSet;
//! use nanocouette::solver::{PicardSolver, Scenario, Solver, SolverConfiguration};
//!
//! let params = ParameterSet::baseline();
//! let scenario = Scenario::couette(&params);
//! let config = SolverConfiguration::time_evolution(2.0, 0.02, 10);
//!
//! let result = PicardSolver::new().solve(&scenario, &config)?;
//! println!("{} samples, worst residual {:.2e}", result.len(), result.max_residual());
//! # Ok::<(), nanocouette::solver::SolverError>(())
//! ```
//!
//! # Error Handling
//!
//! Solvers return [`SolverError`]:
//! - `InvalidInput`: invalid configuration or scenario (non-positive step,
//!   zero save frequency, inconsistent initial state)
//! - `MissingQuantity`: a state lacks a field the model sweeps
//!
//! Exhausting the fixed-point budget is not an error; inspect
//! [`SimulationResult::residuals`] and [`SimulationResult::capped_steps`].

// =================================================================================================
// Module Declarations
// =================================================================================================
mod boundary;
mod methods;
mod scenario;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{
    MAX_TIME_STEPS, PicardSettings, SimulationResult, Solver, SolverConfiguration, SolverError, SolverType,
    TrajectorySample,
};

pub use boundary::{BoundaryCondition, DomainBoundaries, Wall, WallBoundary};
pub use scenario::Scenario;

pub use methods::PicardSolver;
