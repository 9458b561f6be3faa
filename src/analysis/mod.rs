//! Solve operations and everything built on top of them
//!
//! # Operations
//!
//! - [`solve`]: full transient solve + diagnostics of one [`ParameterSet`]
//! - [`quick_solve`]: reduced-cost solve returning only the [`MetricsRecord`]
//!
//! # Consumers
//!
//! - [`surrogate`]: closed-form estimates, never solves
//! - [`sensitivity`]: finite-difference elasticities over quick solves
//! - [`optimizer`]: genetic search with a quick solve as fitness
//!
//! ```text
//! ParameterSet ──► solve ──► Solution { result, metrics, energy }
//!       │
//!       ├────────► quick_solve ──► MetricsRecord ◄── sensitivity / optimizer
//!       │
//!       └────────► surrogate::estimate
//! ```

pub mod diagnostics;
pub mod optimizer;
pub mod sensitivity;
pub mod surrogate;

pub use diagnostics::{DampingClass, EnergySample, EntropyProfile, MetricsRecord};

use log::debug;

use crate::models::InitialProfile;
use crate::physics::ParameterSet;
use crate::solver::{PicardSolver, Scenario, SimulationResult, Solver, SolverConfiguration, SolverError};

/// Trajectory and derived quantities of one solve
#[derive(Debug, Clone)]
pub struct Solution {
    pub result: SimulationResult,
    pub metrics: MetricsRecord,
    /// Energy integrals, one per sample
    pub energy: Vec<EnergySample>,
}

/// Solve a parameter set and post-process the trajectory
///
/// Starts from the linear Couette profile.
///
/// # Errors
///
/// [`SolverError::InvalidInput`] when N < 1, Pr ≤ 0, a parameter is not
/// finite, or the configuration is invalid (τ_f ≤ 0, Δτ ≤ 0, saveFreq = 0).
///
/// # Example
///
/// ```rust
/// use nanocouette::analysis::solve;
/// use nanocouette::physics::ParameterSet;
/// use nanocouette::solver::SolverConfiguration;
///
/// let solution = solve(
///     &ParameterSet::baseline(),
///     &SolverConfiguration::time_evolution(1.0, 0.02, 10),
/// )?;
///
/// assert_eq!(solution.energy.len(), solution.result.len());
/// assert!(solution.metrics.cf_final > 0.0);
/// # Ok::<(), nanocouette::solver::SolverError>(())
/// ```
pub fn solve(params: &ParameterSet, config: &SolverConfiguration) -> Result<Solution, SolverError> {
    solve_with_profile(params, config, InitialProfile::default())
}

/// [`solve`] from a chosen initial velocity profile
pub fn solve_with_profile(
    params: &ParameterSet,
    config: &SolverConfiguration,
    profile: InitialProfile,
) -> Result<Solution, SolverError> {
    params.ensure_solvable().map_err(SolverError::InvalidInput)?;
    config.validate().map_err(SolverError::InvalidInput)?;

    let scenario = Scenario::couette_with_profile(params, profile);
    let result = PicardSolver::new().solve(&scenario, config)?;

    let metrics = diagnostics::metrics(params, &result)?;
    let energy = diagnostics::energy_history(params, &result)?;

    debug!(
        "Ha={} Re={} λ={}: Cf={:.4} Nu={:.4} ({})",
        params.hartmann, params.reynolds, params.slip, metrics.cf_final, metrics.nu_final, metrics.damping
    );

    Ok(Solution { result, metrics, energy })
}

/// Reduced-cost solve (τ_f = 2, Δτ = 0.04, every 10th step)
///
/// Used by [`sensitivity`] and [`optimizer`]; returns the metrics only.
pub fn quick_solve(params: &ParameterSet) -> Result<MetricsRecord, SolverError> {
    params.ensure_solvable().map_err(SolverError::InvalidInput)?;

    let scenario = Scenario::couette(params);
    let result = PicardSolver::new().solve(&scenario, &SolverConfiguration::quick())?;
    diagnostics::metrics(params, &result)
}
