//! Numerical solver traits and types
//!
//! # Design Philosophy
//!
//! This module follows the same pattern as `PhysicalQuantity`:
//! - Central enum `SolverType` defines the type of numerical solution
//! - `SolverConfiguration` carries it together with the fixed-point settings
//! - `SimulationResult` holds the sampled trajectory and run diagnostics
//!
//! # Stability Guarantee
//!
//! - `Solver` trait: STABLE, will NEVER change
//! - `SolverType` enum: EXTENSIBLE (new variants can be added)

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::physics::{PhysicalQuantity, PhysicalState, WallFluxes};
use crate::solver::Scenario;

// =================================================================================================
// Errors
// =================================================================================================

/// Errors reported at the solve boundary
///
/// Non-convergence of the fixed-point iteration is not an error:
/// the last iterate is accepted and the achieved residual is recorded in
/// [`SimulationResult::residuals`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    /// Precondition violated (degenerate grid, non-positive time step, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A state lacks a field the model needs
    #[error("State has no {0} field")]
    MissingQuantity(PhysicalQuantity),
}

/// Largest number of time steps a `TimeEvolution` run may take
pub const MAX_TIME_STEPS: usize = u32::MAX as usize;

// =================================================================================================
// Central Solver Type Enumeration (Like PhysicalQuantity)
// =================================================================================================

/// Type of numerical solution method
///
/// # Examples
///
/// ```rust
/// use nanocouette::solver::SolverType;
///
/// // Transient response up to τ = 2, sampled every 10 steps
/// let transient = SolverType::TimeEvolution {
///     final_time: 2.0,
///     time_step: 0.02,
///     save_frequency: 10,
/// };
///
/// // March to the steady state
/// let steady = SolverType::SteadyState {
///     time_step: 0.05,
///     tolerance: 1e-9,
///     max_steps: 5000,
/// };
///
/// assert!(transient.validate().is_ok());
/// assert_eq!(steady.name(), "SteadyState");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SolverType {
    /// Time evolution up to a final time
    ///
    /// # Parameters
    /// - `final_time`: τ_f > 0
    /// - `time_step`: Δτ > 0
    /// - `save_frequency`: steps between recorded samples (≥ 1)
    TimeEvolution {
        final_time: f64,
        time_step: f64,
        save_frequency: usize,
    },

    /// Time marching until the state stops changing
    ///
    /// # Parameters
    /// - `time_step`: Δτ > 0
    /// - `tolerance`: max nodal change over one step that counts as steady
    /// - `max_steps`: safety limit
    SteadyState {
        time_step: f64,
        tolerance: f64,
        max_steps: usize,
    },
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::TimeEvolution { .. } => "TimeEvolution",
            SolverType::SteadyState { .. } => "SteadyState",
        }
    }

    /// Step size of either variant
    pub fn time_step(&self) -> f64 {
        match self {
            SolverType::TimeEvolution { time_step, .. } | SolverType::SteadyState { time_step, .. } => {
                *time_step
            }
        }
    }

    /// Validate that parameters are physically meaningful
    pub fn validate(&self) -> Result<(), String> {
        match self {
            SolverType::TimeEvolution { final_time, time_step, save_frequency } => {
                if !(*final_time > 0.0 && final_time.is_finite()) {
                    return Err(format!("Final time must be positive, got {}", final_time));
                }
                if !(*time_step > 0.0 && time_step.is_finite()) {
                    return Err(format!("Time step must be positive, got {}", time_step));
                }
                if *save_frequency == 0 {
                    return Err("Save frequency must be at least 1".to_string());
                }
                let steps = (final_time / time_step).round();
                if !(steps <= MAX_TIME_STEPS as f64) {
                    return Err(format!(
                        "Final time {} with time step {} needs {:e} steps, limit is {}",
                        final_time, time_step, steps, MAX_TIME_STEPS
                    ));
                }
                Ok(())
            }
            SolverType::SteadyState { time_step, tolerance, max_steps } => {
                if !(*time_step > 0.0 && time_step.is_finite()) {
                    return Err(format!("Time step must be positive, got {}", time_step));
                }
                if !(*tolerance > 0.0) {
                    return Err("Tolerance must be positive".to_string());
                }
                if *max_steps == 0 {
                    return Err("Maximum steps must be positive".to_string());
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Picard settings
// =================================================================================================

/// Budget of the fixed-point iteration inside one time step
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PicardSettings {
    /// Iteration cap per step
    pub max_iterations: usize,

    /// Max absolute nodal change (over all fields) that ends the iteration
    pub tolerance: f64,
}

impl Default for PicardSettings {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            tolerance: 1e-10,
        }
    }
}

impl PicardSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("Picard iteration budget must be at least 1".to_string());
        }
        if !(self.tolerance >= 0.0) {
            return Err(format!("Picard tolerance must be non-negative, got {}", self.tolerance));
        }
        Ok(())
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration for numerical solver
///
/// # Examples
///
/// ```rust
/// use nanocouette::solver::{PicardSettings, SolverConfiguration};
///
/// let config = SolverConfiguration::time_evolution(2.0, 0.02, 10);
/// assert!(config.validate().is_ok());
///
/// // Tighter iteration budget
/// let config = config.with_picard(PicardSettings { max_iterations: 5, tolerance: 1e-8 });
/// assert_eq!(config.picard.max_iterations, 5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverConfiguration {
    /// Type of solver and its parameters
    pub solver_type: SolverType,

    /// Fixed-point iteration budget per step
    pub picard: PicardSettings,
}

impl SolverConfiguration {
    /// Create a new configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self {
            solver_type,
            picard: PicardSettings::default(),
        }
    }

    /// Create a time evolution configuration
    pub fn time_evolution(final_time: f64, time_step: f64, save_frequency: usize) -> Self {
        Self::new(SolverType::TimeEvolution { final_time, time_step, save_frequency })
    }

    /// Reduced-cost transient run (τ_f = 2, Δτ = 0.04, every 10th step)
    ///
    /// Used by the sensitivity analysis and the optimizer.
    pub fn quick() -> Self {
        Self::time_evolution(2.0, 0.04, 10)
    }

    /// Create a steady-state configuration
    pub fn steady_state(time_step: f64, tolerance: f64, max_steps: usize) -> Self {
        Self::new(SolverType::SteadyState { time_step, tolerance, max_steps })
    }

    /// Builder: replace the fixed-point settings
    pub fn with_picard(mut self, picard: PicardSettings) -> Self {
        self.picard = picard;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.solver_type.validate()?;
        self.picard.validate()
    }
}

// =================================================================================================
// Simulation result
// =================================================================================================

/// One recorded point of the trajectory
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectorySample {
    /// Dimensionless time τ
    pub tau: f64,

    /// Fields at τ
    pub state: PhysicalState,

    /// Wall fluxes at τ
    pub fluxes: WallFluxes,
}

/// Output of one solve
///
/// Samples are ordered by time and never duplicated. `residuals` and
/// `iterations` have one entry per completed step: the last fixed-point
/// change of that step and the number of sweeps it took.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Recorded samples
    pub samples: Vec<TrajectorySample>,

    /// State after the last step
    pub final_state: PhysicalState,

    /// Achieved fixed-point residual of every step
    pub residuals: Vec<f64>,

    /// Fixed-point iterations spent on every step
    pub iterations: Vec<usize>,

    /// Steps that exhausted the iteration budget
    pub capped_steps: usize,

    /// Free-form run information
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    pub fn new(samples: Vec<TrajectorySample>, final_state: PhysicalState) -> Self {
        Self {
            samples,
            final_state,
            residuals: Vec::new(),
            iterations: Vec::new(),
            capped_steps: 0,
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample times
    pub fn time_points(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.tau).collect()
    }

    /// Time of the last sample (0 if nothing was recorded)
    pub fn final_time(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.tau)
    }

    /// Lower-wall skin friction at every sample
    pub fn skin_friction_history(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.fluxes.skin_friction_lower).collect()
    }

    /// Worst accepted fixed-point residual
    pub fn max_residual(&self) -> f64 {
        self.residuals.iter().copied().fold(0.0, f64::max)
    }
}

// =================================================================================================
// Solver trait
// =================================================================================================

/// Numerical method applied to a [`Scenario`]
pub trait Solver {
    /// Solve the scenario
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult, SolverError>;

    /// Display name
    fn name(&self) -> &str;
}

// =================================================================================================
// Tests
// =================================================================================================
