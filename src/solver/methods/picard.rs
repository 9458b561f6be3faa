//! Backward Euler with fixed-point (Picard) iteration
//!
//! # Mathematical Background
//!
//! Each step advances the coupled fields from τ_n to τ_{n+1} = τ_n + Δτ by
//! solving the implicit system
//!
//! ```text
//! M (y_{n+1} − y_n) / Δτ = F(y_{n+1})
//! ```
//!
//! with a fixed-point iteration. One iteration sweeps every coupled field in
//! the order given by the model:
//!
//! 1. the model relaxes the interior nodes (Jacobi: neighbours from the
//!    previous iterate),
//! 2. the wall conditions overwrite the two boundary nodes,
//! 3. the updated field replaces the old one in the working iterate, so the
//!    next field in the sweep already sees it.
//!
//! The iteration stops when the largest nodal change over all fields drops
//! below the tolerance or when the budget is spent. An exhausted budget is
//! not an error: the last iterate is accepted and its residual recorded.
//!
//! # Characteristics
//!
//! - **Order**: first order in time, second order in space (interior)
//! - **Stability**: unconditional for the linear diffusion part
//! - **Cost**: O(points × iterations) per step
//!
//! # Example
//!
//! ```rust
//! use nanocouette::physics::ParameterSet;
//! use nanocouette::solver::{PicardSolver, Scenario, Solver, SolverConfiguration};
//!
//! let scenario = Scenario::couette(&ParameterSet::baseline());
//! let config = SolverConfiguration::time_evolution(1.0, 0.02, 10);
//!
//! let result = PicardSolver::new().solve(&scenario, &config).unwrap();
//! assert_eq!(result.final_time(), 1.0);
//! ```

use log::debug;

use crate::physics::PhysicalState;
use crate::solver::{
    PicardSettings, Scenario, SimulationResult, Solver, SolverConfiguration, SolverError, SolverType,
    TrajectorySample,
};

// =================================================================================================
// Picard Solver
// =================================================================================================

/// Implicit time-stepping solver with fixed-point iteration
#[derive(Debug, Clone, Copy, Default)]
pub struct PicardSolver;

/// Outcome of one implicit step
struct StepOutcome {
    state: PhysicalState,
    residual: f64,
    iterations: usize,
}

impl PicardSolver {
    /// Create a new solver
    ///
    /// # Example
    ///
    /// ```rust
    /// use nanocouette::solver::{PicardSolver, Solver};
    ///
    /// let solver = PicardSolver::new();
    /// assert_eq!(solver.name(), "Backward Euler / Picard");
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Advance one step of size `dt` from `previous`
    fn step(
        scenario: &Scenario,
        previous: &PhysicalState,
        dt: f64,
        picard: &PicardSettings,
    ) -> Result<StepOutcome, SolverError> {
        let model = &scenario.model;
        let h = model.spacing();
        let quantities = model.coupled_quantities();

        let mut iterate = previous.clone();
        let mut residual = f64::INFINITY;
        let mut iterations = 0;

        while iterations < picard.max_iterations {
            let mut next = iterate.clone();
            let mut change: f64 = 0.0;

            for &quantity in &quantities {
                let mut field = model
                    .relax(quantity, previous, &next, dt)
                    .ok_or(SolverError::MissingQuantity(quantity))?;
                scenario.conditions.apply(quantity, &mut field, h);

                let current = next.get(quantity).ok_or(SolverError::MissingQuantity(quantity))?;
                change = field
                    .iter()
                    .zip(current.iter())
                    .map(|(a, b)| (a - b).abs())
                    .fold(change, f64::max);

                next.set(quantity, field);
            }

            iterate = next;
            residual = change;
            iterations += 1;

            if residual < picard.tolerance {
                break;
            }
        }

        Ok(StepOutcome { state: iterate, residual, iterations })
    }

    fn sample(scenario: &Scenario, mut state: PhysicalState, tau: f64) -> Result<TrajectorySample, SolverError> {
        state.set_metadata("time".to_string(), tau);
        let fluxes = scenario.model.wall_fluxes(&state).ok_or_else(|| {
            SolverError::InvalidInput(format!("{} cannot evaluate wall fluxes", scenario.get_model_name()))
        })?;
        Ok(TrajectorySample { tau, state, fluxes })
    }

    fn time_evolution(
        &self,
        scenario: &Scenario,
        initial: PhysicalState,
        final_time: f64,
        dt: f64,
        save_frequency: usize,
        picard: &PicardSettings,
    ) -> Result<SimulationResult, SolverError> {
        // ====== Step 2: Setup ======

        let steps = ((final_time / dt).round() as usize).max(1);
        let mut state = initial;
        let mut samples = Vec::new();
        let mut residuals = Vec::new();
        let mut iterations = Vec::new();
        let mut capped_steps = 0;

        // ====== Step 3: Time Integration ======

        for step in 1..=steps {
            let outcome = Self::step(scenario, &state, dt, picard)?;
            if outcome.residual >= picard.tolerance {
                capped_steps += 1;
            }
            residuals.push(outcome.residual);
            iterations.push(outcome.iterations);
            state = outcome.state;

            // Time from the index, not accumulated
            let tau = step as f64 * dt;
            state.set_metadata("time".to_string(), tau);

            if step == 1 || step % save_frequency == 0 || step == steps {
                samples.push(Self::sample(scenario, state.clone(), tau)?);
            }
        }

        if capped_steps > 0 {
            debug!(
                "{}: {} of {} steps hit the {}-iteration cap (worst residual {:.3e})",
                scenario.get_model_name(),
                capped_steps,
                steps,
                picard.max_iterations,
                residuals.iter().copied().fold(0.0, f64::max)
            );
        }

        // ====== Step 4: Build Result ======

        let mut result = SimulationResult::new(samples, state);
        result.residuals = residuals;
        result.iterations = iterations;
        result.capped_steps = capped_steps;

        result.add_metadata("time steps", &steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("final time", &(steps as f64 * dt).to_string());

        Ok(result)
    }

    fn steady_state(
        &self,
        scenario: &Scenario,
        initial: PhysicalState,
        dt: f64,
        tolerance: f64,
        max_steps: usize,
        picard: &PicardSettings,
    ) -> Result<SimulationResult, SolverError> {
        let mut state = initial;
        let mut residuals = Vec::new();
        let mut iterations = Vec::new();
        let mut capped_steps = 0;
        let mut steps = 0;
        let mut change = f64::INFINITY;

        while steps < max_steps && change >= tolerance {
            let outcome = Self::step(scenario, &state, dt, picard)?;
            if outcome.residual >= picard.tolerance {
                capped_steps += 1;
            }
            residuals.push(outcome.residual);
            iterations.push(outcome.iterations);

            change = outcome.state.max_abs_difference(&state);
            state = outcome.state;
            steps += 1;
        }

        if change >= tolerance {
            debug!(
                "{}: no steady state after {} steps (last change {:.3e})",
                scenario.get_model_name(),
                steps,
                change
            );
        }

        let tau = steps as f64 * dt;
        state.set_metadata("time".to_string(), tau);
        let terminal = Self::sample(scenario, state.clone(), tau)?;

        let mut result = SimulationResult::new(vec![terminal], state);
        result.residuals = residuals;
        result.iterations = iterations;
        result.capped_steps = capped_steps;

        result.add_metadata("time steps", &steps.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("final time", &tau.to_string());
        result.add_metadata("steady change", &change.to_string());

        Ok(result)
    }
}

impl Solver for PicardSolver {
    fn solve(&self, scenario: &Scenario, config: &SolverConfiguration) -> Result<SimulationResult, SolverError> {
        // ====== Step 1: Validation ======

        config.validate().map_err(SolverError::InvalidInput)?;
        scenario.validate().map_err(SolverError::InvalidInput)?;

        let initial = scenario
            .conditions
            .initial_condition()
            .cloned()
            .ok_or_else(|| SolverError::InvalidInput("No initial condition found in domain boundaries".to_string()))?;

        debug!(
            "{} on {} ({} points, {})",
            self.name(),
            scenario.get_model_name(),
            scenario.model.points(),
            config.solver_type.name()
        );

        let mut result = match config.solver_type {
            SolverType::TimeEvolution { final_time, time_step, save_frequency } => self.time_evolution(
                scenario,
                initial,
                final_time,
                time_step,
                save_frequency,
                &config.picard,
            )?,
            SolverType::SteadyState { time_step, tolerance, max_steps } => {
                self.steady_state(scenario, initial, time_step, tolerance, max_steps, &config.picard)?
            }
        };

        result.add_metadata("solver", self.name());
        result.add_metadata("model", scenario.get_model_name());

        debug!(
            "{} finished: {} samples, max residual {:.3e}",
            self.name(),
            result.len(),
            result.max_residual()
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        "Backward Euler / Picard"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{ParameterSet, PhysicalModel, PhysicalQuantity, WallFluxes};
    use crate::solver::{BoundaryCondition, DomainBoundaries, WallBoundary};
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    // ====== Mock Models for Testing ======

    /// Pure diffusion u_t = u_xx, one field
    struct Diffusion {
        points: usize,
    }

    impl PhysicalModel for Diffusion {
        fn points(&self) -> usize {
            self.points
        }

        fn coupled_quantities(&self) -> Vec<PhysicalQuantity> {
            vec![PhysicalQuantity::Custom("u")]
        }

        fn relax(
            &self,
            quantity: PhysicalQuantity,
            previous: &PhysicalState,
            iterate: &PhysicalState,
            dt: f64,
        ) -> Option<DVector<f64>> {
            let old = previous.get(quantity)?;
            let u = iterate.get(quantity)?;
            let h = self.spacing();
            let coupling = 1.0 / (h * h);
            let diag = 2.0 * coupling + 1.0 / dt;

            let mut next = u.clone();
            for i in 1..self.points - 1 {
                next[i] = (coupling * (u[i - 1] + u[i + 1]) + old[i] / dt) / diag;
            }
            Some(next)
        }

        fn wall_fluxes(&self, state: &PhysicalState) -> Option<WallFluxes> {
            let u = state.get(PhysicalQuantity::Custom("u"))?;
            let h = self.spacing();
            Some(WallFluxes {
                skin_friction_lower: (u[1] - u[0]) / h,
                ..Default::default()
            })
        }

        fn setup_initial_state(&self) -> PhysicalState {
            PhysicalState::new(PhysicalQuantity::Custom("u"), DVector::zeros(self.points))
        }

        fn name(&self) -> &str {
            "Diffusion"
        }
    }

    fn diffusion_scenario(points: usize) -> Scenario {
        let model = Diffusion { points };
        let u = PhysicalQuantity::Custom("u");
        let initial = model.setup_initial_state();
        Scenario::new(
            Box::new(model),
            DomainBoundaries::new(
                WallBoundary::new().with(u, BoundaryCondition::Dirichlet(0.0)),
                WallBoundary::new().with(u, BoundaryCondition::Dirichlet(1.0)),
                initial,
            ),
        )
    }

    #[test]
    fn test_sampling_schedule() {
        let scenario = diffusion_scenario(11);
        let config = SolverConfiguration::time_evolution(1.0, 0.1, 4);
        let result = PicardSolver::new().solve(&scenario, &config).unwrap();

        // steps 1, 4, 8 and the last (10)
        let times = result.time_points();
        assert_eq!(times.len(), 4);
        assert_relative_eq!(times[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(times[1], 0.4, epsilon = 1e-12);
        assert_relative_eq!(times[2], 0.8, epsilon = 1e-12);
        assert_relative_eq!(times[3], 1.0, epsilon = 1e-12);
        assert_eq!(result.residuals.len(), 10);
    }

    #[test]
    fn test_last_step_is_not_duplicated() {
        let scenario = diffusion_scenario(11);
        let config = SolverConfiguration::time_evolution(1.0, 0.1, 5);
        let result = PicardSolver::new().solve(&scenario, &config).unwrap();

        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_short_horizon_takes_one_step() {
        let scenario = diffusion_scenario(11);
        let config = SolverConfiguration::time_evolution(0.01, 0.1, 1);
        let result = PicardSolver::new().solve(&scenario, &config).unwrap();

        assert_eq!(result.residuals.len(), 1);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_steady_diffusion_is_linear() {
        let scenario = diffusion_scenario(11);
        let config = SolverConfiguration::steady_state(0.5, 1e-12, 20_000)
            .with_picard(PicardSettings { max_iterations: 200, tolerance: 1e-13 });
        let result = PicardSolver::new().solve(&scenario, &config).unwrap();

        let u = result.final_state.get(PhysicalQuantity::Custom("u")).unwrap();
        for (i, value) in u.iter().enumerate() {
            assert_relative_eq!(*value, i as f64 / 10.0, epsilon = 1e-8);
        }
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_capped_steps_are_counted_not_fatal() {
        let scenario = diffusion_scenario(21);
        let config = SolverConfiguration::time_evolution(0.1, 0.05, 1)
            .with_picard(PicardSettings { max_iterations: 1, tolerance: 1e-14 });
        let result = PicardSolver::new().solve(&scenario, &config).unwrap();

        assert_eq!(result.capped_steps, 2);
        assert_eq!(result.iterations, vec![1, 1]);
        assert!(result.max_residual() > 0.0);
    }

    #[test]
    fn test_iteration_counts_respect_budget() {
        let scenario = diffusion_scenario(11);
        let config = SolverConfiguration::time_evolution(1.0, 0.1, 2);
        let result = PicardSolver::new().solve(&scenario, &config).unwrap();

        assert_eq!(result.iterations.len(), result.residuals.len());
        assert!(result.iterations.iter().all(|&n| (1..=15).contains(&n)));
    }

    #[test]
    fn test_huge_step_count_is_rejected() {
        let scenario = diffusion_scenario(3);
        let config = SolverConfiguration::time_evolution(1.0, 1e-300, 1);

        assert!(matches!(
            PicardSolver::new().solve(&scenario, &config),
            Err(SolverError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_configuration() {
        let scenario = diffusion_scenario(11);
        let config = SolverConfiguration::time_evolution(1.0, 0.0, 1);

        assert!(matches!(
            PicardSolver::new().solve(&scenario, &config),
            Err(SolverError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_walls_hold_after_every_step() {
        let params = ParameterSet::baseline().with_grid_resolution(20);
        let scenario = Scenario::couette(&params);
        let config = SolverConfiguration::time_evolution(0.5, 0.05, 1);
        let result = PicardSolver::new().solve(&scenario, &config).unwrap();

        for sample in &result.samples {
            assert_eq!(sample.state.get(PhysicalQuantity::Velocity).unwrap()[0], 0.0);
            assert_eq!(sample.state.get(PhysicalQuantity::Temperature).unwrap()[0], 1.0);
            assert_eq!(sample.state.get_metadata("time"), Some(sample.tau));
        }
        assert_eq!(result.metadata.get("solver").map(String::as_str), Some("Backward Euler / Picard"));
    }
}
