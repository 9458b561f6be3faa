//! Simulation scenario definition
//!
//! A scenario combines a physical model with boundary conditions.
use crate::models::{InitialProfile, MhdCouetteFlow};
use crate::physics::traits::PhysicalModel;
use crate::physics::{ParameterSet, PhysicalQuantity};
use crate::solver::boundary::{BoundaryCondition, DomainBoundaries, WallBoundary};

/// Simulation scenario
///
/// Defines a specific case to simulate:
/// - Physical model (equations)
/// - Boundary conditions (walls and initial state)
///
/// # Design
///
/// The same scenario can be solved with different numerical configurations.
/// This is the "WHAT to solve" (not "HOW to solve").
///
/// # Examples
///
/// ```rust
/// use nanocouette::physics::ParameterSet;
/// use nanocouette::solver::{PicardSolver, Scenario, Solver, SolverConfiguration};
///
/// let scenario = Scenario::couette(&ParameterSet::baseline().with_grid_resolution(20));
/// let result = PicardSolver::new()
///     .solve(&scenario, &SolverConfiguration::time_evolution(0.2, 0.02, 5))
///     .unwrap();
///
/// assert_eq!(result.len(), 3);
/// ```
pub struct Scenario {
    /// Physical model (equations)
    pub model: Box<dyn PhysicalModel>,

    /// Conditions and boundaries
    pub conditions: DomainBoundaries,
}

impl Scenario {
    /// Create a scenario
    pub fn new(model: Box<dyn PhysicalModel>, conditions: DomainBoundaries) -> Self {
        Self { model, conditions }
    }

    /// Couette flow with the default (linear) initial profile
    ///
    /// # Panics
    ///
    /// Panics if `params.grid_resolution == 0`; check
    /// [`ParameterSet::ensure_solvable`] first.
    pub fn couette(params: &ParameterSet) -> Self {
        Self::couette_with_profile(params, InitialProfile::default())
    }

    /// Couette flow starting from the given velocity profile
    ///
    /// Walls:
    /// - lower (η = 0): W = 0, Θ = 1
    /// - upper (η = 1): Navier slip W + λ∂W/∂η = Re, convective ∂Θ/∂η + Bi·Θ = 0
    pub fn couette_with_profile(params: &ParameterSet, profile: InitialProfile) -> Self {
        let model = MhdCouetteFlow::new(*params).with_initial_profile(profile);

        let lower = WallBoundary::new()
            .with(PhysicalQuantity::Velocity, BoundaryCondition::Dirichlet(0.0))
            .with(PhysicalQuantity::Temperature, BoundaryCondition::Dirichlet(1.0));
        let upper = WallBoundary::new()
            .with(
                PhysicalQuantity::Velocity,
                BoundaryCondition::NavierSlip { slip: params.slip, wall_value: params.reynolds },
            )
            .with(
                PhysicalQuantity::Temperature,
                BoundaryCondition::Convective { biot: params.biot, ambient: 0.0 },
            );

        let initial = model.setup_initial_state();
        Self::new(Box::new(model), DomainBoundaries::new(lower, upper, initial))
    }

    /// Verifying scenario content (boundaries and initial state size)
    pub fn validate(&self) -> Result<(), String> {
        self.conditions.validate()?;

        if let Some(initial) = self.conditions.initial_condition() {
            for quantity in self.model.coupled_quantities() {
                match initial.get(quantity) {
                    Some(field) if field.len() == self.model.points() => {}
                    Some(field) => {
                        return Err(format!(
                            "Initial {} has {} nodes, model expects {}",
                            quantity,
                            field.len(),
                            self.model.points()
                        ));
                    }
                    None => return Err(format!("Initial condition has no {} field", quantity)),
                }
            }
        }

        Ok(())
    }

    /// Get model name
    pub fn get_model_name(&self) -> &str {
        self.model.name()
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.get_model_name())
            .field("points", &self.model.points())
            .field("Boundaries / conditions", &self.conditions)
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
