//! Transient MHD Couette flow of a nanofluid
//!
//! The fluid fills the gap 0 ≤ η ≤ 1 between a fixed, hot lower plate and an
//! upper plate set impulsively into motion. A transverse magnetic field
//! damps the motion; viscous and Joule heating feed the energy balance.
//!
//! # Equations
//!
//! ```text
//! A4 ∂W/∂τ     = A1 ∂²W/∂η² − A2 Ha² W + G
//! A5 Pr ∂Θ/∂τ  = A3 ∂²Θ/∂η² + A1 Pr Ec (∂W/∂η)² + A2 Pr Ec Ha² W²
//! ```
//!
//! Backward Euler in time, second-order central differences in space. The
//! model only performs one Jacobi sweep per call: neighbours come from the
//! previous fixed-point iterate, the time derivative from the previous time
//! level. The temperature sweep reads the velocity of the iterate it is
//! given, so when the solver sweeps velocity first the heating terms use the
//! freshly updated momentum solution.
//!
//! Wall conditions (no-slip / Navier slip, isothermal / convective) are not
//! part of the model; see [`Scenario::couette`](crate::solver::Scenario::couette).

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::physics::{Grid, ParameterSet, PhysicalModel, PhysicalQuantity, PhysicalState, WallFluxes};

/// Velocity profile at τ = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InitialProfile {
    /// W = η·Re/(1+λ), the no-field steady profile
    #[default]
    LinearCouette,
    /// W = 0 everywhere, a true impulsive start
    Quiescent,
}

/// Discretized MHD Couette flow model
#[derive(Debug, Clone)]
pub struct MhdCouetteFlow {
    params: ParameterSet,
    grid: Grid,
    initial_profile: InitialProfile,
}

impl MhdCouetteFlow {
    /// Create the model for a parameter set
    ///
    /// # Panics
    ///
    /// Panics if `params.grid_resolution == 0`.
    pub fn new(params: ParameterSet) -> Self {
        Self {
            grid: Grid::new(params.grid_resolution),
            params,
            initial_profile: InitialProfile::default(),
        }
    }

    pub fn with_initial_profile(mut self, initial_profile: InitialProfile) -> Self {
        self.initial_profile = initial_profile;
        self
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn initial_profile(&self) -> InitialProfile {
        self.initial_profile
    }

    fn relax_velocity(&self, w_old: &DVector<f64>, w: &DVector<f64>, dt: f64) -> DVector<f64> {
        let p = &self.params;
        let h = self.grid.spacing();
        let n = self.grid.resolution();

        let coupling = p.a1 / (h * h);
        let inertia = p.a4 / dt;
        let diag = 2.0 * coupling + p.a2 * p.hartmann * p.hartmann + inertia;

        let mut next = w.clone();
        for i in 1..n {
            next[i] = (coupling * (w[i - 1] + w[i + 1]) + p.pressure_gradient + inertia * w_old[i]) / diag;
        }
        next
    }

    fn relax_temperature(
        &self,
        theta_old: &DVector<f64>,
        theta: &DVector<f64>,
        w: &DVector<f64>,
        dt: f64,
    ) -> DVector<f64> {
        let p = &self.params;
        let h = self.grid.spacing();
        let n = self.grid.resolution();

        let dw = self.grid.derivative(w);
        let viscous = p.a1 * p.prandtl * p.eckert;
        let joule = p.a2 * p.prandtl * p.eckert * p.hartmann * p.hartmann;

        let coupling = p.a3 / (h * h);
        let inertia = p.a5 * p.prandtl / dt;
        let diag = 2.0 * coupling + inertia;

        let mut next = theta.clone();
        for i in 1..n {
            let source = viscous * dw[i] * dw[i] + joule * w[i] * w[i];
            next[i] = (coupling * (theta[i - 1] + theta[i + 1]) + source + inertia * theta_old[i]) / diag;
        }
        next
    }
}

impl PhysicalModel for MhdCouetteFlow {
    fn points(&self) -> usize {
        self.grid.points()
    }

    fn spacing(&self) -> f64 {
        self.grid.spacing()
    }

    fn coupled_quantities(&self) -> Vec<PhysicalQuantity> {
        vec![PhysicalQuantity::Velocity, PhysicalQuantity::Temperature]
    }

    fn relax(
        &self,
        quantity: PhysicalQuantity,
        previous: &PhysicalState,
        iterate: &PhysicalState,
        dt: f64,
    ) -> Option<DVector<f64>> {
        match quantity {
            PhysicalQuantity::Velocity => {
                let w_old = previous.get(PhysicalQuantity::Velocity)?;
                let w = iterate.get(PhysicalQuantity::Velocity)?;
                Some(self.relax_velocity(w_old, w, dt))
            }
            PhysicalQuantity::Temperature => {
                let theta_old = previous.get(PhysicalQuantity::Temperature)?;
                let theta = iterate.get(PhysicalQuantity::Temperature)?;
                let w = iterate.get(PhysicalQuantity::Velocity)?;
                Some(self.relax_temperature(theta_old, theta, w, dt))
            }
            PhysicalQuantity::Custom(_) => None,
        }
    }

    fn wall_fluxes(&self, state: &PhysicalState) -> Option<WallFluxes> {
        let n = self.grid.resolution();
        let dw = self.grid.derivative(state.get(PhysicalQuantity::Velocity)?);
        let dtheta = self.grid.derivative(state.get(PhysicalQuantity::Temperature)?);

        Some(WallFluxes {
            skin_friction_lower: self.params.a1 * dw[0],
            skin_friction_upper: self.params.a1 * dw[n],
            nusselt_lower: -self.params.a3 * dtheta[0],
            nusselt_upper: -self.params.a3 * dtheta[n],
        })
    }

    fn setup_initial_state(&self) -> PhysicalState {
        let p = &self.params;
        let eta = self.grid.nodes();

        let velocity = match self.initial_profile {
            InitialProfile::LinearCouette => eta.map(|x| x * p.reynolds / (1.0 + p.slip)),
            InitialProfile::Quiescent => DVector::zeros(eta.len()),
        };
        let drop = p.biot / (1.0 + p.biot);
        let temperature = eta.map(|x| 1.0 - drop * x);

        let mut state = PhysicalState::new(PhysicalQuantity::Velocity, velocity)
            .with(PhysicalQuantity::Temperature, temperature);
        state.set_metadata("time".to_string(), 0.0);
        state
    }

    fn name(&self) -> &str {
        "MHD nanofluid Couette flow"
    }

    fn description(&self) -> Option<&str> {
        Some("Impulsively started Couette flow with Lorentz damping, slip and viscous/Joule heating")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
