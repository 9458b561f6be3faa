//! Mock physical models for testing
//!
//! These models have known exact solutions of the backward Euler scheme,
//! making them ideal for validating the time marching independently of the
//! flow physics.

use nalgebra::DVector;
use nanocouette::physics::{PhysicalModel, PhysicalQuantity, PhysicalState, WallFluxes};

pub const Y: PhysicalQuantity = PhysicalQuantity::Custom("y");
pub const Z: PhysicalQuantity = PhysicalQuantity::Custom("z");

// =================================================================================================
// Uniform Decay: dy/dt = -k*y
// =================================================================================================

/// Pointwise decay, nodes uncoupled
///
/// Backward Euler is exact after one iteration: y_n = y₀ / (1 + k·Δt)ⁿ
pub struct UniformDecay {
    pub points: usize,
    pub decay_rate: f64,
}

impl UniformDecay {
    pub fn new(points: usize, decay_rate: f64) -> Self {
        Self { points, decay_rate }
    }

    /// Discrete solution after `steps` steps from y₀ = 1
    pub fn discrete_solution(&self, steps: usize, dt: f64) -> f64 {
        (1.0 + self.decay_rate * dt).powi(-(steps as i32))
    }
}

impl PhysicalModel for UniformDecay {
    fn points(&self) -> usize {
        self.points
    }

    fn coupled_quantities(&self) -> Vec<PhysicalQuantity> {
        vec![Y]
    }

    fn relax(
        &self,
        quantity: PhysicalQuantity,
        previous: &PhysicalState,
        _iterate: &PhysicalState,
        dt: f64,
    ) -> Option<DVector<f64>> {
        let old = previous.get(quantity)?;
        Some(old.map(|y| y / (1.0 + self.decay_rate * dt)))
    }

    fn wall_fluxes(&self, _state: &PhysicalState) -> Option<WallFluxes> {
        Some(WallFluxes::default())
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(Y, DVector::from_element(self.points, 1.0))
    }

    fn name(&self) -> &str {
        "Uniform Decay"
    }
}

// =================================================================================================
// Driven Pair: dy/dt = 1, dz/dt = y
// =================================================================================================

/// Two pointwise fields where the second is driven by the first
///
/// Swept in the order y then z, so z sees the y of the same iteration and
/// the implicit step is exact after two iterations.
pub struct DrivenPair {
    pub points: usize,
}

impl PhysicalModel for DrivenPair {
    fn points(&self) -> usize {
        self.points
    }

    fn coupled_quantities(&self) -> Vec<PhysicalQuantity> {
        vec![Y, Z]
    }

    fn relax(
        &self,
        quantity: PhysicalQuantity,
        previous: &PhysicalState,
        iterate: &PhysicalState,
        dt: f64,
    ) -> Option<DVector<f64>> {
        let old = previous.get(quantity)?;
        if quantity == Y {
            Some(old.map(|y| y + dt))
        } else {
            let y = iterate.get(Y)?;
            Some(old + y * dt)
        }
    }

    fn wall_fluxes(&self, state: &PhysicalState) -> Option<WallFluxes> {
        let z = state.get(Z)?;
        Some(WallFluxes { skin_friction_lower: z[0], ..Default::default() })
    }

    fn setup_initial_state(&self) -> PhysicalState {
        PhysicalState::new(Y, DVector::zeros(self.points)).with(Z, DVector::zeros(self.points))
    }

    fn name(&self) -> &str {
        "Driven Pair"
    }
}
