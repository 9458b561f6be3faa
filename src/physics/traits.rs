//! Physical models traits and types
//!
//! This module defines the core API for physical models:
//! - `PhysicalModel`: trait for all physical models
//! - `PhysicalState`: field container keyed by quantity
//! - `PhysicalQuantity`: type-safe quantity identifiers
//! - `WallFluxes`: momentum and heat fluxes at both plates

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =================================================================================================
// Physical quantities (Type-safe Identifiers)
// =================================================================================================

/// Known physical quantities (type-safe enum)
///
/// # Example
/// ```
/// use nanocouette::physics::{PhysicalQuantity, PhysicalState};
/// use nalgebra::DVector;
///
/// let induced_field = PhysicalQuantity::Custom("InducedField");
/// let mut state = PhysicalState::empty();
///
/// state.set(induced_field, DVector::from_element(51, 0.0));
/// assert!(state.get(induced_field).is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalQuantity {
    /// Dimensionless velocity W
    Velocity,

    /// Dimensionless temperature Θ
    Temperature,

    /// Custom quantity (for use extension)
    Custom(&'static str),
}

impl fmt::Display for PhysicalQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalQuantity::Velocity => write!(f, "velocity"),
            PhysicalQuantity::Temperature => write!(f, "temperature"),
            PhysicalQuantity::Custom(name) => write!(f, "{}", name),
        }
    }
}

// =================================================================================================
// Physical State (Flexible State Container)
// =================================================================================================

/// Physical state of the system at one instant
///
/// Holds one nodal vector per quantity plus scalar metadata (the solver
/// records the sample time under `"time"`).
///
/// # Example
/// ```
/// use nanocouette::physics::{PhysicalQuantity, PhysicalState};
/// use nalgebra::DVector;
///
/// let mut state = PhysicalState::new(PhysicalQuantity::Velocity, DVector::zeros(3));
/// state.set(PhysicalQuantity::Temperature, DVector::from_element(3, 1.0));
///
/// assert_eq!(state.get(PhysicalQuantity::Temperature).unwrap()[1], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalState {
    /// Physical quantities stored in a dictionary
    quantities: HashMap<PhysicalQuantity, DVector<f64>>,

    /// Scalar metadata (optional, e.g. time)
    metadata: HashMap<String, f64>,
}

impl PhysicalState {
    /// Create a new state with primary quantity
    pub fn new(quantity: PhysicalQuantity, value: DVector<f64>) -> Self {
        let mut quantities = HashMap::new();
        quantities.insert(quantity, value);

        Self {
            quantities,
            metadata: HashMap::new(),
        }
    }

    /// Create an empty state
    pub fn empty() -> Self {
        Self {
            quantities: HashMap::new(),
            metadata: HashMap::new(),
        }
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, quantity: PhysicalQuantity, value: DVector<f64>) -> Self {
        self.set(quantity, value);
        self
    }

    /// Get a quantity by type
    pub fn get(&self, quantity: PhysicalQuantity) -> Option<&DVector<f64>> {
        self.quantities.get(&quantity)
    }

    /// Set a quantity
    pub fn set(&mut self, quantity: PhysicalQuantity, value: DVector<f64>) {
        self.quantities.insert(quantity, value);
    }

    /// List of available physical state quantities
    pub fn available_quantities(&self) -> Vec<PhysicalQuantity> {
        self.quantities.keys().cloned().collect()
    }

    /// Get a metadata
    pub fn get_metadata(&self, key: &str) -> Option<f64> {
        self.metadata.get(key).copied()
    }

    /// Set a metadata
    pub fn set_metadata(&mut self, key: String, value: f64) {
        self.metadata.insert(key, value);
    }

    /// Largest absolute nodal difference over the quantities both states hold
    ///
    /// Returns 0 when the states share no quantity.
    pub fn max_abs_difference(&self, other: &PhysicalState) -> f64 {
        self.quantities
            .iter()
            .filter_map(|(quantity, field)| other.get(*quantity).map(|o| (field, o)))
            .flat_map(|(a, b)| a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()))
            .fold(0.0, f64::max)
    }
}

// =================================================================================================
// Wall fluxes
// =================================================================================================

/// Momentum and heat fluxes at both plates
///
/// - skin friction Cf = A1·∂W/∂η
/// - Nusselt number Nu = −A3·∂Θ/∂η
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WallFluxes {
    pub skin_friction_lower: f64,
    pub skin_friction_upper: f64,
    pub nusselt_lower: f64,
    pub nusselt_upper: f64,
}

// ==================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for physical models
///
/// # Responsibility
/// Provides the discretized equations of a system as one relaxation sweep
/// per quantity. Does NOT iterate them to convergence, march them in time,
/// or apply wall conditions (that's the Solver's job).
///
/// The model provides the "physics" (equations), the Solver provides
/// the "numerics" (method to solve them).
///
/// # Coupling order
/// [`coupled_quantities`](PhysicalModel::coupled_quantities) fixes the
/// order in which the solver sweeps the fields inside one fixed-point
/// iteration. A quantity later in the list sees the already updated values
/// of the quantities before it.
pub trait PhysicalModel: Send + Sync {
    /// Number of spatial points
    ///
    /// Used by the solver to allocate vectors
    fn points(&self) -> usize;

    /// Uniform spacing of the unit domain
    fn spacing(&self) -> f64 {
        1.0 / (self.points().saturating_sub(1).max(1)) as f64
    }

    /// Quantities updated by [`relax`](PhysicalModel::relax), in sweep order
    fn coupled_quantities(&self) -> Vec<PhysicalQuantity>;

    /// One implicit relaxation sweep of a single quantity
    ///
    /// # Arguments
    /// * `quantity` - Field to update
    /// * `previous` - State at the previous time level
    /// * `iterate` - Current fixed-point iterate
    /// * `dt` - Time step
    ///
    /// # Returns
    /// The updated field. Only interior nodes are meaningful; wall nodes are
    /// overwritten by the boundary conditions. `None` when either state lacks
    /// a quantity the update needs.
    fn relax(
        &self,
        quantity: PhysicalQuantity,
        previous: &PhysicalState,
        iterate: &PhysicalState,
        dt: f64,
    ) -> Option<DVector<f64>>;

    /// Wall fluxes of a state, `None` if a field is missing
    fn wall_fluxes(&self, state: &PhysicalState) -> Option<WallFluxes>;

    /// Creates the initial state for this physical model
    fn setup_initial_state(&self) -> PhysicalState;

    /// Name of the model (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the model (option)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_physical_state() {
        let physics = PhysicalState::empty();

        assert_eq!(physics.quantities.len(), 0);
        assert_eq!(physics.metadata.len(), 0);
    }

    #[test]
    fn test_new_physical_state() {
        let quantity = PhysicalQuantity::Custom("Tesla");
        let physics = PhysicalState::new(quantity, DVector::from_row_slice(&[1.0, 2.0]));

        assert_eq!(physics.quantities.len(), 1);
        assert!(physics.available_quantities().contains(&quantity));
        assert_eq!(physics.get(quantity).unwrap().len(), 2);
        assert!(physics.get(PhysicalQuantity::Velocity).is_none());
    }

    #[test]
    fn test_metadata() {
        let mut physics = PhysicalState::empty();

        physics.set_metadata("time".to_string(), 0.5);
        assert_eq!(physics.get_metadata("time"), Some(0.5));
        assert_eq!(physics.get_metadata("missing"), None);
    }

    #[test]
    fn test_max_abs_difference() {
        let a = PhysicalState::new(PhysicalQuantity::Velocity, DVector::from_row_slice(&[0.0, 1.0]))
            .with(PhysicalQuantity::Temperature, DVector::from_row_slice(&[1.0, 0.5]));
        let b = PhysicalState::new(PhysicalQuantity::Velocity, DVector::from_row_slice(&[0.0, 0.9]))
            .with(PhysicalQuantity::Temperature, DVector::from_row_slice(&[1.0, 0.2]));

        assert!((a.max_abs_difference(&b) - 0.3).abs() < 1e-15);
        assert_eq!(a.max_abs_difference(&PhysicalState::empty()), 0.0);
    }

    #[test]
    fn test_display_quantity() {
        assert_eq!(PhysicalQuantity::Velocity.to_string(), "velocity");
        assert_eq!(PhysicalQuantity::Custom("B").to_string(), "B");
    }
}
