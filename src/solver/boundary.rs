//! Wall boundary conditions and initial condition of the gap
//!
//! # Design Philosophy
//!
//! Every wall condition of the flow is a special case of the linear form
//!
//! ```text
//! a·f + b·∂f/∂n = c
//! ```
//!
//! where n is the outward normal of the wall. Discretizing ∂f/∂n with the
//! one-sided difference towards the interior neighbour gives the same
//! closed form at both walls:
//!
//! ```text
//! f_wall = (c + (b/h)·f_neighbour) / (a + b/h)
//! ```
//!
//! | Condition   | a  | b | c     | Resolved value                      |
//! |-------------|----|---|-------|-------------------------------------|
//! | Dirichlet   | 1  | 0 | v     | v                                   |
//! | Navier slip | 1  | λ | U     | (U + (λ/h)·f_{N−1}) / (1 + λ/h)     |
//! | Convective  | Bi | 1 | Bi·f∞ | (Bi·f∞ + f_{N−1}/h) / (Bi + 1/h)    |
//!
//! With b = 0 the neighbour term vanishes and the wall value is exactly c.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::physics::{PhysicalQuantity, PhysicalState};

// =================================================================================================
// Boundary condition
// =================================================================================================

/// Condition imposed on one field at one wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundaryCondition {
    /// Fixed value
    Dirichlet(f64),

    /// Navier slip: f + λ·∂f/∂n = wall value
    NavierSlip { slip: f64, wall_value: f64 },

    /// Convective (Robin) exchange: ∂f/∂n + Bi·(f − ambient) = 0
    Convective { biot: f64, ambient: f64 },
}

impl BoundaryCondition {
    /// Coefficients (a, b, c) of a·f + b·∂f/∂n = c
    pub fn coefficients(&self) -> (f64, f64, f64) {
        match *self {
            BoundaryCondition::Dirichlet(value) => (1.0, 0.0, value),
            BoundaryCondition::NavierSlip { slip, wall_value } => (1.0, slip, wall_value),
            BoundaryCondition::Convective { biot, ambient } => (biot, 1.0, biot * ambient),
        }
    }

    /// Wall value given the adjacent interior node and the grid spacing
    ///
    /// # Example
    ///
    /// ```rust
    /// use nanocouette::solver::BoundaryCondition;
    ///
    /// // no slip: the wall value is the plate speed regardless of the neighbour
    /// let no_slip = BoundaryCondition::NavierSlip { slip: 0.0, wall_value: 1.0 };
    /// assert_eq!(no_slip.resolve(0.37, 0.02), 1.0);
    /// ```
    pub fn resolve(&self, neighbour: f64, h: f64) -> f64 {
        let (a, b, c) = self.coefficients();
        let weight = b / h;
        (c + weight * neighbour) / (a + weight)
    }

    /// Validate coefficients
    pub fn validate(&self) -> Result<(), String> {
        let (a, b, c) = self.coefficients();

        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(format!("Boundary condition {:?} has non-finite coefficients", self));
        }
        if a < 0.0 || b < 0.0 {
            return Err(format!("Boundary condition {:?} has negative coefficients", self));
        }

        Ok(())
    }
}

// =================================================================================================
// Walls
// =================================================================================================

/// Identifies one of the two plates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wall {
    /// η = 0
    Lower,
    /// η = 1
    Upper,
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Wall::Lower => write!(f, "lower wall"),
            Wall::Upper => write!(f, "upper wall"),
        }
    }
}

/// Conditions imposed at one wall, keyed by quantity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallBoundary {
    conditions: HashMap<PhysicalQuantity, BoundaryCondition>,
}

impl WallBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: impose `condition` on `quantity`
    pub fn with(mut self, quantity: PhysicalQuantity, condition: BoundaryCondition) -> Self {
        self.conditions.insert(quantity, condition);
        self
    }

    pub fn get(&self, quantity: PhysicalQuantity) -> Option<&BoundaryCondition> {
        self.conditions.get(&quantity)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

// =================================================================================================
// Domain Boundaries
// =================================================================================================

/// Boundaries of the gap: both walls plus the initial condition
///
/// # Examples
///
/// ```rust
/// use nanocouette::physics::{PhysicalQuantity, PhysicalState};
/// use nanocouette::solver::{BoundaryCondition, DomainBoundaries, WallBoundary};
/// use nalgebra::DVector;
///
/// let lower = WallBoundary::new()
///     .with(PhysicalQuantity::Velocity, BoundaryCondition::Dirichlet(0.0));
/// let upper = WallBoundary::new()
///     .with(PhysicalQuantity::Velocity, BoundaryCondition::Dirichlet(1.0));
/// let initial = PhysicalState::new(PhysicalQuantity::Velocity, DVector::zeros(11));
///
/// let boundaries = DomainBoundaries::new(lower, upper, initial);
/// assert!(boundaries.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DomainBoundaries {
    /// Conditions at η = 0
    pub lower: WallBoundary,

    /// Conditions at η = 1
    pub upper: WallBoundary,

    /// State at τ = 0
    pub initial: Option<PhysicalState>,
}

impl DomainBoundaries {
    /// Create with both walls and an initial condition
    pub fn new(lower: WallBoundary, upper: WallBoundary, initial: PhysicalState) -> Self {
        Self {
            lower,
            upper,
            initial: Some(initial),
        }
    }

    // ===================================== Query methods =========================================

    /// Get initial condition
    pub fn initial_condition(&self) -> Option<&PhysicalState> {
        self.initial.as_ref()
    }

    /// Conditions of one wall
    pub fn wall(&self, wall: Wall) -> &WallBoundary {
        match wall {
            Wall::Lower => &self.lower,
            Wall::Upper => &self.upper,
        }
    }

    /// Overwrite the wall nodes of `field` with the resolved conditions
    ///
    /// A wall with no condition for `quantity` keeps its current value.
    pub fn apply(&self, quantity: PhysicalQuantity, field: &mut DVector<f64>, h: f64) {
        if field.len() < 2 {
            return;
        }
        let n = field.len() - 1;

        if let Some(condition) = self.lower.get(quantity) {
            field[0] = condition.resolve(field[1], h);
        }
        if let Some(condition) = self.upper.get(quantity) {
            field[n] = condition.resolve(field[n - 1], h);
        }
    }

    /// Validate the object contents
    pub fn validate(&self) -> Result<(), String> {
        for wall in [Wall::Lower, Wall::Upper] {
            for (quantity, condition) in &self.wall(wall).conditions {
                condition
                    .validate()
                    .map_err(|e| format!("{} ({} at the {})", e, quantity, wall))?;
            }
        }

        if self.initial.is_none() {
            return Err("No initial condition found in domain boundaries".to_string());
        }

        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
