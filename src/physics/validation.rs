//! Advisory parameter checks
//!
//! [`validate`] inspects a [`ParameterSet`] against physical bounds and
//! returns ordered warnings and errors. It never blocks a solve: the solver
//! runs on out-of-range inputs, and only its own hard preconditions
//! ([`ParameterSet::ensure_solvable`]) can make a solve fail.

use serde::{Deserialize, Serialize};

use crate::physics::parameters::ParameterSet;

/// Outcome of [`validate`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// True when no error was raised (warnings are allowed)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    fn error(&mut self, message: String) {
        self.errors.push(message);
    }
}

/// Check a parameter set against physical bounds
///
/// Errors cover values outside the physical domain (non-positive property
/// ratios or Prandtl number, negative dimensionless groups, non-finite
/// values, an empty grid). Warnings flag regimes where the discretization or
/// the model assumptions become questionable.
///
/// # Example
///
/// ```rust
/// use nanocouette::physics::{validate, ParameterSet};
///
/// let report = validate(&ParameterSet::baseline());
/// assert!(report.is_valid());
///
/// let report = validate(&ParameterSet::baseline().with_prandtl(-1.0));
/// assert!(!report.is_valid());
/// ```
pub fn validate(params: &ParameterSet) -> ValidationReport {
    let mut report = ValidationReport::default();

    for (parameter, value) in params.scalars() {
        if !value.is_finite() {
            report.error(format!("{} must be finite, got {}", parameter, value));
        }
    }

    // ====== Property ratios ======

    let ratios = [
        ("A1 (viscosity ratio)", params.a1),
        ("A2 (electrical conductivity ratio)", params.a2),
        ("A3 (thermal conductivity ratio)", params.a3),
        ("A4 (density ratio)", params.a4),
        ("A5 (heat capacity ratio)", params.a5),
    ];
    for (label, value) in ratios {
        if value <= 0.0 {
            report.error(format!("{} must be positive, got {}", label, value));
        }
    }
    if params.a1 > 2.0 {
        report.warn(format!(
            "A1 = {} implies a volume fraction well beyond the Brinkman model's range",
            params.a1
        ));
    }
    if params.a4 > 3.0 {
        report.warn(format!("A4 = {} is unusually dense for a dilute suspension", params.a4));
    }

    // ====== Dimensionless groups ======

    if params.prandtl <= 0.0 {
        report.error(format!("Prandtl number must be positive, got {}", params.prandtl));
    }

    let non_negative = [
        ("Hartmann number", params.hartmann),
        ("Reynolds number", params.reynolds),
        ("Eckert number", params.eckert),
        ("Biot number", params.biot),
        ("Slip parameter", params.slip),
        ("Pressure gradient", params.pressure_gradient),
    ];
    for (label, value) in non_negative {
        if value < 0.0 {
            report.error(format!("{} must be non-negative, got {}", label, value));
        }
    }

    if params.hartmann > 10.0 {
        report.warn(format!(
            "Ha = {} gives thin Hartmann layers that the grid may not resolve",
            params.hartmann
        ));
    }
    if params.reynolds > 10.0 {
        report.warn(format!("Re = {} is outside the laminar Couette regime", params.reynolds));
    }
    if params.prandtl > 100.0 {
        report.warn(format!("Pr = {} is far above typical liquid values", params.prandtl));
    }
    if params.eckert > 1.0 {
        report.warn(format!("Ec = {} makes viscous heating dominant", params.eckert));
    }
    if params.biot > 100.0 {
        report.warn(format!(
            "Bi = {} is effectively an isothermal upper wall",
            params.biot
        ));
    }
    if params.slip > 1.0 {
        report.warn(format!("Slip parameter {} is large for a Navier slip wall", params.slip));
    }
    if params.pressure_gradient > 10.0 {
        report.warn(format!(
            "G = {} lets the pressure-driven flow dominate the plate motion",
            params.pressure_gradient
        ));
    }

    // ====== Grid ======

    match params.grid_resolution {
        0 => report.error("Grid resolution N must be at least 1".to_string()),
        n if n < 20 => report.warn(format!("N = {} is coarse; wall fluxes will be inaccurate", n)),
        n if n > 400 => report.warn(format!(
            "N = {} slows the Jacobi sweep without improving the first-order wall fluxes",
            n
        )),
        _ => {}
    }

    report
}

// =================================================================================================
// Tests
// =================================================================================================
