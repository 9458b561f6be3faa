//! Dimensionless parameter record
//!
//! A [`ParameterSet`] fully describes one flow case. It is a plain value:
//! every edit goes through a consuming `with_*` method and yields a new set.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::physics::nanofluid::MixtureProperties;

/// Default grid resolution N
pub const DEFAULT_GRID_RESOLUTION: usize = 50;

// =================================================================================================
// Parameter identifiers
// =================================================================================================

/// Scalar parameters addressable by name
///
/// Used by the sensitivity analyzer and the optimizer to read and replace a
/// single entry of a [`ParameterSet`] without matching on fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    /// Hartmann number Ha
    Hartmann,
    /// Reynolds number Re
    Reynolds,
    /// Prandtl number Pr
    Prandtl,
    /// Eckert number Ec
    Eckert,
    /// Biot number Bi
    Biot,
    /// Navier slip parameter λ
    Slip,
    /// Pressure-gradient parameter G
    PressureGradient,
    /// Viscosity ratio A1
    ViscosityRatio,
    /// Electrical-conductivity ratio A2
    ElectricalConductivityRatio,
    /// Thermal-conductivity ratio A3
    ThermalConductivityRatio,
    /// Density ratio A4
    DensityRatio,
    /// Heat-capacity ratio A5
    HeatCapacityRatio,
}

impl Parameter {
    /// Parameters perturbed by the sensitivity analysis
    pub const SENSITIVITY: [Parameter; 6] = [
        Parameter::Hartmann,
        Parameter::Reynolds,
        Parameter::Prandtl,
        Parameter::Eckert,
        Parameter::Biot,
        Parameter::Slip,
    ];

    /// Short symbol used in reports and exports
    pub fn symbol(&self) -> &'static str {
        match self {
            Parameter::Hartmann => "Ha",
            Parameter::Reynolds => "Re",
            Parameter::Prandtl => "Pr",
            Parameter::Eckert => "Ec",
            Parameter::Biot => "Bi",
            Parameter::Slip => "lambda",
            Parameter::PressureGradient => "G",
            Parameter::ViscosityRatio => "A1",
            Parameter::ElectricalConductivityRatio => "A2",
            Parameter::ThermalConductivityRatio => "A3",
            Parameter::DensityRatio => "A4",
            Parameter::HeatCapacityRatio => "A5",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

// =================================================================================================
// Parameter set
// =================================================================================================

/// Complete set of dimensionless inputs for one flow case
///
/// # Fields
///
/// - `a1..a5`: nanofluid property ratios (viscosity, electrical
///   conductivity, thermal conductivity, density, heat capacity), all > 0
/// - `hartmann` Ha ≥ 0, `reynolds` Re ≥ 0, `prandtl` Pr > 0, `eckert` Ec ≥ 0,
///   `biot` Bi ≥ 0, `slip` λ ≥ 0, `pressure_gradient` G ≥ 0
/// - `grid_resolution` N ≥ 1
///
/// Ranges are not enforced on construction. Use
/// [`validate`](crate::physics::validate) for advisory checks and
/// [`ensure_solvable`](ParameterSet::ensure_solvable) for the hard
/// preconditions of the solver.
///
/// # Example
///
/// ```rust
/// use nanocouette::physics::ParameterSet;
///
/// let base = ParameterSet::baseline();
/// let strong_field = base.with_hartmann(5.0);
///
/// assert_eq!(base.hartmann, 2.0);
/// assert_eq!(strong_field.hartmann, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub a1: f64,
    pub a2: f64,
    pub a3: f64,
    pub a4: f64,
    pub a5: f64,
    pub hartmann: f64,
    pub reynolds: f64,
    pub prandtl: f64,
    pub eckert: f64,
    pub biot: f64,
    pub slip: f64,
    pub pressure_gradient: f64,
    pub grid_resolution: usize,
}

impl ParameterSet {
    /// Reference case: water-based nanofluid, moderate field, slight slip
    pub fn baseline() -> Self {
        Self {
            a1: 1.2,
            a2: 1.5,
            a3: 1.3,
            a4: 1.1,
            a5: 1.15,
            hartmann: 2.0,
            reynolds: 1.0,
            prandtl: 6.2,
            eckert: 0.1,
            biot: 0.5,
            slip: 0.1,
            pressure_gradient: 0.5,
            grid_resolution: DEFAULT_GRID_RESOLUTION,
        }
    }

    /// Pure base fluid (all property ratios equal to one)
    pub fn base_fluid() -> Self {
        Self {
            a1: 1.0,
            a2: 1.0,
            a3: 1.0,
            a4: 1.0,
            a5: 1.0,
            ..Self::baseline()
        }
    }

    // ======================================= builders ============================================

    pub fn with_hartmann(self, hartmann: f64) -> Self {
        Self { hartmann, ..self }
    }

    pub fn with_reynolds(self, reynolds: f64) -> Self {
        Self { reynolds, ..self }
    }

    pub fn with_prandtl(self, prandtl: f64) -> Self {
        Self { prandtl, ..self }
    }

    pub fn with_eckert(self, eckert: f64) -> Self {
        Self { eckert, ..self }
    }

    pub fn with_biot(self, biot: f64) -> Self {
        Self { biot, ..self }
    }

    pub fn with_slip(self, slip: f64) -> Self {
        Self { slip, ..self }
    }

    pub fn with_pressure_gradient(self, pressure_gradient: f64) -> Self {
        Self { pressure_gradient, ..self }
    }

    pub fn with_grid_resolution(self, grid_resolution: usize) -> Self {
        Self { grid_resolution, ..self }
    }

    /// Replace the five property ratios with a computed mixture
    pub fn with_nanofluid(self, mixture: &MixtureProperties) -> Self {
        Self {
            a1: mixture.viscosity,
            a2: mixture.electrical_conductivity,
            a3: mixture.thermal_conductivity,
            a4: mixture.density,
            a5: mixture.heat_capacity,
            ..self
        }
    }

    // ==================================== keyed access ===========================================

    /// Read one scalar parameter
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Hartmann => self.hartmann,
            Parameter::Reynolds => self.reynolds,
            Parameter::Prandtl => self.prandtl,
            Parameter::Eckert => self.eckert,
            Parameter::Biot => self.biot,
            Parameter::Slip => self.slip,
            Parameter::PressureGradient => self.pressure_gradient,
            Parameter::ViscosityRatio => self.a1,
            Parameter::ElectricalConductivityRatio => self.a2,
            Parameter::ThermalConductivityRatio => self.a3,
            Parameter::DensityRatio => self.a4,
            Parameter::HeatCapacityRatio => self.a5,
        }
    }

    /// Return a copy with one scalar parameter replaced
    pub fn with(self, parameter: Parameter, value: f64) -> Self {
        let mut next = self;
        match parameter {
            Parameter::Hartmann => next.hartmann = value,
            Parameter::Reynolds => next.reynolds = value,
            Parameter::Prandtl => next.prandtl = value,
            Parameter::Eckert => next.eckert = value,
            Parameter::Biot => next.biot = value,
            Parameter::Slip => next.slip = value,
            Parameter::PressureGradient => next.pressure_gradient = value,
            Parameter::ViscosityRatio => next.a1 = value,
            Parameter::ElectricalConductivityRatio => next.a2 = value,
            Parameter::ThermalConductivityRatio => next.a3 = value,
            Parameter::DensityRatio => next.a4 = value,
            Parameter::HeatCapacityRatio => next.a5 = value,
        }
        next
    }

    /// All scalar parameters with their identifiers
    pub fn scalars(&self) -> [(Parameter, f64); 12] {
        [
            Parameter::ViscosityRatio,
            Parameter::ElectricalConductivityRatio,
            Parameter::ThermalConductivityRatio,
            Parameter::DensityRatio,
            Parameter::HeatCapacityRatio,
            Parameter::Hartmann,
            Parameter::Reynolds,
            Parameter::Prandtl,
            Parameter::Eckert,
            Parameter::Biot,
            Parameter::Slip,
            Parameter::PressureGradient,
        ]
        .map(|p| (p, self.get(p)))
    }

    // ==================================== preconditions ==========================================

    /// Hard preconditions of the solver
    ///
    /// Only rejects inputs that would make the discretization degenerate
    /// (empty grid, division by a zero Prandtl number, non-finite values).
    /// Out-of-range but finite values are the validator's business.
    pub fn ensure_solvable(&self) -> Result<(), String> {
        if self.grid_resolution < 1 {
            return Err("Grid resolution N must be at least 1".to_string());
        }

        for (parameter, value) in self.scalars() {
            if !value.is_finite() {
                return Err(format!("Parameter {} is not finite ({})", parameter, value));
            }
        }

        if self.prandtl <= 0.0 {
            return Err(format!("Prandtl number must be positive, got {}", self.prandtl));
        }

        Ok(())
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::baseline()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_leave_original_untouched() {
        let base = ParameterSet::baseline();
        let edited = base.with_reynolds(3.0).with_slip(0.0);

        assert_eq!(base.reynolds, 1.0);
        assert_eq!(base.slip, 0.1);
        assert_eq!(edited.reynolds, 3.0);
        assert_eq!(edited.slip, 0.0);
        assert_eq!(edited.hartmann, base.hartmann);
    }

    #[test]
    fn test_keyed_access_round_trips_every_parameter() {
        let base = ParameterSet::baseline();
        for (parameter, value) in base.scalars() {
            let edited = base.with(parameter, value + 1.0);
            assert_eq!(edited.get(parameter), value + 1.0, "{}", parameter);
        }
    }

    #[test]
    fn test_default_resolution() {
        assert_eq!(ParameterSet::default().grid_resolution, 50);
    }

    #[test]
    fn test_ensure_solvable_rejects_degenerate_inputs() {
        let base = ParameterSet::baseline();

        assert!(base.ensure_solvable().is_ok());
        assert!(base.with_grid_resolution(0).ensure_solvable().is_err());
        assert!(base.with_prandtl(0.0).ensure_solvable().unwrap_err().contains("Prandtl"));
        assert!(base.with_hartmann(f64::NAN).ensure_solvable().unwrap_err().contains("Ha"));
    }

    #[test]
    fn test_serde_round_trip() {
        let base = ParameterSet::baseline().with_eckert(0.3);
        let json = serde_json::to_string(&base).unwrap();
        let back: ParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(base, back);
    }
}
