//! Nanofluid mixture properties
//!
//! Maps a particle type and a volume fraction φ to the five dimensionless
//! property ratios A1..A5 used by the flow model. The base fluid is water.
//!
//! | Ratio | Property                | Model                      |
//! |-------|-------------------------|----------------------------|
//! | A1    | dynamic viscosity       | Brinkman                   |
//! | A2    | electrical conductivity | Maxwell-type               |
//! | A3    | thermal conductivity    | Maxwell                    |
//! | A4    | density                 | linear mixture             |
//! | A5    | heat capacity (ρCp)     | linear mixture             |
//!
//! At φ = 0 every ratio is exactly 1.

use serde::{Deserialize, Serialize};

/// Base fluid density ρ_f (kg/m³)
pub const BASE_DENSITY: f64 = 997.0;
/// Base fluid thermal conductivity k_f (W/m·K)
pub const BASE_THERMAL_CONDUCTIVITY: f64 = 0.613;
/// Base fluid specific heat Cp_f (J/kg·K)
pub const BASE_SPECIFIC_HEAT: f64 = 4179.0;
/// Base fluid electrical conductivity σ_f (S/m)
pub const BASE_ELECTRICAL_CONDUCTIVITY: f64 = 0.05;

/// Errors from the mixture calculator
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NanofluidError {
    #[error("Volume fraction must lie in [0, 1), got {0}")]
    InvalidVolumeFraction(f64),
}

// =================================================================================================
// Particles
// =================================================================================================

/// Physical constants of a particle material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleProperties {
    /// Density ρ_p (kg/m³)
    pub density: f64,
    /// Thermal conductivity k_p (W/m·K)
    pub thermal_conductivity: f64,
    /// Specific heat Cp_p (J/kg·K)
    pub specific_heat: f64,
    /// Electrical conductivity σ_p (S/m)
    pub electrical_conductivity: f64,
}

/// Particle catalogue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Particle {
    Copper,
    Silver,
    /// Al₂O₃
    Alumina,
    /// TiO₂
    Titania,
    /// CuO
    CopperOxide,
    /// Fe₃O₄
    Magnetite,
    Custom(ParticleProperties),
}

impl Particle {
    /// Every catalogued material (excludes `Custom`)
    pub const CATALOGUE: [Particle; 6] = [
        Particle::Copper,
        Particle::Silver,
        Particle::Alumina,
        Particle::Titania,
        Particle::CopperOxide,
        Particle::Magnetite,
    ];

    pub fn properties(&self) -> ParticleProperties {
        let (density, thermal_conductivity, specific_heat, electrical_conductivity) = match self {
            Particle::Copper => (8933.0, 401.0, 385.0, 5.96e7),
            Particle::Silver => (10500.0, 429.0, 235.0, 6.30e7),
            Particle::Alumina => (3970.0, 40.0, 765.0, 3.5e7),
            Particle::Titania => (4250.0, 8.9538, 686.2, 2.6e6),
            Particle::CopperOxide => (6320.0, 76.5, 531.8, 2.7e-8),
            Particle::Magnetite => (5180.0, 9.7, 670.0, 2.5e4),
            Particle::Custom(properties) => return *properties,
        };

        ParticleProperties {
            density,
            thermal_conductivity,
            specific_heat,
            electrical_conductivity,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Particle::Copper => "Cu",
            Particle::Silver => "Ag",
            Particle::Alumina => "Al2O3",
            Particle::Titania => "TiO2",
            Particle::CopperOxide => "CuO",
            Particle::Magnetite => "Fe3O4",
            Particle::Custom(_) => "custom",
        }
    }
}

// =================================================================================================
// Mixture
// =================================================================================================

/// Dimensionless property ratios of a nanofluid relative to the base fluid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixtureProperties {
    /// A1
    pub viscosity: f64,
    /// A2
    pub electrical_conductivity: f64,
    /// A3
    pub thermal_conductivity: f64,
    /// A4
    pub density: f64,
    /// A5
    pub heat_capacity: f64,
}

impl MixtureProperties {
    /// Ratios of the pure base fluid
    pub fn base_fluid() -> Self {
        Self {
            viscosity: 1.0,
            electrical_conductivity: 1.0,
            thermal_conductivity: 1.0,
            density: 1.0,
            heat_capacity: 1.0,
        }
    }

    /// Compute the mixture ratios for `particle` at volume fraction `phi`
    ///
    /// # Errors
    ///
    /// [`NanofluidError::InvalidVolumeFraction`] unless `0 <= phi < 1`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nanocouette::physics::{MixtureProperties, Particle};
    ///
    /// let mixture = MixtureProperties::compute(Particle::Copper, 0.04).unwrap();
    /// assert!(mixture.viscosity > 1.0);
    /// assert!(mixture.thermal_conductivity > 1.0);
    /// ```
    pub fn compute(particle: Particle, phi: f64) -> Result<Self, NanofluidError> {
        // NaN fails both comparisons
        if !(0.0..1.0).contains(&phi) {
            return Err(NanofluidError::InvalidVolumeFraction(phi));
        }

        let p = particle.properties();

        let density = ((1.0 - phi) * BASE_DENSITY + phi * p.density) / BASE_DENSITY;

        let viscosity = 1.0 / (1.0 - phi).powf(2.5);

        let k_p = p.thermal_conductivity;
        let k_f = BASE_THERMAL_CONDUCTIVITY;
        let thermal_conductivity =
            (k_p + 2.0 * k_f + 2.0 * phi * (k_p - k_f)) / (k_p + 2.0 * k_f - phi * (k_p - k_f));

        let base_capacity = BASE_DENSITY * BASE_SPECIFIC_HEAT;
        let heat_capacity =
            ((1.0 - phi) * base_capacity + phi * p.density * p.specific_heat) / base_capacity;

        let sigma_r = p.electrical_conductivity / BASE_ELECTRICAL_CONDUCTIVITY;
        let electrical_conductivity =
            1.0 + 3.0 * phi * (sigma_r - 1.0) / (sigma_r + 2.0 - phi * (sigma_r - 1.0));

        Ok(Self {
            viscosity,
            electrical_conductivity,
            thermal_conductivity,
            density,
            heat_capacity,
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_fraction_gives_unit_ratios() {
        for particle in Particle::CATALOGUE {
            let mixture = MixtureProperties::compute(particle, 0.0).unwrap();
            let base = MixtureProperties::base_fluid();

            assert_relative_eq!(mixture.viscosity, base.viscosity, epsilon = 1e-15);
            assert_relative_eq!(mixture.electrical_conductivity, 1.0, epsilon = 1e-15);
            assert_relative_eq!(mixture.thermal_conductivity, 1.0, epsilon = 1e-15);
            assert_relative_eq!(mixture.density, 1.0, epsilon = 1e-15);
            assert_relative_eq!(mixture.heat_capacity, 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_brinkman_viscosity() {
        let mixture = MixtureProperties::compute(Particle::Alumina, 0.1).unwrap();
        assert_relative_eq!(mixture.viscosity, 0.9_f64.powf(-2.5), epsilon = 1e-12);
    }

    #[test]
    fn test_copper_density_ratio() {
        let mixture = MixtureProperties::compute(Particle::Copper, 0.05).unwrap();
        let expected = (0.95 * 997.0 + 0.05 * 8933.0) / 997.0;
        assert_relative_eq!(mixture.density, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_poor_conductor_lowers_electrical_ratio() {
        let mixture = MixtureProperties::compute(Particle::CopperOxide, 0.05).unwrap();
        assert!(mixture.electrical_conductivity < 1.0);
    }

    #[test]
    fn test_custom_particle_matching_base_fluid() {
        let water = Particle::Custom(ParticleProperties {
            density: BASE_DENSITY,
            thermal_conductivity: BASE_THERMAL_CONDUCTIVITY,
            specific_heat: BASE_SPECIFIC_HEAT,
            electrical_conductivity: BASE_ELECTRICAL_CONDUCTIVITY,
        });
        let mixture = MixtureProperties::compute(water, 0.2).unwrap();

        assert_relative_eq!(mixture.density, 1.0, epsilon = 1e-12);
        assert_relative_eq!(mixture.thermal_conductivity, 1.0, epsilon = 1e-12);
        assert_relative_eq!(mixture.heat_capacity, 1.0, epsilon = 1e-12);
        assert_relative_eq!(mixture.electrical_conductivity, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_fractions() {
        for phi in [-0.01, 1.0, 1.5, f64::NAN] {
            assert!(matches!(
                MixtureProperties::compute(Particle::Silver, phi),
                Err(NanofluidError::InvalidVolumeFraction(_))
            ));
        }
    }
}
