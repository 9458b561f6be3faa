//! Closed-form estimates of the response
//!
//! An O(1) what-if predictor for the same scalars the diagnostics produce,
//! built from simplified algebra instead of a solve. It is approximate by
//! construction and reports a [`Confidence`] level derived from how far the
//! inputs are from the regime the formulas were fitted to.
//!
//! ```text
//! md   = 1 / (1 + 0.3 Ha²)                  magnetic damping factor
//! t_c  = A4·md / (π² A1)                    characteristic diffusion time
//! τ₉₅  ≈ 3 t_c,  settling ≈ 4 t_c
//! ζ    = 0.67 / √md
//! Cf   ≈ A1·Re·(M / sinh M) / (1 + λ),  M = Ha / √A1
//! q    = Pr·Ec·A1·(Re·md / (1 + λ))²       uniform heating
//! Nu   = (A3·Bi − q(1 + Bi/2)) / (1 + Bi)
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::analysis::diagnostics::DampingClass;
use crate::physics::ParameterSet;

/// Trust level of a surrogate estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    /// Moderate field, slip and heating
    High,
    Medium,
    /// Strong field, large slip or dominant viscous heating
    Low,
}

/// Approximate response of a parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurrogateEstimate {
    pub tau_95: f64,
    /// Percent
    pub overshoot: f64,
    pub cf_final: f64,
    pub nu_final: f64,
    pub settling_time: f64,
    pub damping: DampingClass,
    pub confidence: Confidence,
}

/// Magnetic damping factor md = 1/(1 + 0.3·Ha²)
pub fn magnetic_damping(hartmann: f64) -> f64 {
    1.0 / (1.0 + 0.3 * hartmann * hartmann)
}

/// M / sinh M, continuous at M = 0
fn hartmann_profile_factor(m: f64) -> f64 {
    if m.abs() < 1e-8 { 1.0 } else { m / m.sinh() }
}

fn confidence(params: &ParameterSet) -> Confidence {
    if params.hartmann > 10.0 || params.slip > 1.0 || params.eckert > 1.0 {
        Confidence::Low
    } else if params.hartmann <= 5.0 && params.slip <= 0.5 && params.eckert <= 0.5 {
        Confidence::High
    } else {
        Confidence::Medium
    }
}

/// Estimate the response without solving
///
/// # Example
///
/// ```rust
/// use nanocouette::analysis::surrogate::{estimate, Confidence};
/// use nanocouette::analysis::DampingClass;
/// use nanocouette::physics::ParameterSet;
///
/// let guess = estimate(&ParameterSet::baseline());
/// assert_eq!(guess.damping, DampingClass::Overdamped);
/// assert_eq!(guess.confidence, Confidence::High);
/// ```
pub fn estimate(params: &ParameterSet) -> SurrogateEstimate {
    let md = magnetic_damping(params.hartmann);

    let characteristic_time = params.a4 * md / (PI * PI * params.a1);
    let tau_95 = 3.0 * characteristic_time;
    let settling_time = 4.0 * characteristic_time;

    let zeta = 0.67 / md.sqrt();
    let overshoot = if zeta < 1.0 {
        100.0 * (-PI * zeta / (1.0 - zeta * zeta).sqrt()).exp()
    } else {
        0.0
    };

    let m = params.hartmann / params.a1.sqrt();
    let cf_final = params.a1 * params.reynolds * hartmann_profile_factor(m) / (1.0 + params.slip);

    let plate_speed = params.reynolds * md / (1.0 + params.slip);
    let heating = params.prandtl * params.eckert * params.a1 * plate_speed * plate_speed;
    let nu_final = (params.a3 * params.biot - heating * (1.0 + 0.5 * params.biot)) / (1.0 + params.biot);

    SurrogateEstimate {
        tau_95,
        overshoot,
        cf_final,
        nu_final,
        settling_time,
        damping: DampingClass::from_overshoot(overshoot),
        confidence: confidence(params),
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
    fn test_no_field_limit() {
        let params = ParameterSet::base_fluid().with_hartmann(0.0).with_slip(0.0);
        let guess = estimate(&params);

        assert_relative_eq!(guess.cf_final, params.reynolds, epsilon = 1e-12);
        assert_relative_eq!(guess.tau_95, 3.0 / (PI * PI), epsilon = 1e-12);
        // ζ = 0.67: lightly underdamped
        assert_eq!(guess.damping, DampingClass::Underdamped);
    }

    #[test]
    fn test_field_damps_and_slows_less() {
        let weak = estimate(&ParameterSet::baseline().with_hartmann(0.5));
        let strong = estimate(&ParameterSet::baseline().with_hartmann(4.0));

        assert!(strong.cf_final < weak.cf_final);
        assert!(strong.overshoot <= weak.overshoot);
        assert!(strong.tau_95 < weak.tau_95);
    }

    #[test]
    fn test_settling_exceeds_rise() {
        let guess = estimate(&ParameterSet::baseline());
        assert_relative_eq!(guess.settling_time / guess.tau_95, 4.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_insulated_wall_nusselt() {
        let guess = estimate(&ParameterSet::baseline().with_biot(0.0).with_eckert(0.0));
        assert_eq!(guess.nu_final, 0.0);
    }

    #[test]
    fn test_confidence_regimes() {
        let base = ParameterSet::baseline();
        assert_eq!(estimate(&base).confidence, Confidence::High);
        assert_eq!(estimate(&base.with_hartmann(7.0)).confidence, Confidence::Medium);
        assert_eq!(estimate(&base.with_slip(2.0)).confidence, Confidence::Low);
        assert_eq!(estimate(&base.with_eckert(1.5)).confidence, Confidence::Low);
    }
}
