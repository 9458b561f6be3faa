//! Post-processing of a solved trajectory
//!
//! Turns a [`SimulationResult`] into the scalar [`MetricsRecord`], the
//! per-node [`EntropyProfile`] of the terminal state, and the energy
//! integrals of every sample.
//!
//! # Transient response
//!
//! All response metrics come from the lower-wall skin-friction history
//! Cf(τ). With Cf_f the last recorded value:
//!
//! | Metric    | Definition                                                     |
//! |-----------|----------------------------------------------------------------|
//! | τ₆₃, τ₉₅  | first sample with \|Cf\| ≥ 0.63 / 0.95·\|Cf_f\| (else τ_f)         |
//! | overshoot | max(0, (max\|Cf\| − \|Cf_f\|) / \|Cf_f\|)·100                        |
//! | peak time | τ of max\|Cf\|                                                   |
//! | settling  | scanning back from the end, last τ still inside the 2 % band   |
//!
//! Settling time stops at the first excursion met from the tail. A signal
//! that leaves and re-enters the band earlier is not inspected further.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::physics::{Grid, ParameterSet, PhysicalQuantity, PhysicalState};
use crate::solver::{SimulationResult, SolverError};

/// Floor on Θ in the entropy terms
pub const TEMPERATURE_FLOOR: f64 = 0.01;

/// Guard added to / floored on denominators
pub const DENOMINATOR_EPSILON: f64 = 1e-12;

/// Overshoot (%) above which a response is underdamped
pub const UNDERDAMPED_OVERSHOOT: f64 = 5.0;

/// Overshoot (%) above which a response is critically damped
pub const CRITICAL_OVERSHOOT: f64 = 0.5;

/// Relative band of the settling time
pub const SETTLING_BAND: f64 = 0.02;

// =================================================================================================
// Records
// =================================================================================================

/// Damping character of the skin-friction response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DampingClass {
    Underdamped,
    CriticallyDamped,
    Overdamped,
}

impl DampingClass {
    /// Classify from an overshoot percentage
    pub fn from_overshoot(overshoot: f64) -> Self {
        if overshoot > UNDERDAMPED_OVERSHOOT {
            DampingClass::Underdamped
        } else if overshoot > CRITICAL_OVERSHOOT {
            DampingClass::CriticallyDamped
        } else {
            DampingClass::Overdamped
        }
    }
}

impl std::fmt::Display for DampingClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DampingClass::Underdamped => "Underdamped",
            DampingClass::CriticallyDamped => "CriticallyDamped",
            DampingClass::Overdamped => "Overdamped",
        };
        f.pad(label)
    }
}

/// Scalar summary of one solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Lower-wall skin friction at the last sample
    pub cf_final: f64,
    /// Lower-wall Nusselt number at the last sample
    pub nu_final: f64,
    pub tau_63: f64,
    pub tau_95: f64,
    /// Percent
    pub overshoot: f64,
    pub settling_time: f64,
    pub peak_time: f64,
    pub max_velocity: f64,
    pub min_velocity: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub damping: DampingClass,
    /// Node average of Ns on the terminal state
    pub average_entropy: f64,
    /// Node average of Be on the terminal state
    pub average_bejan: f64,
    /// Worst accepted fixed-point residual of the run
    pub max_residual: f64,
}

/// Entropy generation per node
#[derive(Debug, Clone, PartialEq)]
pub struct EntropyProfile {
    /// A3·(Θ′)²/Θ_s²
    pub heat: DVector<f64>,
    /// A1·Ec·Pr·(W′)²/Θ_s
    pub fluid: DVector<f64>,
    /// A2·Ec·Pr·Ha²·W²/Θ_s
    pub magnetic: DVector<f64>,
    /// Sum of the three
    pub total: DVector<f64>,
    /// heat / (total + ε)
    pub bejan: DVector<f64>,
}

impl EntropyProfile {
    pub fn average_entropy(&self) -> f64 {
        self.total.mean()
    }

    pub fn average_bejan(&self) -> f64 {
        self.bejan.mean()
    }
}

/// Energy integrals at one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySample {
    pub tau: f64,
    /// ∫ ½W² dη
    pub kinetic: f64,
    /// ∫ Θ dη
    pub thermal: f64,
    /// ∫ A1·Pr·Ec·(W′)² dη, forward differences
    pub viscous_dissipation: f64,
    /// ∫ A2·Pr·Ec·Ha²·W² dη
    pub joule_heating: f64,
}

// =================================================================================================
// Entropy and energy
// =================================================================================================

fn fields(state: &PhysicalState) -> Result<(&DVector<f64>, &DVector<f64>), SolverError> {
    let w = state
        .get(PhysicalQuantity::Velocity)
        .ok_or(SolverError::MissingQuantity(PhysicalQuantity::Velocity))?;
    let theta = state
        .get(PhysicalQuantity::Temperature)
        .ok_or(SolverError::MissingQuantity(PhysicalQuantity::Temperature))?;

    if w.len() != theta.len() || w.len() < 2 {
        return Err(SolverError::InvalidInput(format!(
            "Fields of {} and {} nodes cannot be post-processed",
            w.len(),
            theta.len()
        )));
    }
    Ok((w, theta))
}

/// Entropy generation of a state
pub fn entropy_profile(params: &ParameterSet, state: &PhysicalState) -> Result<EntropyProfile, SolverError> {
    let (w, theta) = fields(state)?;
    let grid = Grid::new(w.len() - 1);
    let dw = grid.derivative(w);
    let dtheta = grid.derivative(theta);

    let theta_safe = theta.map(|t| t.max(TEMPERATURE_FLOOR));
    let fluid_coefficient = params.a1 * params.eckert * params.prandtl;
    let magnetic_coefficient = params.a2 * params.eckert * params.prandtl * params.hartmann * params.hartmann;

    let n = w.len();
    let heat = DVector::from_fn(n, |i, _| params.a3 * dtheta[i] * dtheta[i] / (theta_safe[i] * theta_safe[i]));
    let fluid = DVector::from_fn(n, |i, _| fluid_coefficient * dw[i] * dw[i] / theta_safe[i]);
    let magnetic = DVector::from_fn(n, |i, _| magnetic_coefficient * w[i] * w[i] / theta_safe[i]);
    let total = &heat + &fluid + &magnetic;
    let bejan = heat.zip_map(&total, |h, t| h / (t + DENOMINATOR_EPSILON));

    Ok(EntropyProfile { heat, fluid, magnetic, total, bejan })
}

/// Energy integrals of one state
pub fn energy_sample(params: &ParameterSet, tau: f64, state: &PhysicalState) -> Result<EnergySample, SolverError> {
    let (w, theta) = fields(state)?;
    let grid = Grid::new(w.len() - 1);

    let kinetic = grid.integrate(&w.map(|v| 0.5 * v * v));
    let thermal = grid.integrate(theta);

    let viscous_coefficient = params.a1 * params.prandtl * params.eckert;
    let viscous_dissipation = grid.integrate_forward_gradient(w, |d| viscous_coefficient * d * d);

    let joule_coefficient = params.a2 * params.prandtl * params.eckert * params.hartmann * params.hartmann;
    let joule_heating = grid.integrate(&w.map(|v| joule_coefficient * v * v));

    Ok(EnergySample { tau, kinetic, thermal, viscous_dissipation, joule_heating })
}

/// Energy integrals at every sample of a trajectory
pub fn energy_history(params: &ParameterSet, result: &SimulationResult) -> Result<Vec<EnergySample>, SolverError> {
    result
        .samples
        .iter()
        .map(|sample| energy_sample(params, sample.tau, &sample.state))
        .collect()
}

// =================================================================================================
// Transient response
// =================================================================================================

/// Response metrics of a sampled signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseMetrics {
    pub tau_63: f64,
    pub tau_95: f64,
    pub overshoot: f64,
    pub peak_time: f64,
    pub settling_time: f64,
}

/// Response metrics of `values` sampled at `times`
///
/// `final_time` is the fallback for thresholds that are never reached and
/// for a signal that is outside the settling band at its last sample.
pub fn response_metrics(times: &[f64], values: &[f64], final_time: f64) -> ResponseMetrics {
    let Some(&last) = values.last() else {
        return ResponseMetrics {
            tau_63: final_time,
            tau_95: final_time,
            overshoot: 0.0,
            peak_time: final_time,
            settling_time: final_time,
        };
    };

    let target = last.abs();
    let scale = target.max(DENOMINATOR_EPSILON);

    let first_reaching = |fraction: f64| {
        times
            .iter()
            .zip(values)
            .find(|(_, v)| v.abs() >= fraction * target)
            .map_or(final_time, |(t, _)| *t)
    };
    let tau_63 = first_reaching(0.63);
    let tau_95 = first_reaching(0.95);

    // First maximum wins on ties
    let (peak_index, peak) = values
        .iter()
        .map(|v| v.abs())
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |best, (i, v)| if v > best.1 { (i, v) } else { best });
    let overshoot = ((peak - target) / scale * 100.0).max(0.0);
    let peak_time = times[peak_index];

    let mut settling_time = final_time;
    for i in (0..values.len()).rev() {
        if (values[i] - last).abs() / scale > SETTLING_BAND {
            break;
        }
        settling_time = times[i];
    }

    ResponseMetrics { tau_63, tau_95, overshoot, peak_time, settling_time }
}

// =================================================================================================
// Metrics record
// =================================================================================================

/// Summarize a trajectory
///
/// # Errors
///
/// [`SolverError::InvalidInput`] for an empty trajectory,
/// [`SolverError::MissingQuantity`] when the terminal state lacks a field.
pub fn metrics(params: &ParameterSet, result: &SimulationResult) -> Result<MetricsRecord, SolverError> {
    let last = result
        .samples
        .last()
        .ok_or_else(|| SolverError::InvalidInput("Trajectory has no samples".to_string()))?;

    let times = result.time_points();
    let skin_friction = result.skin_friction_history();
    let response = response_metrics(&times, &skin_friction, result.final_time());

    let terminal = &result.final_state;
    let (w, theta) = fields(terminal)?;
    let entropy = entropy_profile(params, terminal)?;

    Ok(MetricsRecord {
        cf_final: last.fluxes.skin_friction_lower,
        nu_final: last.fluxes.nusselt_lower,
        tau_63: response.tau_63,
        tau_95: response.tau_95,
        overshoot: response.overshoot,
        settling_time: response.settling_time,
        peak_time: response.peak_time,
        max_velocity: w.max(),
        min_velocity: w.min(),
        max_temperature: theta.max(),
        min_temperature: theta.min(),
        damping: DampingClass::from_overshoot(response.overshoot),
        average_entropy: entropy.average_entropy(),
        average_bejan: entropy.average_bejan(),
        max_residual: result.max_residual(),
    })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state(w: Vec<f64>, theta: Vec<f64>) -> PhysicalState {
        PhysicalState::new(PhysicalQuantity::Velocity, DVector::from_vec(w))
            .with(PhysicalQuantity::Temperature, DVector::from_vec(theta))
    }

    #[test]
    fn test_damping_thresholds() {
        assert_eq!(DampingClass::from_overshoot(12.0), DampingClass::Underdamped);
        assert_eq!(DampingClass::from_overshoot(5.0), DampingClass::CriticallyDamped);
        assert_eq!(DampingClass::from_overshoot(0.6), DampingClass::CriticallyDamped);
        assert_eq!(DampingClass::from_overshoot(0.5), DampingClass::Overdamped);
        assert_eq!(DampingClass::from_overshoot(0.0), DampingClass::Overdamped);
    }

    #[test]
    fn test_monotone_rise() {
        let times = [0.1, 0.2, 0.3, 0.4, 0.5];
        let values = [0.2, 0.5, 0.7, 0.96, 1.0];
        let response = response_metrics(&times, &values, 0.5);

        assert_eq!(response.tau_63, 0.3);
        assert_eq!(response.tau_95, 0.4);
        assert_eq!(response.overshoot, 0.0);
        assert_eq!(response.peak_time, 0.5);
        // 0.96 is outside the 2 % band, so only the last sample counts
        assert_eq!(response.settling_time, 0.5);
    }

    #[test]
    fn test_overshooting_response() {
        let times = [1.0, 2.0, 3.0, 4.0];
        let values = [0.5, 1.2, 0.99, 1.0];
        let response = response_metrics(&times, &values, 4.0);

        assert_relative_eq!(response.overshoot, 20.0, epsilon = 1e-10);
        assert_eq!(response.peak_time, 2.0);
        assert_eq!(response.settling_time, 3.0);
    }

    #[test]
    fn test_settling_scan_stops_at_first_excursion_from_tail() {
        // inside, outside, inside, outside, inside...
        let times = [1.0, 2.0, 3.0, 4.0, 5.0];
        let values = [1.0, 1.5, 1.0, 0.9, 1.0];
        let response = response_metrics(&times, &values, 5.0);

        assert_eq!(response.settling_time, 5.0);
    }

    #[test]
    fn test_negative_signal_uses_magnitudes() {
        let times = [1.0, 2.0];
        let values = [-0.7, -1.0];
        let response = response_metrics(&times, &values, 2.0);

        assert_eq!(response.tau_63, 1.0);
        assert_eq!(response.tau_95, 2.0);
    }

    #[test]
    fn test_empty_signal_defaults() {
        let response = response_metrics(&[], &[], 3.0);
        assert_eq!(response.tau_95, 3.0);
        assert_eq!(response.settling_time, 3.0);
    }

    #[test]
    fn test_entropy_floor_and_bejan() {
        let params = ParameterSet::baseline();
        // Θ = 0 at the upper wall is floored to 0.01
        let profile = entropy_profile(&params, &state(vec![0.0, 0.0, 0.0], vec![1.0, 0.5, 0.0])).unwrap();

        assert!(profile.total.iter().all(|v| v.is_finite()));
        // no motion: all entropy from conduction
        assert_eq!(profile.fluid.sum(), 0.0);
        assert_eq!(profile.magnetic.sum(), 0.0);
        // heat / (heat + 1e-12)
        assert_relative_eq!(profile.bejan[1], 1.0, epsilon = 1e-9);
        assert_relative_eq!(profile.heat[2], params.a3 * 1.0 / (0.01 * 0.01), epsilon = 1e-9);
    }

    #[test]
    fn test_isothermal_rest_has_zero_bejan() {
        let params = ParameterSet::baseline();
        let profile = entropy_profile(&params, &state(vec![0.0; 4], vec![1.0; 4])).unwrap();

        assert_eq!(profile.average_entropy(), 0.0);
        assert_eq!(profile.average_bejan(), 0.0);
    }

    #[test]
    fn test_energy_integrals_of_linear_profile() {
        let params = ParameterSet::baseline();
        let n = 10;
        let eta: Vec<f64> = (0..=n).map(|i| i as f64 / n as f64).collect();
        let sample = energy_sample(&params, 0.5, &state(eta.clone(), vec![1.0; n + 1])).unwrap();

        assert_eq!(sample.tau, 0.5);
        assert_relative_eq!(sample.thermal, 1.0, epsilon = 1e-12);
        // trapezoid of ½η² over 10 intervals: 1/6 + h²/12
        assert_relative_eq!(sample.kinetic, 1.0 / 6.0 + 0.01 / 12.0, epsilon = 1e-12);
        assert_relative_eq!(
            sample.viscous_dissipation,
            params.a1 * params.prandtl * params.eckert,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_missing_field() {
        let params = ParameterSet::baseline();
        let only_velocity = PhysicalState::new(PhysicalQuantity::Velocity, DVector::zeros(3));

        assert_eq!(
            entropy_profile(&params, &only_velocity).unwrap_err(),
            SolverError::MissingQuantity(PhysicalQuantity::Temperature)
        );
    }

    #[test]
    fn test_metrics_of_empty_result() {
        let result = SimulationResult::new(Vec::new(), PhysicalState::empty());
        assert!(matches!(
            metrics(&ParameterSet::baseline(), &result),
            Err(SolverError::InvalidInput(_))
        ));
    }
}
