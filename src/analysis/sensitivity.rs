//! One-at-a-time sensitivity of the quick solve
//!
//! Every parameter of [`Parameter::SENSITIVITY`] is raised by 10 % in turn
//! and the normalized elasticity
//!
//! ```text
//! E = (Δy / (|y| + ε)) / (Δp / (|p| + ε)),   ε = 1e-12
//! ```
//!
//! is reported for τ₉₅, Cf_final and Nu_final. A parameter that is exactly
//! zero cannot be perturbed multiplicatively and reports 0 for every output.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::diagnostics::{DENOMINATOR_EPSILON, MetricsRecord};
use crate::analysis::quick_solve;
use crate::physics::{Parameter, ParameterSet};
use crate::solver::SolverError;

/// Relative upward perturbation applied to each parameter
pub const PERTURBATION: f64 = 0.10;

/// Elasticities of the three tracked outputs to one parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Elasticity {
    pub parameter: Parameter,
    pub tau_95: f64,
    pub cf_final: f64,
    pub nu_final: f64,
}

/// Baseline metrics and one [`Elasticity`] per perturbed parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityReport {
    pub baseline: MetricsRecord,
    /// Same order as [`Parameter::SENSITIVITY`]
    pub entries: Vec<Elasticity>,
}

impl SensitivityReport {
    pub fn get(&self, parameter: Parameter) -> Option<&Elasticity> {
        self.entries.iter().find(|e| e.parameter == parameter)
    }
}

fn elasticity(base_output: f64, perturbed_output: f64, base_param: f64, perturbed_param: f64) -> f64 {
    let relative_output = (perturbed_output - base_output) / (base_output.abs() + DENOMINATOR_EPSILON);
    let relative_param = (perturbed_param - base_param) / (base_param.abs() + DENOMINATOR_EPSILON);
    relative_output / relative_param
}

fn perturb(base: &ParameterSet, baseline: &MetricsRecord, parameter: Parameter) -> Result<Elasticity, SolverError> {
    let value = base.get(parameter);
    if value == 0.0 {
        return Ok(Elasticity { parameter, tau_95: 0.0, cf_final: 0.0, nu_final: 0.0 });
    }

    let raised = value * (1.0 + PERTURBATION);
    let perturbed = quick_solve(&base.with(parameter, raised))?;

    debug!(
        "{} {} -> {}: τ95 {:.4} -> {:.4}",
        parameter, value, raised, baseline.tau_95, perturbed.tau_95
    );

    Ok(Elasticity {
        parameter,
        tau_95: elasticity(baseline.tau_95, perturbed.tau_95, value, raised),
        cf_final: elasticity(baseline.cf_final, perturbed.cf_final, value, raised),
        nu_final: elasticity(baseline.nu_final, perturbed.nu_final, value, raised),
    })
}

/// Run the baseline and the six perturbed quick solves
///
/// # Errors
///
/// The first [`SolverError`] of any solve, typically an invalid base set.
///
/// # Example
///
/// ```rust,no_run
/// use nanocouette::analysis::sensitivity::analyze;
/// use nanocouette::physics::{Parameter, ParameterSet};
///
/// let report = analyze(&ParameterSet::baseline())?;
/// let ha = report.get(Parameter::Hartmann).unwrap();
/// assert!(ha.cf_final < 0.0);
/// # Ok::<(), nanocouette::solver::SolverError>(())
/// ```
pub fn analyze(base: &ParameterSet) -> Result<SensitivityReport, SolverError> {
    let baseline = quick_solve(base)?;

    #[cfg(feature = "parallel")]
    let entries = Parameter::SENSITIVITY
        .par_iter()
        .map(|&p| perturb(base, &baseline, p))
        .collect::<Result<Vec<_>, _>>()?;

    #[cfg(not(feature = "parallel"))]
    let entries = Parameter::SENSITIVITY
        .iter()
        .map(|&p| perturb(base, &baseline, p))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SensitivityReport { baseline, entries })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_elasticity_of_linear_response() {
        // y ∝ p  =>  E = 1
        assert_relative_eq!(elasticity(2.0, 2.2, 1.0, 1.1), 1.0, epsilon = 1e-9);
        // y ∝ 1/p  =>  E = (1/1.1 - 1) / 0.1
        assert_relative_eq!(elasticity(1.0, 1.0 / 1.1, 1.0, 1.1), (1.0 / 1.1 - 1.0) / 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_elasticity_of_zero_output_is_finite() {
        let e = elasticity(0.0, 0.0, 1.0, 1.1);
        assert_eq!(e, 0.0);
    }

    #[test]
    fn test_zero_parameter_reports_zero() {
        let base = ParameterSet::baseline().with_eckert(0.0);
        let baseline = quick_solve(&base).unwrap();
        let entry = perturb(&base, &baseline, Parameter::Eckert).unwrap();

        assert_eq!(entry.tau_95, 0.0);
        assert_eq!(entry.cf_final, 0.0);
        assert_eq!(entry.nu_final, 0.0);
    }

    #[test]
    fn test_report_covers_every_parameter_in_order() {
        let report = analyze(&ParameterSet::baseline().with_grid_resolution(16)).unwrap();

        let order: Vec<Parameter> = report.entries.iter().map(|e| e.parameter).collect();
        assert_eq!(order, Parameter::SENSITIVITY.to_vec());
        assert!(report.entries.iter().all(|e| e.cf_final.is_finite() && e.nu_final.is_finite()));
    }

    #[test]
    fn test_reynolds_scales_skin_friction() {
        let base = ParameterSet::baseline().with_pressure_gradient(0.0).with_grid_resolution(16);
        let report = analyze(&base).unwrap();
        let re = report.get(Parameter::Reynolds).unwrap();

        // Without a pressure gradient the momentum problem is linear in Re
        assert_relative_eq!(re.cf_final, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_invalid_base_propagates() {
        let base = ParameterSet::baseline().with_prandtl(0.0);
        assert!(matches!(analyze(&base), Err(SolverError::InvalidInput(_))));
    }
}
