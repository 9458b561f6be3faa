//! Helper functions for integration tests

use nalgebra::DVector;
use nanocouette::physics::{ParameterSet, PhysicalModel, PhysicalQuantity, PhysicalState};
use nanocouette::solver::{DomainBoundaries, Scenario, WallBoundary};

/// Assert that one field of two states is close (within tolerance)
pub fn assert_fields_close(
    state1: &PhysicalState,
    state2: &PhysicalState,
    quantity: PhysicalQuantity,
    tolerance: f64,
    message: &str,
) {
    let vec1 = state1.get(quantity).expect("first state lacks the field");
    let vec2 = state2.get(quantity).expect("second state lacks the field");

    assert_eq!(vec1.len(), vec2.len(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in vec1.iter().zip(vec2.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Root mean square difference of the velocity and temperature fields
pub fn compute_l2_error(state1: &PhysicalState, state2: &PhysicalState) -> f64 {
    let mut sum_squared_diff = 0.0;
    let mut count = 0;

    for quantity in [PhysicalQuantity::Velocity, PhysicalQuantity::Temperature] {
        if let (Some(vec1), Some(vec2)) = (state1.get(quantity), state2.get(quantity)) {
            for (&v1, &v2) in vec1.iter().zip(vec2.iter()) {
                sum_squared_diff += (v1 - v2).powi(2);
                count += 1;
            }
        }
    }

    if count > 0 {
        (sum_squared_diff / count as f64).sqrt()
    } else {
        0.0
    }
}

/// Scenario without wall conditions, started from the model's initial state
pub fn create_free_scenario(model: Box<dyn PhysicalModel>) -> Scenario {
    let initial = model.setup_initial_state();
    let boundaries = DomainBoundaries::new(WallBoundary::new(), WallBoundary::new(), initial);
    Scenario::new(model, boundaries)
}

/// Linear Couette profile W(η) = η·Re/(1+λ)
pub fn couette_profile(params: &ParameterSet) -> DVector<f64> {
    let n = params.grid_resolution;
    DVector::from_fn(n + 1, |i, _| i as f64 / n as f64 * params.reynolds / (1.0 + params.slip))
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
