//! Uniform grid across the gap
//!
//! The channel is discretized on `N + 1` equally spaced nodes between the
//! lower plate (η = 0) and the upper plate (η = 1). This module also holds
//! the finite-difference and quadrature helpers shared by the model and the
//! diagnostics, so both always differentiate the same way.

use nalgebra::DVector;

/// Uniform 1D grid on [0, 1]
///
/// # Invariants
///
/// - `points() == resolution + 1`
/// - `node(0) == 0.0` and `node(resolution) == 1.0` exactly
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    resolution: usize,
    spacing: f64,
}

impl Grid {
    /// Create a grid with `resolution` intervals (N)
    ///
    /// # Panics
    ///
    /// Panics if `resolution == 0`. Callers at the solve boundary check this
    /// first and report a [`SolverError`](crate::solver::SolverError).
    pub fn new(resolution: usize) -> Self {
        assert!(resolution >= 1, "Grid needs at least one interval, got {}", resolution);
        Self {
            resolution,
            spacing: 1.0 / resolution as f64,
        }
    }

    /// Number of intervals N
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Number of nodes N + 1
    pub fn points(&self) -> usize {
        self.resolution + 1
    }

    /// Spacing h = 1/N
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Coordinate η_i
    ///
    /// Computed from the index (`i / N`) so the last node is exactly 1.
    pub fn node(&self, i: usize) -> f64 {
        i as f64 / self.resolution as f64
    }

    /// All node coordinates
    pub fn nodes(&self) -> DVector<f64> {
        DVector::from_fn(self.points(), |i, _| self.node(i))
    }

    /// First derivative at every node
    ///
    /// Central differences in the interior, first-order one-sided
    /// differences at both walls.
    pub fn derivative(&self, field: &DVector<f64>) -> DVector<f64> {
        let n = self.resolution;
        let h = self.spacing;
        let mut out = DVector::zeros(field.len());

        out[0] = (field[1] - field[0]) / h;
        out[n] = (field[n] - field[n - 1]) / h;
        for i in 1..n {
            out[i] = (field[i + 1] - field[i - 1]) / (2.0 * h);
        }

        out
    }

    /// Trapezoidal integral over [0, 1] of nodal values
    pub fn integrate(&self, values: &DVector<f64>) -> f64 {
        let n = self.resolution;
        let interior: f64 = (1..n).map(|i| values[i]).sum();
        self.spacing * (0.5 * (values[0] + values[n]) + interior)
    }

    /// Trapezoidal integral of g(f′) where f′ is the forward difference on
    /// each interval
    ///
    /// Every interval contributes `h * g((f[i+1] - f[i]) / h)`, the
    /// trapezoid of a quantity that is constant over the interval.
    pub fn integrate_forward_gradient<F>(&self, field: &DVector<f64>, g: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        let h = self.spacing;
        (0..self.resolution)
            .map(|i| h * g((field[i + 1] - field[i]) / h))
            .sum()
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
    fn test_grid_endpoints() {
        let grid = Grid::new(50);
        assert_eq!(grid.points(), 51);
        assert_eq!(grid.node(0), 0.0);
        assert_eq!(grid.node(50), 1.0);
        assert_relative_eq!(grid.spacing(), 0.02);
    }

    #[test]
    fn test_derivative_of_linear_profile_is_exact() {
        let grid = Grid::new(10);
        let field = grid.nodes().map(|eta| 3.0 * eta + 1.0);
        let derivative = grid.derivative(&field);

        for value in derivative.iter() {
            assert_relative_eq!(*value, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_boundary_derivatives_are_one_sided() {
        let grid = Grid::new(4);
        let field = DVector::from_vec(vec![0.0, 1.0, 4.0, 9.0, 16.0]);
        let derivative = grid.derivative(&field);

        // h = 0.25
        assert_relative_eq!(derivative[0], 4.0);
        assert_relative_eq!(derivative[4], 28.0);
        assert_relative_eq!(derivative[2], (9.0 - 1.0) / 0.5);
    }

    #[test]
    fn test_trapezoid_integrates_linear_exactly() {
        let grid = Grid::new(7);
        let field = grid.nodes();
        assert_relative_eq!(grid.integrate(&field), 0.5, epsilon = 1e-14);
    }

    #[test]
    fn test_forward_gradient_integral() {
        let grid = Grid::new(20);
        let field = grid.nodes().map(|eta| 2.0 * eta);
        let value = grid.integrate_forward_gradient(&field, |d| d * d);
        assert_relative_eq!(value, 4.0, epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "Grid needs at least one interval")]
    fn test_zero_resolution_panics() {
        Grid::new(0);
    }
}
