//! Standard test objectives for exercising the optimizer.
//!
//! All are minimization problems with known optima.

use crate::core::Bound;
use std::f64::consts::{E, PI};

/// Σ xᵢ², minimum 0 at the origin
pub fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

/// Banana valley, minimum 0 at (1, …, 1)
pub fn rosenbrock(x: &[f64]) -> f64 {
    x.windows(2)
        .map(|pair| 100.0 * (pair[1] - pair[0] * pair[0]).powi(2) + (1.0 - pair[0]).powi(2))
        .sum()
}

/// Lattice of local minima, global minimum 0 at the origin
pub fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64
        + x.iter()
            .map(|v| v * v - 10.0 * (2.0 * PI * v).cos())
            .sum::<f64>()
}

/// Minimum 0 at the origin
pub fn ackley(x: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let n = x.len() as f64;
    let mean_sq = x.iter().map(|v| v * v).sum::<f64>() / n;
    let mean_cos = x.iter().map(|v| (2.0 * PI * v).cos()).sum::<f64>() / n;
    -20.0 * (-0.2 * mean_sq.sqrt()).exp() - mean_cos.exp() + 20.0 + E
}

/// Minimum 0 at the origin
pub fn griewank(x: &[f64]) -> f64 {
    let sum = x.iter().map(|v| v * v).sum::<f64>() / 4000.0;
    let product: f64 = x
        .iter()
        .enumerate()
        .map(|(i, v)| (v / ((i + 1) as f64).sqrt()).cos())
        .product();
    sum - product + 1.0
}

/// Same `(lower, upper)` interval on every dimension
pub fn uniform_bounds(dimensions: usize, lower: f64, upper: f64) -> Vec<Bound> {
    vec![Bound::new(lower, upper); dimensions]
}
