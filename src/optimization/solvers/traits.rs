use crate::core::{Bound, Mark, Trace};
use crate::error::IasError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolverResult {
    /// Best mark found (the final leader's mark)
    pub cost: Mark,
    /// Coordinates of the final leader
    pub params: Vec<f64>,
    pub iterations: u32,
    pub cost_evals: usize,
    pub trace: Trace,
    pub message: String,
}

/// Callback interface for optimization progress
pub trait OptimizationCallback {
    /// Called once per completed iteration with the leader's coordinates and mark
    fn on_iteration(&mut self, iteration: u32, params: &[f64], cost: Mark) -> Result<(), IasError>;
}

/// Core problem definition - just the essentials
pub trait Problem {
    /// Evaluate the objective for given coordinates
    fn cost(&self, params: &[f64]) -> Result<Mark, IasError>;

    /// Search bounds, one per design dimension
    fn bounds(&self) -> &[Bound];

    /// Number of design dimensions
    fn num_params(&self) -> usize {
        self.bounds().len()
    }
}

/// Solver interface - takes problem and callback
pub trait Solver {
    fn name(&self) -> &str;

    /// Solve the optimization problem with callback for progress tracking
    fn solve(
        &mut self,
        problem: &dyn Problem,
        callback: &mut dyn OptimizationCallback,
    ) -> Result<SolverResult, IasError>;
}

// ============================================================================
// GUIDE: PLUGGING IN AN OBJECTIVE
// ============================================================================
//
// Closures go through `ObjectiveProblem`, which validates bounds and checks
// dimensionality on every call. Implement `Problem` directly only when the
// objective can fail (a foreign callable, an external simulator):
//
//    struct Remote { bounds: Vec<Bound> }
//
//    impl Problem for Remote {
//        fn cost(&self, params: &[f64]) -> Result<f64, IasError> {
//            query(params).map_err(|e| IasError::Objective(e.to_string()))
//        }
//        fn bounds(&self) -> &[Bound] {
//            &self.bounds
//        }
//    }
//
// NOTES:
//    - cost() must be pure: marks are cached per student and never recomputed
//    - returning NaN is allowed; such candidates are simply never accepted
//    - an Err from cost() or from a callback aborts the run
//
// ============================================================================
