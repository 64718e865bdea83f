use super::solvers::traits::Problem;
use crate::core::{bounds_from_pairs, check_dimension, validate_bounds, Bound, Mark};
use crate::error::IasError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Strongly-typed objective paired with its search bounds.
///
/// The objective must be deterministic: a student's mark is computed once
/// when it enters the school and never re-evaluated.
pub struct ObjectiveProblem<F>
where
    F: Fn(&[f64]) -> f64,
{
    objective: F,
    bounds: Vec<Bound>,
    evaluations: AtomicUsize,
}

impl<F> ObjectiveProblem<F>
where
    F: Fn(&[f64]) -> f64,
{
    /// Fails fast on empty, non-finite or inverted bounds.
    pub fn new(objective: F, bounds: Vec<Bound>) -> Result<Self, IasError> {
        validate_bounds(&bounds)?;
        Ok(Self {
            objective,
            bounds,
            evaluations: AtomicUsize::new(0),
        })
    }

    pub fn from_pairs(objective: F, pairs: &[(f64, f64)]) -> Result<Self, IasError> {
        Self::new(objective, bounds_from_pairs(pairs))
    }

    /// Number of objective calls made so far
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }
}

impl<F> Problem for ObjectiveProblem<F>
where
    F: Fn(&[f64]) -> f64,
{
    fn cost(&self, params: &[f64]) -> Result<Mark, IasError> {
        check_dimension(&self.bounds, params)?;
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        Ok((self.objective)(params))
    }

    fn bounds(&self) -> &[Bound] {
        &self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_and_counts() {
        let problem =
            ObjectiveProblem::from_pairs(|x: &[f64]| x[0] + 2.0 * x[1], &[(0.0, 1.0), (0.0, 1.0)])
                .unwrap();
        assert_eq!(problem.num_params(), 2);
        assert_eq!(problem.cost(&[1.0, 2.0]).unwrap(), 5.0);
        assert_eq!(problem.cost(&[0.0, 0.0]).unwrap(), 0.0);
        assert_eq!(problem.evaluations(), 2);
    }

    #[test]
    fn wrong_dimension_is_rejected_without_calling_objective() {
        let problem = ObjectiveProblem::from_pairs(|x: &[f64]| x[1], &[(0.0, 1.0); 2]).unwrap();
        assert_eq!(
            problem.cost(&[0.5]),
            Err(IasError::DimensionMismatch {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(problem.evaluations(), 0);
    }

    #[test]
    fn malformed_bounds_fail_at_construction() {
        let result = ObjectiveProblem::from_pairs(|_: &[f64]| 0.0, &[(1.0, -1.0)]);
        assert!(matches!(
            result,
            Err(IasError::MalformedBound { dimension: 0, .. })
        ));
    }
}
