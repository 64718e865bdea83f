use super::types::Bound;
use crate::error::IasError;

/// Smallest school that still leaves a peer besides the current student and the leader.
pub const MIN_STUDENTS: usize = 3;

/// Validate the per-dimension search bounds
///
/// Every bound must be finite with `lower <= upper` and a finite width, and
/// at least one dimension must be present. Returns the first offending
/// dimension.
pub fn validate_bounds(bounds: &[Bound]) -> Result<(), IasError> {
    if bounds.is_empty() {
        return Err(IasError::EmptyBounds);
    }

    for (dimension, bound) in bounds.iter().enumerate() {
        if !bound.lower.is_finite() || !bound.upper.is_finite() {
            return Err(IasError::NonFiniteBound { dimension });
        }
        if bound.lower > bound.upper {
            return Err(IasError::MalformedBound {
                dimension,
                lower: bound.lower,
                upper: bound.upper,
            });
        }
        // Uniform sampling needs `upper - lower` to be representable.
        if !bound.width().is_finite() {
            return Err(IasError::BoundRangeOverflow { dimension });
        }
    }

    Ok(())
}

/// Validate population size and iteration budget
pub fn validate_school_size(n_students: usize, n_iterations: u32) -> Result<(), IasError> {
    if n_students < MIN_STUDENTS {
        return Err(IasError::TooFewStudents {
            got: n_students,
            min: MIN_STUDENTS,
        });
    }
    if n_iterations == 0 {
        return Err(IasError::ZeroIterations);
    }
    Ok(())
}

/// Check that a coordinate vector has one entry per bound
pub fn check_dimension(bounds: &[Bound], params: &[f64]) -> Result<(), IasError> {
    if params.len() != bounds.len() {
        return Err(IasError::DimensionMismatch {
            expected: bounds.len(),
            got: params.len(),
        });
    }
    Ok(())
}
