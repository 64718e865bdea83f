//! Interactive Autodidactic School (IAS) optimizer.
//!
//! A population of students improves through individual training toward the
//! class leader, collective training with a peer, and newcomers challenging
//! the leader. Lower marks are better.
//!
//! ```
//! use autodidactic::{benchmarks, minimize, IasConfig};
//!
//! let result = minimize(
//!     benchmarks::sphere,
//!     &[(-10.0, 10.0), (-10.0, 10.0)],
//!     IasConfig::new(10, 30).with_seed(7),
//! )
//! .unwrap();
//! assert_eq!(result.trace.len(), 30);
//! assert!(result.cost < 1.0);
//! ```

pub mod benchmarks;
mod core;
mod error;
mod optimization;
#[cfg(feature = "python")]
mod python;

pub use self::core::*;
pub use error::IasError;
pub use optimization::*;

/// Minimize `objective` over `bounds` with a single IAS run.
///
/// When `config.verbose` is set, progress is printed each iteration and a
/// summary at the end.
pub fn minimize<F>(
    objective: F,
    bounds: &[(f64, f64)],
    config: IasConfig,
) -> Result<SolverResult, IasError>
where
    F: Fn(&[f64]) -> f64,
{
    let problem = ObjectiveProblem::from_pairs(objective, bounds)?;
    let verbose = config.verbose;
    let mut optimizer = IasOptimizer::new(config)?;
    let mut callback = HistoryCallback::new(verbose);

    let result = optimizer.solve(&problem, &mut callback)?;
    if verbose {
        callback.print_summary();
    }
    Ok(result)
}
