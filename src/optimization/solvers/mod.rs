mod ias;
pub mod school;
pub mod traits;

pub use ias::{IasOptimizer, RunStatistics};
pub use school::{generate_student, School, TrainingOutcome};
pub use traits::{OptimizationCallback, Problem, Solver, SolverResult};
