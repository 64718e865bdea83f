pub mod callback;
pub mod config;
pub mod problem;
pub mod solvers;

pub use callback::{HistoryCallback, IterationResult, SilentCallback};
pub use config::IasConfig;
pub use problem::ObjectiveProblem;
pub use solvers::{generate_student, IasOptimizer, RunStatistics, School, TrainingOutcome};
pub use solvers::{OptimizationCallback, Problem, Solver, SolverResult};
