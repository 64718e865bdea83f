//! Minimizes a few benchmark objectives and prints the run summaries.
//!
//! `RUST_LOG=autodidactic=debug cargo run --example sphere` shows per-iteration leader marks.

use autodidactic::{benchmarks, minimize, IasConfig, IasOptimizer, ObjectiveProblem, RunStatistics};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), autodidactic::IasError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = IasConfig::new(20, 50).with_seed(2020).with_verbose(true);
    let result = minimize(benchmarks::sphere, &[(-10.0, 10.0); 2], config)?;
    println!("sphere: f(x) = {:.6e} at {:?}", result.cost, result.params);

    let problem = ObjectiveProblem::new(benchmarks::rastrigin, benchmarks::uniform_bounds(5, -5.12, 5.12))?;
    let optimizer = IasOptimizer::new(IasConfig::new(30, 200))?;
    println!("{}", optimizer);

    let seeds: Vec<u64> = (0..10).collect();
    let results = optimizer.solve_many(&problem, &seeds)?;
    if let Some(stats) = RunStatistics::from_results(&results) {
        println!(
            "rastrigin over {} runs: best {:.4e}, mean {:.4e}, worst {:.4e}, std {:.4e}",
            stats.runs, stats.best, stats.mean, stats.worst, stats.std_dev
        );
    }
    println!("objective evaluations: {}", problem.evaluations());

    Ok(())
}
