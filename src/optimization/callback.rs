use super::solvers::traits::OptimizationCallback;
use crate::core::Mark;
use crate::error::IasError;

/// Leader snapshot at the end of one iteration
#[derive(Debug, Clone, PartialEq)]
pub struct IterationResult {
    pub iteration: u32,
    pub params: Vec<f64>,
    pub cost: Mark,
}

/// Callback for tracking and displaying optimization progress
pub struct HistoryCallback {
    verbose: bool,
    history: Vec<IterationResult>,
}

impl HistoryCallback {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            history: Vec::new(),
        }
    }

    /// Get iteration history
    pub fn history(&self) -> &[IterationResult] {
        &self.history
    }

    fn print_iteration(&self, iteration: u32, params: &[f64], cost: Mark) {
        if !self.verbose {
            return;
        }

        println!("Iter {:4}: f(x) = {:.6e}", iteration, cost);
        for (i, value) in params.iter().enumerate() {
            println!("  x[{}] = {:>14.6e}", i, value);
        }
    }

    /// Print optimization summary
    pub fn print_summary(&self) {
        println!("\n{}", "=".repeat(80));
        println!("OPTIMIZATION SUMMARY");
        println!("{}", "=".repeat(80));

        println!("Total Iterations: {}", self.history.len());

        if let Some(final_result) = self.history.last() {
            println!("\nFinal f(x): {:.6e}", final_result.cost);
            println!("\nBest Student:");
            for (i, value) in final_result.params.iter().enumerate() {
                println!("  x[{}] = {:.6e}", i, value);
            }
        }

        println!("\nIteration History:");
        println!("{:<8} {:<20}", "Iter", "f(x)");
        println!("{}", "-".repeat(30));
        for result in &self.history {
            println!("{:<8} {:<20.6e}", result.iteration, result.cost);
        }

        println!("\n{}\n", "=".repeat(80));
    }
}

impl OptimizationCallback for HistoryCallback {
    fn on_iteration(&mut self, iteration: u32, params: &[f64], cost: Mark) -> Result<(), IasError> {
        self.history.push(IterationResult {
            iteration,
            params: params.to_vec(),
            cost,
        });
        self.print_iteration(iteration, params, cost);
        Ok(())
    }
}

/// Callback that ignores progress
pub struct SilentCallback;

impl OptimizationCallback for SilentCallback {
    fn on_iteration(&mut self, _iteration: u32, _params: &[f64], _cost: Mark) -> Result<(), IasError> {
        Ok(())
    }
}
