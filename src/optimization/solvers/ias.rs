use super::school::School;
use super::traits::{OptimizationCallback, Problem, Solver, SolverResult};
use crate::core::Trace;
use crate::error::IasError;
use crate::optimization::callback::SilentCallback;
use crate::optimization::config::IasConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, info, trace};

/// Interactive Autodidactic School optimizer.
///
/// Each iteration sweeps the whole school. For every student the leader is
/// looked up again, then the student trains individually and collectively
/// with a random peer, and a newcomer challenges the leader. All three rules
/// only ever replace a slot on strict improvement.
#[derive(Clone, Debug)]
pub struct IasOptimizer {
    config: IasConfig,
}

impl IasOptimizer {
    /// Fails fast on a school too small for peer selection or an empty budget.
    pub fn new(config: IasConfig) -> Result<Self, IasError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IasConfig {
        &self.config
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Independent seeded runs, executed in parallel. Results follow `seeds` order.
    pub fn solve_many(
        &self,
        problem: &(dyn Problem + Sync),
        seeds: &[u64],
    ) -> Result<Vec<SolverResult>, IasError> {
        self.config.validate()?;
        seeds
            .par_iter()
            .map(|&seed| {
                let mut optimizer = self.clone().with_seed(seed);
                optimizer.solve(problem, &mut SilentCallback)
            })
            .collect()
    }
}

impl fmt::Display for IasOptimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IAS optimizer with {} students and {} iterations",
            self.config.n_students, self.config.n_iterations
        )
    }
}

impl Solver for IasOptimizer {
    fn name(&self) -> &str {
        "IAS"
    }

    fn solve(
        &mut self,
        problem: &dyn Problem,
        callback: &mut dyn OptimizationCallback,
    ) -> Result<SolverResult, IasError> {
        self.config.validate()?;
        let n_students = self.config.n_students;
        let n_iterations = self.config.n_iterations;
        let mut rng = self.rng();

        info!(
            n_students,
            n_iterations,
            dimensions = problem.num_params(),
            seed = ?self.config.seed,
            "starting IAS optimization"
        );

        let mut school = School::initialize(problem, n_students, &mut rng)?;
        let mut history = Trace::with_capacity(n_iterations as usize);

        for iteration in 1..=n_iterations {
            for student in 0..n_students {
                let leader = school.current_leader().ok_or(IasError::EmptySchool)?;

                let individual = school.individual_training(problem, student, leader, &mut rng)?;
                let collective = school.collective_training(
                    problem,
                    student,
                    individual.peer,
                    leader,
                    &mut rng,
                )?;
                let challenged = school.leader_challenge(problem, leader, &mut rng)?;

                trace!(
                    iteration,
                    student,
                    leader,
                    peer = individual.peer,
                    individual = individual.student_improved || individual.peer_improved,
                    collective = collective.student_improved || collective.peer_improved,
                    challenged,
                    "student step"
                );
            }

            let leader = school.current_leader().ok_or(IasError::EmptySchool)?;
            let mark = school.mark(leader);
            history.record(iteration, mark);
            debug!(iteration, leader, mark, "iteration complete");

            callback.on_iteration(iteration, school.student(leader), mark)?;
        }

        let leader = school.current_leader().ok_or(IasError::EmptySchool)?;
        let cost = school.mark(leader);
        let params = school.student(leader).to_vec();
        info!(
            cost,
            evaluations = school.evaluations(),
            "Done! f(x) = {:.6e} for x = {:?}",
            cost,
            params
        );

        Ok(SolverResult {
            cost,
            params,
            iterations: n_iterations,
            cost_evals: school.evaluations(),
            trace: history,
            message: "Max iterations reached".into(),
        })
    }
}

/// Spread of final marks over independent runs
#[derive(Clone, Debug, PartialEq)]
pub struct RunStatistics {
    pub runs: usize,
    pub best: f64,
    pub worst: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl RunStatistics {
    /// `None` when there are no results
    pub fn from_results(results: &[SolverResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }

        let costs: Vec<f64> = results.iter().map(|r| r.cost).collect();
        let runs = costs.len();
        let mean = costs.iter().sum::<f64>() / runs as f64;
        let variance = costs.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / runs as f64;

        Some(Self {
            runs,
            best: costs.iter().copied().fold(f64::INFINITY, f64::min),
            worst: costs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean,
            std_dev: variance.sqrt(),
        })
    }
}
