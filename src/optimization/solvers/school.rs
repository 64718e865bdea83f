//! Population state of the Interactive Autodidactic School and its three
//! interaction rules.
//!
//! Every mutation goes through [`School::accept_if_better`]: a candidate is
//! evaluated once and replaces the incumbent at a fixed index only on strict
//! improvement. Each rule re-reads the stored students at its start, so a
//! rule always works on the latest accepted state of `i`, its peer and the
//! leader.

use super::traits::Problem;
use crate::core::{validate_bounds, Bound, Mark, Student, MIN_STUDENTS};
use crate::error::IasError;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

/// Result of a pairwise training rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrainingOutcome {
    pub peer: usize,
    pub student_improved: bool,
    pub peer_improved: bool,
}

#[derive(Clone, Debug)]
pub struct School {
    students: Vec<Student>,
    marks: Vec<Mark>,
    evaluations: usize,
}

/// Uniform draw inside every bound
pub fn generate_student<R: Rng + ?Sized>(bounds: &[Bound], rng: &mut R) -> Student {
    bounds.iter().map(|bound| bound.sample(rng)).collect()
}

/// Intrinsic competence / collective capability: 1 or 2 with equal odds
fn draw_factor<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(1u8..=2))
}

/// `origin + r ⊙ (leader − factor · anchor)` with fresh `r ∈ [0, 1)` per coordinate
fn pull_toward<R: Rng + ?Sized>(
    origin: &[f64],
    leader: &[f64],
    anchor: &[f64],
    factor: f64,
    rng: &mut R,
) -> Student {
    origin
        .iter()
        .zip(leader)
        .zip(anchor)
        .map(|((&o, &l), &a)| o + rng.gen::<f64>() * (l - factor * a))
        .collect()
}

impl School {
    /// Draw `n_students` uniformly within the bounds, then mark every one
    pub fn initialize<R: Rng + ?Sized>(
        problem: &dyn Problem,
        n_students: usize,
        rng: &mut R,
    ) -> Result<Self, IasError> {
        let bounds = problem.bounds();
        validate_bounds(bounds)?;
        if n_students == 0 {
            return Err(IasError::EmptySchool);
        }

        let students: Vec<Student> = (0..n_students)
            .map(|_| generate_student(bounds, rng))
            .collect();

        let mut school = Self {
            students: Vec::with_capacity(n_students),
            marks: Vec::with_capacity(n_students),
            evaluations: 0,
        };
        for student in students {
            let mark = school.evaluate(problem, &student)?;
            school.students.push(student);
            school.marks.push(mark);
        }

        Ok(school)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn student(&self, index: usize) -> &[f64] {
        &self.students[index]
    }

    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn mark(&self, index: usize) -> Mark {
        self.marks[index]
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Objective evaluations performed through this school
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Index of the lowest mark; the first index wins ties.
    ///
    /// A NaN mark only leads when every mark is NaN; unlike a plain argmin,
    /// which would return the first NaN.
    pub fn current_leader(&self) -> Option<usize> {
        let mut leader: Option<usize> = None;
        for (index, &mark) in self.marks.iter().enumerate() {
            leader = match leader {
                None => Some(index),
                Some(best) => {
                    let incumbent = self.marks[best];
                    if mark < incumbent || (incumbent.is_nan() && !mark.is_nan()) {
                        Some(index)
                    } else {
                        Some(best)
                    }
                }
            };
        }
        leader
    }

    /// Replace the slot at `index` iff `mark` is strictly lower than the stored one.
    ///
    /// Ties and NaN candidates never replace.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn accept_if_better(&mut self, index: usize, candidate: Student, mark: Mark) -> bool {
        if mark < self.marks[index] {
            trace!(index, old = self.marks[index], new = mark, "accepted");
            self.students[index] = candidate;
            self.marks[index] = mark;
            true
        } else {
            false
        }
    }

    fn evaluate(&mut self, problem: &dyn Problem, candidate: &[f64]) -> Result<Mark, IasError> {
        self.evaluations += 1;
        problem.cost(candidate)
    }

    /// Uniform pick among all indices except `student` and `leader`
    pub fn choose_peer<R: Rng + ?Sized>(
        &self,
        student: usize,
        leader: usize,
        rng: &mut R,
    ) -> Result<usize, IasError> {
        let pool: Vec<usize> = (0..self.len())
            .filter(|&k| k != student && k != leader)
            .collect();
        pool.choose(rng).copied().ok_or(IasError::TooFewStudents {
            got: self.len(),
            min: MIN_STUDENTS,
        })
    }

    /// Individual training: `student` and a random peer each move toward the
    /// leader, scaled by their own intrinsic competence.
    pub fn individual_training<R: Rng + ?Sized>(
        &mut self,
        problem: &dyn Problem,
        student: usize,
        leader: usize,
        rng: &mut R,
    ) -> Result<TrainingOutcome, IasError> {
        let peer = self.choose_peer(student, leader, rng)?;
        let competence_i = draw_factor(rng);
        let competence_j = draw_factor(rng);

        let (candidate_i, candidate_j) = {
            let leader_coords = &self.students[leader];
            let t_i = &self.students[student];
            let t_j = &self.students[peer];
            (
                pull_toward(t_i, leader_coords, t_i, competence_i, rng),
                pull_toward(t_j, leader_coords, t_j, competence_j, rng),
            )
        };

        let mark_i = self.evaluate(problem, &candidate_i)?;
        let mark_j = self.evaluate(problem, &candidate_j)?;

        Ok(TrainingOutcome {
            peer,
            student_improved: self.accept_if_better(student, candidate_i, mark_i),
            peer_improved: self.accept_if_better(peer, candidate_j, mark_j),
        })
    }

    /// Collective training: the pair moves toward the leader relative to its
    /// capability-weighted average position.
    pub fn collective_training<R: Rng + ?Sized>(
        &mut self,
        problem: &dyn Problem,
        student: usize,
        peer: usize,
        leader: usize,
        rng: &mut R,
    ) -> Result<TrainingOutcome, IasError> {
        let capability_i = draw_factor(rng);
        let capability_j = draw_factor(rng);

        let (candidate_i, candidate_j) = {
            let leader_coords = &self.students[leader];
            let t_i = &self.students[student];
            let t_j = &self.students[peer];
            let collective: Vec<f64> = t_i
                .iter()
                .zip(t_j)
                .map(|(&a, &b)| (capability_i * a + capability_j * b) / (capability_i + capability_j))
                .collect();
            (
                pull_toward(t_i, leader_coords, &collective, capability_i, rng),
                pull_toward(t_j, leader_coords, &collective, capability_j, rng),
            )
        };

        let mark_i = self.evaluate(problem, &candidate_i)?;
        let mark_j = self.evaluate(problem, &candidate_j)?;

        Ok(TrainingOutcome {
            peer,
            student_improved: self.accept_if_better(student, candidate_i, mark_i),
            peer_improved: self.accept_if_better(peer, candidate_j, mark_j),
        })
    }

    /// Leader challenge: a fresh random newcomer is crossed coordinate-wise
    /// with the leader; the hybrid competes for the leader's own slot.
    pub fn leader_challenge<R: Rng + ?Sized>(
        &mut self,
        problem: &dyn Problem,
        leader: usize,
        rng: &mut R,
    ) -> Result<bool, IasError> {
        let newcomer = generate_student(problem.bounds(), rng);
        let challenger: Student = self.students[leader]
            .iter()
            .zip(&newcomer)
            .map(|(&l, &n)| if rng.gen_range(0u8..2) == 1 { l } else { n })
            .collect();

        let mark = self.evaluate(problem, &challenger)?;
        Ok(self.accept_if_better(leader, challenger, mark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::problem::ObjectiveProblem;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn assert_consistent(school: &School, objective: fn(&[f64]) -> f64) {
        for (student, &mark) in school.students().iter().zip(school.marks()) {
            assert_eq!(objective(student), mark);
        }
    }

    fn sphere_school(n: usize, seed: u64) -> (ObjectiveProblem<fn(&[f64]) -> f64>, School, StdRng) {
        let problem =
            ObjectiveProblem::from_pairs(sphere as fn(&[f64]) -> f64, &[(-10.0, 10.0); 3]).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let school = School::initialize(&problem, n, &mut rng).unwrap();
        (problem, school, rng)
    }

    #[test]
    fn initialize_marks_every_student_within_bounds() {
        let (problem, school, _) = sphere_school(8, 3);
        assert_eq!(school.len(), 8);
        assert_eq!(school.evaluations(), 8);
        assert_eq!(problem.evaluations(), 8);
        for student in school.students() {
            assert_eq!(student.len(), 3);
            assert!(student.iter().all(|&x| (-10.0..=10.0).contains(&x)));
        }
        assert_consistent(&school, sphere);
    }

    #[test]
    fn leader_is_first_minimum() {
        let mut school = School {
            students: vec![vec![0.0]; 4],
            marks: vec![3.0, 1.0, 1.0, 2.0],
            evaluations: 0,
        };
        assert_eq!(school.current_leader(), Some(1));

        school.marks = vec![f64::NAN, 4.0, f64::NAN, 4.0];
        assert_eq!(school.current_leader(), Some(1));

        school.marks = vec![f64::NAN; 4];
        assert_eq!(school.current_leader(), Some(0));

        school.students.clear();
        school.marks.clear();
        assert_eq!(school.current_leader(), None);
    }

    #[test]
    #[should_panic]
    fn out_of_range_slot_panics() {
        let (_, mut school, _) = sphere_school(3, 2);
        school.accept_if_better(3, vec![0.0; 3], -1.0);
    }

    #[test]
    fn accept_if_better_requires_strict_improvement() {
        let mut school = School {
            students: vec![vec![1.0, 1.0]],
            marks: vec![2.0],
            evaluations: 0,
        };

        assert!(!school.accept_if_better(0, vec![9.0, 9.0], 2.0));
        assert!(!school.accept_if_better(0, vec![9.0, 9.0], 5.0));
        assert!(!school.accept_if_better(0, vec![9.0, 9.0], f64::NAN));
        assert_eq!(school.student(0), &[1.0, 1.0]);
        assert_eq!(school.mark(0), 2.0);

        assert!(school.accept_if_better(0, vec![0.5, 0.5], 0.5));
        assert_eq!(school.student(0), &[0.5, 0.5]);
        assert_eq!(school.mark(0), 0.5);
    }

    #[test]
    fn peer_excludes_student_and_leader() {
        let (_, school, mut rng) = sphere_school(5, 11);
        for _ in 0..200 {
            let peer = school.choose_peer(2, 4, &mut rng).unwrap();
            assert!(peer != 2 && peer != 4 && peer < 5);
        }
        // Student is the leader: only one index is excluded.
        for _ in 0..200 {
            assert_ne!(school.choose_peer(0, 0, &mut rng).unwrap(), 0);
        }
    }

    #[test]
    fn peer_pool_empty_for_two_students() {
        let (_, school, mut rng) = sphere_school(2, 5);
        assert_eq!(
            school.choose_peer(0, 1, &mut rng),
            Err(IasError::TooFewStudents { got: 2, min: 3 })
        );
    }

    #[test]
    fn training_rules_keep_marks_consistent_and_never_worsen() {
        let (problem, mut school, mut rng) = sphere_school(6, 21);
        for round in 0..50 {
            let student = round % school.len();
            let leader = school.current_leader().unwrap();
            let before = school.marks().to_vec();

            let individual = school
                .individual_training(&problem, student, leader, &mut rng)
                .unwrap();
            assert_ne!(individual.peer, student);
            assert_ne!(individual.peer, leader);
            assert_consistent(&school, sphere);

            let collective = school
                .collective_training(&problem, student, individual.peer, leader, &mut rng)
                .unwrap();
            assert_eq!(collective.peer, individual.peer);
            assert_consistent(&school, sphere);

            school.leader_challenge(&problem, leader, &mut rng).unwrap();
            assert_consistent(&school, sphere);

            for (old, new) in before.iter().zip(school.marks()) {
                assert!(new <= old);
            }
        }
        assert_eq!(school.evaluations(), 6 + 50 * 5);
    }

    #[test]
    fn constant_objective_never_replaces() {
        let problem = ObjectiveProblem::from_pairs(|_: &[f64]| 1.0, &[(-1.0, 1.0); 2]).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let mut school = School::initialize(&problem, 4, &mut rng).unwrap();
        let snapshot = school.students().to_vec();

        let leader = school.current_leader().unwrap();
        let outcome = school.individual_training(&problem, 1, leader, &mut rng).unwrap();
        assert!(!outcome.student_improved && !outcome.peer_improved);
        let outcome = school
            .collective_training(&problem, 1, outcome.peer, leader, &mut rng)
            .unwrap();
        assert!(!outcome.student_improved && !outcome.peer_improved);
        assert!(!school.leader_challenge(&problem, leader, &mut rng).unwrap());

        assert_eq!(school.students(), snapshot.as_slice());
    }

    #[test]
    fn challenger_mixes_leader_and_newcomer_coordinates() {
        // The leader has drifted outside the bounds, so every coordinate of an
        // accepted challenger is either the leader's or a fresh in-bounds draw.
        let problem =
            ObjectiveProblem::from_pairs(|x: &[f64]| x.iter().sum::<f64>(), &[(0.0, 1.0); 4])
                .unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let mut school = School {
            students: vec![vec![5.0; 4], vec![7.5; 4], vec![8.0; 4]],
            marks: vec![20.0, 30.0, 32.0],
            evaluations: 0,
        };
        let leader = school.current_leader().unwrap();
        assert_eq!(leader, 0);

        let mut accepted = 0;
        for _ in 0..20 {
            let before = school.student(leader).to_vec();
            let before_mark = school.mark(leader);
            if school.leader_challenge(&problem, leader, &mut rng).unwrap() {
                accepted += 1;
                assert!(school.mark(leader) < before_mark);
                for (&after, &old) in school.student(leader).iter().zip(&before) {
                    assert!(after == old || (0.0..=1.0).contains(&after));
                }
            }
        }
        assert!(accepted > 0);
        assert_eq!(school.marks()[1], 30.0);
        assert_eq!(school.marks()[2], 32.0);
        assert_consistent(&school, |x| x.iter().sum::<f64>());
    }
}
