use rand::Rng;
use serde::{Deserialize, Serialize};

// ===== SCALARS =====

/// Objective value of a student. Lower is better.
pub type Mark = f64;

/// One candidate point, one coordinate per design dimension.
pub type Student = Vec<f64>;

// ===== BOUNDS =====

/// Closed search interval for one design dimension.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
}

impl Bound {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Uniform draw inside the interval. The bound must already be validated.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.lower..=self.upper)
    }
}

impl From<(f64, f64)> for Bound {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self { lower, upper }
    }
}

/// Builds a bound list from `(lower, upper)` pairs.
pub fn bounds_from_pairs(pairs: &[(f64, f64)]) -> Vec<Bound> {
    pairs.iter().copied().map(Bound::from).collect()
}

// ===== TRACE =====

/// Leader mark recorded at the end of one outer iteration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub iteration: u32,
    pub mark: Mark,
}

/// Per-iteration history of the leader mark. Monitoring only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, iteration: u32, mark: Mark) {
        self.entries.push(TraceEntry { iteration, mark });
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TraceEntry> {
        self.entries.last()
    }

    /// Iteration numbers, in recording order.
    pub fn iterations(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.iteration).collect()
    }

    /// Leader marks, in recording order.
    pub fn marks(&self) -> Vec<Mark> {
        self.entries.iter().map(|e| e.mark).collect()
    }

    /// True when no recorded mark is worse than its predecessor.
    pub fn is_non_increasing(&self) -> bool {
        self.entries.windows(2).all(|w| !(w[1].mark > w[0].mark))
    }
}
