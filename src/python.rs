use crate::core::{bounds_from_pairs, check_dimension, validate_bounds, Bound as SearchBound, Trace};
use crate::error::IasError;
use crate::core::Mark;
use crate::optimization::{IasConfig, IasOptimizer, OptimizationCallback, Problem, Solver};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

impl From<IasError> for PyErr {
    fn from(err: IasError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Python callable wrapped as a problem
struct PyObjective<'a> {
    obj_func: &'a Py<PyAny>,
    bounds: Vec<SearchBound>,
}

impl Problem for PyObjective<'_> {
    fn cost(&self, params: &[f64]) -> Result<f64, IasError> {
        check_dimension(&self.bounds, params)?;
        Python::with_gil(|py| {
            self.obj_func
                .call1(py, (params.to_vec(),))
                .and_then(|value| value.extract::<f64>(py))
                .map_err(|e| IasError::Objective(e.to_string()))
        })
    }

    fn bounds(&self) -> &[SearchBound] {
        &self.bounds
    }
}

/// Stops the run when Python has a pending signal (Ctrl+C)
struct SignalCallback;

impl OptimizationCallback for SignalCallback {
    fn on_iteration(&mut self, _iteration: u32, _params: &[f64], _cost: Mark) -> Result<(), IasError> {
        Python::with_gil(|py| py.check_signals())
            .map_err(|_| IasError::Callback("Interrupted by user (Ctrl+C)".to_string()))
    }
}

#[pyclass(name = "IAS")]
pub struct PyIas {
    obj_func: Py<PyAny>,
    #[pyo3(get)]
    x_bounds: Vec<(f64, f64)>,
    #[pyo3(get)]
    n_students: usize,
    #[pyo3(get)]
    n_iterations: u32,
    #[pyo3(get, set)]
    seed: Option<u64>,
    trace: Trace,
}

#[pymethods]
impl PyIas {
    #[new]
    #[pyo3(signature = (obj_func, x_bounds, n_students, n_iterations, seed=None))]
    fn new(
        obj_func: Py<PyAny>,
        x_bounds: Vec<(f64, f64)>,
        n_students: usize,
        n_iterations: u32,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        validate_bounds(&bounds_from_pairs(&x_bounds))?;
        IasConfig::new(n_students, n_iterations).validate()?;
        Ok(Self {
            obj_func,
            x_bounds,
            n_students,
            n_iterations,
            seed,
            trace: Trace::default(),
        })
    }

    /// Run the optimizer; returns `(f(x), x)` of the final leader
    fn do_optimization(&mut self) -> PyResult<(f64, Vec<f64>)> {
        let mut config = IasConfig::new(self.n_students, self.n_iterations);
        config.seed = self.seed;
        let mut optimizer = IasOptimizer::new(config)?;

        let problem = PyObjective {
            obj_func: &self.obj_func,
            bounds: bounds_from_pairs(&self.x_bounds),
        };
        let result = optimizer.solve(&problem, &mut SignalCallback)?;

        self.trace = result.trace;
        Ok((result.cost, result.params))
    }

    /// `{"f(x)": [...], "iters": [...]}` of the last run
    #[getter]
    fn history<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new_bound(py);
        dict.set_item("f(x)", self.trace.marks())?;
        dict.set_item("iters", self.trace.iterations())?;
        Ok(dict)
    }

    fn __repr__(&self) -> String {
        format!(
            "IAS Object with {} students and {} iterations",
            self.n_students, self.n_iterations
        )
    }
}

#[pymodule]
fn autodidactic(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyIas>()?;
    Ok(())
}
