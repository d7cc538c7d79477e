//! Python bindings for Instructor
//!
//! Gantree: L9_Python → PyInstructor
//!
//! Weights cross the boundary as nested lists, one row per layer.

use crate::config::{PyNoiseParams, PySessionConfig};
use crate::error::to_py_err;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use qfit_core::Weights;
use qfit_engine::Instructor;

/// Python wrapper for Instructor
/// Gantree: PyInstructor // 학습 엔진 바인딩
#[pyclass(name = "Instructor")]
pub struct PyInstructor {
    inner: Instructor,
}

#[pymethods]
impl PyInstructor {
    /// Create with the Circuit19 ansatz
    #[new]
    #[pyo3(signature = (niq=2, nil=4, seed=100))]
    pub fn new(niq: usize, nil: usize, seed: u64) -> PyResult<Self> {
        Instructor::new(niq, nil, seed)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    /// Create from a session configuration
    #[staticmethod]
    pub fn from_config(config: &PySessionConfig) -> PyResult<Self> {
        Instructor::from_config(&config.inner)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Training inputs
    #[getter]
    pub fn x_domain(&self) -> Vec<f64> {
        self.inner.x_domain().to_vec()
    }

    /// Targets at the training inputs
    #[getter]
    pub fn y_target(&self) -> Vec<f64> {
        self.inner.y_target().to_vec()
    }

    /// Seeded initial weights
    #[getter]
    pub fn initial_weights(&self) -> Vec<Vec<f64>> {
        self.inner.initial_weights().to_rows()
    }

    /// Highest frequency the model can express
    #[getter]
    pub fn max_freq(&self) -> usize {
        self.inner.max_freq()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Model outputs at `xs`; initial weights when `weights` is None
    #[pyo3(signature = (xs, noise, weights=None))]
    pub fn forward(&self, xs: Vec<f64>, noise: &PyNoiseParams, weights: Option<Vec<Vec<f64>>>) -> PyResult<Vec<f64>> {
        let weights = weights.map(Weights::from_rows).transpose().map_err(to_py_err)?;
        self.inner
            .forward(&xs, weights.as_ref(), &noise.inner)
            .map_err(to_py_err)
    }

    /// Mean squared error against `y_target`
    pub fn cost(&self, weights: Vec<Vec<f64>>, y_target: Vec<f64>, noise: &PyNoiseParams) -> PyResult<f64> {
        let weights = Weights::from_rows(weights).map_err(to_py_err)?;
        self.inner
            .cost(&weights, &y_target, &noise.inner)
            .map_err(to_py_err)
    }

    /// One Adam step; returns `(new_weights, loss)`
    pub fn step(&mut self, weights: Vec<Vec<f64>>, noise: &PyNoiseParams) -> PyResult<(Vec<Vec<f64>>, f64)> {
        let weights = Weights::from_rows(weights).map_err(to_py_err)?;
        let outcome = self.inner.step(&weights, &noise.inner).map_err(to_py_err)?;
        Ok((outcome.weights.to_rows(), outcome.loss))
    }

    /// Spectrum of the model; returns `(bin_count, {"real", "imag", "comb"})`
    pub fn calc_hist(
        &self,
        py: Python<'_>,
        weights: Vec<Vec<f64>>,
        noise: &PyNoiseParams,
    ) -> PyResult<(usize, PyObject)> {
        let weights = Weights::from_rows(weights).map_err(to_py_err)?;
        let (n, data) = self.inner.calc_hist(&weights, &noise.inner).map_err(to_py_err)?;

        let dict = PyDict::new(py);
        dict.set_item("real", data.real)?;
        dict.set_item("imag", data.imag)?;
        dict.set_item("comb", data.comb)?;
        Ok((n, dict.to_object(py)))
    }

    /// Clear Adam state
    pub fn reset_optimizer(&mut self) {
        self.inner.reset_optimizer();
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_py_instructor_new() {
        let inst = PyInstructor::new(2, 4, 100).unwrap();
        assert_eq!(inst.x_domain().len(), 19);
        assert_eq!(inst.initial_weights().len(), 4);
        assert_eq!(inst.initial_weights()[0].len(), 5);
        assert_eq!(inst.max_freq(), 8);

        assert!(PyInstructor::new(0, 4, 100).is_err());
    }

    #[test]
    fn test_py_instructor_step() {
        let mut inst = PyInstructor::new(1, 2, 100).unwrap();
        let noise = PyNoiseParams::noiseless();

        let (weights, loss) = inst.step(inst.initial_weights(), &noise).unwrap();
        assert_eq!(weights.len(), 2);
        assert!(loss >= 0.0);

        let cost = inst.cost(inst.initial_weights(), inst.y_target(), &noise).unwrap();
        approx::assert_abs_diff_eq!(cost, loss, epsilon = 1e-12);
    }

    #[test]
    fn test_py_instructor_forward_default() {
        let inst = PyInstructor::new(1, 1, 3).unwrap();
        let noise = PyNoiseParams::noiseless();
        let xs = inst.x_domain();

        let implicit = inst.forward(xs.clone(), &noise, None).unwrap();
        let explicit = inst.forward(xs, &noise, Some(inst.initial_weights())).unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn test_py_instructor_ragged_weights() {
        let mut inst = PyInstructor::new(1, 2, 100).unwrap();
        let ragged = vec![vec![0.0; 2], vec![0.0; 1]];
        assert!(inst.step(ragged, &PyNoiseParams::noiseless()).is_err());
    }
}
