//! Python bindings for the training session
//!
//! Gantree: L9_Python → PyTrainingSession, training_tick, visualization_refresh
//!
//! The free functions speak JSON so a host can keep the log and the spectrum
//! record in its own store between timer callbacks.

use crate::config::{json_to_dict, PyNoiseParams, PySessionConfig};
use crate::error::{json_err, to_py_err};
use pyo3::prelude::*;
use qfit_engine::{SessionConfig, TrainingLog, TrainingSession};
use qfit_noise::NoiseParams;
use qfit_spectrum::SpectrumRecord;

/// Python wrapper for TrainingSession
/// Gantree: PyTrainingSession // 학습 세션 바인딩
#[pyclass(name = "TrainingSession")]
pub struct PyTrainingSession {
    inner: TrainingSession,
}

#[pymethods]
impl PyTrainingSession {
    /// Start a session
    #[new]
    pub fn new(config: &PySessionConfig) -> PyResult<Self> {
        TrainingSession::new(config.inner.clone())
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    /// One tick; returns the new loss
    pub fn tick(&mut self, noise: &PyNoiseParams) -> PyResult<f64> {
        let log = self.inner.tick(&noise.inner).map_err(to_py_err)?;
        Ok(log.last_loss().unwrap_or(f64::NAN))
    }

    /// Polling guard
    pub fn should_continue(&self) -> bool {
        self.inner.should_continue()
    }

    /// Visualization frame as JSON
    pub fn refresh_json(&mut self, noise: &PyNoiseParams) -> PyResult<String> {
        let frame = self.inner.refresh(&noise.inner).map_err(to_py_err)?;
        frame.to_json().map_err(to_py_err)
    }

    /// Visualization frame as a dictionary
    pub fn refresh(&mut self, py: Python<'_>, noise: &PyNoiseParams) -> PyResult<PyObject> {
        let json = self.refresh_json(noise)?;
        json_to_dict(py, json)
    }

    /// Loss history
    #[getter]
    pub fn loss(&self) -> Vec<f64> {
        self.inner.log().loss.clone()
    }

    /// Latest weights
    #[getter]
    pub fn weights(&self) -> Vec<Vec<f64>> {
        self.inner.log().weights.to_rows()
    }

    /// Drop all session state
    pub fn end(&mut self) {
        self.inner.end();
    }

    fn __repr__(&self) -> String {
        format!("TrainingSession({})", self.inner.log())
    }
}

/// One training tick over JSON
///
/// `config`, `noise`, and `log` are JSON objects; returns the new log.
#[pyfunction]
#[pyo3(signature = (config, noise, log=None))]
pub fn training_tick(config: &str, noise: &str, log: Option<&str>) -> PyResult<String> {
    let config = SessionConfig::from_json(config).map_err(to_py_err)?;
    let noise: NoiseParams = serde_json::from_str(noise).map_err(json_err)?;
    let log: TrainingLog = match log {
        Some(json) => serde_json::from_str(json).map_err(json_err)?,
        None => TrainingLog::new(),
    };

    let log = qfit_engine::training_tick(&config, &noise, log).map_err(to_py_err)?;
    serde_json::to_string(&log).map_err(json_err)
}

/// Visualization refresh over JSON; returns the frame
#[pyfunction]
#[pyo3(signature = (config, noise, log, record=None))]
pub fn visualization_refresh(config: &str, noise: &str, log: &str, record: Option<&str>) -> PyResult<String> {
    let config = SessionConfig::from_json(config).map_err(to_py_err)?;
    let noise: NoiseParams = serde_json::from_str(noise).map_err(json_err)?;
    let log: TrainingLog = serde_json::from_str(log).map_err(json_err)?;
    let record: Option<SpectrumRecord> = record
        .map(serde_json::from_str)
        .transpose()
        .map_err(json_err)?;

    let frame = qfit_engine::visualization_refresh(&config, &noise, &log, record).map_err(to_py_err)?;
    frame.to_json().map_err(to_py_err)
}
