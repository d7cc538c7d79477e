//! Python bindings for SessionConfig and NoiseParams
//!
//! Gantree: L9_Python → PySessionConfig, PyNoiseParams

use crate::error::{json_err, to_py_err};
use pyo3::prelude::*;
use qfit_engine::{OptimizerPolicy, SessionConfig};
use qfit_noise::NoiseParams;

/// Python wrapper for SessionConfig
/// Gantree: PySessionConfig // 세션 설정 바인딩
#[pyclass(name = "SessionConfig")]
#[derive(Clone)]
pub struct PySessionConfig {
    pub(crate) inner: SessionConfig,
}

#[pymethods]
impl PySessionConfig {
    /// Create a configuration; `niq` qubits, `nil` layers
    #[new]
    #[pyo3(signature = (niq=2, nil=4, seed=100))]
    pub fn new(niq: usize, nil: usize, seed: u64) -> Self {
        Self {
            inner: SessionConfig::new(niq, nil, seed),
        }
    }

    /// Parse from JSON
    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<Self> {
        SessionConfig::from_json(json)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set Adam step size
    pub fn with_stepsize(&self, stepsize: f64) -> Self {
        Self {
            inner: self.inner.clone().with_stepsize(stepsize),
        }
    }

    /// Set log capacity
    pub fn with_log_capacity(&self, capacity: usize) -> Self {
        Self {
            inner: self.inner.clone().with_log_capacity(capacity),
        }
    }

    /// Keep Adam moments across ticks
    pub fn with_persistent_optimizer(&self, persistent: bool) -> Self {
        let policy = if persistent {
            OptimizerPolicy::Persistent
        } else {
            OptimizerPolicy::ResetPerTick
        };
        Self {
            inner: self.inner.clone().with_optimizer_policy(policy),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of qubits
    #[getter]
    pub fn niq(&self) -> usize {
        self.inner.n_qubits
    }

    /// Number of layers
    #[getter]
    pub fn nil(&self) -> usize {
        self.inner.n_layers
    }

    /// Seed
    #[getter]
    pub fn seed(&self) -> u64 {
        self.inner.seed
    }

    /// Adam step size
    #[getter]
    pub fn stepsize(&self) -> f64 {
        self.inner.stepsize
    }

    /// Log capacity
    #[getter]
    pub fn log_capacity(&self) -> usize {
        self.inner.log_capacity
    }

    /// Validate configuration
    pub fn validate(&self) -> PyResult<()> {
        self.inner.validate().map_err(to_py_err)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(to_py_err)
    }

    /// Convert to dictionary
    pub fn to_dict(&self, py: Python<'_>) -> PyResult<PyObject> {
        json_to_dict(py, self.to_json()?)
    }

    fn __repr__(&self) -> String {
        format!(
            "SessionConfig(niq={}, nil={}, seed={}, stepsize={})",
            self.inner.n_qubits, self.inner.n_layers, self.inner.seed, self.inner.stepsize
        )
    }
}

/// Python wrapper for NoiseParams
/// Gantree: PyNoiseParams // 노이즈 바인딩
#[pyclass(name = "NoiseParams")]
#[derive(Clone)]
pub struct PyNoiseParams {
    pub(crate) inner: NoiseParams,
}

#[pymethods]
impl PyNoiseParams {
    /// Create from the five channel probabilities
    #[new]
    #[pyo3(signature = (bf=0.0, pf=0.0, ad=0.0, pd=0.0, dp=0.0))]
    pub fn new(bf: f64, pf: f64, ad: f64, pd: f64, dp: f64) -> Self {
        Self {
            inner: NoiseParams::new(bf, pf, ad, pd, dp),
        }
    }

    /// No noise
    #[staticmethod]
    pub fn noiseless() -> Self {
        Self {
            inner: NoiseParams::noiseless(),
        }
    }

    /// Damping probabilities from T1, T2, and the layer duration (μs)
    #[staticmethod]
    pub fn from_coherence(t1_us: f64, t2_us: f64, layer_time_us: f64) -> PyResult<Self> {
        NoiseParams::from_coherence(t1_us, t2_us, layer_time_us)
            .map(|inner| Self { inner })
            .map_err(to_py_err)
    }

    /// Parse from JSON
    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<Self> {
        serde_json::from_str(json)
            .map(|inner| Self { inner })
            .map_err(json_err)
    }

    /// Bit flip
    #[getter]
    pub fn bf(&self) -> f64 {
        self.inner.bit_flip()
    }

    /// Phase flip
    #[getter]
    pub fn pf(&self) -> f64 {
        self.inner.phase_flip()
    }

    /// Amplitude damping
    #[getter]
    pub fn ad(&self) -> f64 {
        self.inner.amplitude_damping()
    }

    /// Phase damping
    #[getter]
    pub fn pd(&self) -> f64 {
        self.inner.phase_damping()
    }

    /// Depolarization
    #[getter]
    pub fn dp(&self) -> f64 {
        self.inner.depolarization()
    }

    /// All probabilities within [0, 1]
    pub fn is_valid(&self) -> bool {
        self.inner.is_valid()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(json_err)
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}

/// `json.loads` on a serialized value
pub(crate) fn json_to_dict(py: Python<'_>, json: String) -> PyResult<PyObject> {
    let json_module = py.import("json")?;
    json_module.call_method1("loads", (json,)).map(|o| o.into())
}
